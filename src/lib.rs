pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;

use std::sync::Arc;

use sqlx::SqlitePool;

pub use config::Config;
pub use database::repositories::{LocationRepository, LocationStore, UserRepository, UserStore};
pub use error::AppError;
pub use services::{SessionContext, SessionService};

/// Data-access handles shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub locations: Arc<dyn LocationStore>,
}

impl AppState {
    pub fn new(users: Arc<dyn UserStore>, locations: Arc<dyn LocationStore>) -> Self {
        Self { users, locations }
    }

    /// State backed by the SQLite repositories.
    pub fn sqlite(pool: SqlitePool) -> Self {
        Self::new(
            Arc::new(UserRepository::new(pool.clone())),
            Arc::new(LocationRepository::new(pool)),
        )
    }
}
