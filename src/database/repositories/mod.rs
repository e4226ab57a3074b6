//! Data access for users and their locations.
//!
//! Handlers only see the [`UserStore`] and [`LocationStore`] traits; the
//! SQLite-backed [`UserRepository`] and [`LocationRepository`] are wired in
//! by `main`, and tests may substitute their own implementations.

use async_trait::async_trait;

use crate::database::models::{Location, LocationChanges, LocationInput, User, UserChanges, UserInput};
use crate::error::AppError;

pub mod location;
pub mod user;

pub use location::LocationRepository;
pub use user::UserRepository;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// All users ordered by id.
    async fn list(&self) -> Result<Vec<User>, AppError>;

    async fn create(&self, input: UserInput) -> Result<User, AppError>;

    /// `Ok(None)` when no user has this id.
    async fn update(&self, id: i64, changes: UserChanges) -> Result<Option<User>, AppError>;

    /// Removes the user and every location they own. `Ok(false)` when no
    /// user has this id.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}

#[async_trait]
pub trait LocationStore: Send + Sync {
    async fn find(&self, user_id: i64, place_title: &str) -> Result<Option<Location>, AppError>;

    /// All locations ordered by owner, then id.
    async fn list(&self) -> Result<Vec<Location>, AppError>;

    /// One user's locations ordered by id.
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Location>, AppError>;

    /// Fails with `NotFound` for an unknown owner and `BadRequest` when the
    /// owner already has a location with this title.
    async fn create(&self, input: LocationInput) -> Result<Location, AppError>;

    async fn update(
        &self,
        user_id: i64,
        place_title: &str,
        changes: LocationChanges,
    ) -> Result<Option<Location>, AppError>;

    async fn delete(&self, user_id: i64, place_title: &str) -> Result<bool, AppError>;
}

/// Maps a unique-index violation to a client error; everything else stays a
/// database error.
pub(crate) fn conflict_as_bad_request(err: sqlx::Error, message: String) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return AppError::BadRequest(message);
        }
    }
    AppError::from(err)
}
