#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App};
use anyhow::Result;
use async_trait::async_trait;
use fake::faker::internet::en::Username;
use fake::faker::name::en::Name;
use fake::Fake;
use sqlx::SqlitePool;
use std::env;
use tempfile::TempDir;

use memories::database::init_database;
use memories::database::models::{
    Location, LocationChanges, LocationInput, User, UserChanges, UserInput,
};
use memories::middleware::RequestIdMiddleware;
use memories::{
    routes, AppError, AppState, Config, LocationStore, SessionService, UserStore,
};

// Test database wrapper
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let database_url = format!("sqlite:{}/test.db", temp_dir.path().display());
        let pool = init_database(&database_url).await?;

        Ok(TestDb {
            pool,
            _temp_dir: temp_dir,
        })
    }

    pub fn state(&self) -> AppState {
        AppState::sqlite(self.pool.clone())
    }
}

/// The full application wired the way `main` wires it, minus CORS.
pub fn create_app(
    state: AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::Data::new(SessionService::new(Config::test_config())))
        .wrap(RequestIdMiddleware)
        .configure(routes::configure)
}

// Mock data generators
pub struct MockData;

impl MockData {
    pub fn user() -> UserInput {
        UserInput {
            display_name: Name().fake(),
            username: Username().fake(),
            latitude: None,
            longitude: None,
        }
    }

    pub fn location(user_id: i64, place_title: &str) -> LocationInput {
        LocationInput {
            user_id,
            place_title: place_title.to_string(),
            address: "1 Main St".to_string(),
            city: "X".to_string(),
            state: "Y".to_string(),
            zip_code: "00000".to_string(),
            latitude: 40.5,
            longitude: -73.25,
        }
    }
}

/// Query string for `POST /locations` with every field present.
pub fn location_query(user_id: i64, place_title: &str, latitude: f64, longitude: f64) -> String {
    format!(
        "id={}&place_title={}&address=1%20Main%20St&city=X&state=Y&zip_code=00000&latitude={}&longitude={}",
        user_id, place_title, latitude, longitude
    )
}

/// `UserStore` + `LocationStore` kept in memory, for exercising handlers
/// without a database.
#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    locations: Vec<Location>,
    next_user_id: i64,
    next_location_id: i64,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Seeds a user with a caller-chosen id.
    pub fn insert_user(&self, user: User) {
        let mut tables = self.inner.lock().unwrap();
        tables.next_user_id = tables.next_user_id.max(user.id);
        tables.users.push(user);
        tables.users.sort_by_key(|u| u.id);
    }

    pub fn state(self: &Arc<Self>) -> AppState {
        AppState::new(self.clone(), self.clone())
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let tables = self.inner.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let tables = self.inner.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.inner.lock().unwrap().users.clone())
    }

    async fn create(&self, input: UserInput) -> Result<User, AppError> {
        let mut tables = self.inner.lock().unwrap();
        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            display_name: input.display_name,
            username: input.username,
            latitude: input.latitude,
            longitude: input.longitude,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: i64, changes: UserChanges) -> Result<Option<User>, AppError> {
        let mut tables = self.inner.lock().unwrap();
        Ok(tables.users.iter_mut().find(|u| u.id == id).map(|user| {
            changes.apply(user);
            user.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.inner.lock().unwrap();
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        tables.locations.retain(|l| l.user_id != id);
        Ok(tables.users.len() < before)
    }
}

#[async_trait]
impl LocationStore for InMemoryStore {
    async fn find(&self, user_id: i64, place_title: &str) -> Result<Option<Location>, AppError> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .locations
            .iter()
            .find(|l| l.user_id == user_id && l.place_title == place_title)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Location>, AppError> {
        let mut locations = self.inner.lock().unwrap().locations.clone();
        locations.sort_by_key(|l| (l.user_id, l.id));
        Ok(locations)
    }

    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Location>, AppError> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .locations
            .iter()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create(&self, input: LocationInput) -> Result<Location, AppError> {
        let mut tables = self.inner.lock().unwrap();
        if !tables.users.iter().any(|u| u.id == input.user_id) {
            return Err(AppError::NotFound(format!("user {}", input.user_id)));
        }
        if tables
            .locations
            .iter()
            .any(|l| l.user_id == input.user_id && l.place_title == input.place_title)
        {
            return Err(AppError::BadRequest("duplicate place title".to_string()));
        }

        tables.next_location_id += 1;
        let location = Location {
            id: tables.next_location_id,
            user_id: input.user_id,
            place_title: input.place_title,
            address: input.address,
            city: input.city,
            state: input.state,
            zip_code: input.zip_code,
            latitude: input.latitude,
            longitude: input.longitude,
        };
        tables.locations.push(location.clone());
        Ok(location)
    }

    async fn update(
        &self,
        user_id: i64,
        place_title: &str,
        changes: LocationChanges,
    ) -> Result<Option<Location>, AppError> {
        let mut tables = self.inner.lock().unwrap();
        Ok(tables
            .locations
            .iter_mut()
            .find(|l| l.user_id == user_id && l.place_title == place_title)
            .map(|location| {
                changes.apply(location);
                location.clone()
            }))
    }

    async fn delete(&self, user_id: i64, place_title: &str) -> Result<bool, AppError> {
        let mut tables = self.inner.lock().unwrap();
        let before = tables.locations.len();
        tables
            .locations
            .retain(|l| !(l.user_id == user_id && l.place_title == place_title));
        Ok(tables.locations.len() < before)
    }
}

pub fn setup_test_env() {
    unsafe {
        env::set_var("RUST_LOG", "debug");
    }
    let _ = env_logger::builder().is_test(true).try_init();
}
