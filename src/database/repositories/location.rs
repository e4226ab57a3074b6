use async_trait::async_trait;
use sqlx::SqlitePool;

use super::{conflict_as_bad_request, LocationStore};
use crate::database::models::{Location, LocationChanges, LocationInput};
use crate::database::transaction::DatabaseTransaction;
use crate::error::AppError;

const LOCATION_COLUMNS: &str =
    "id, user_id, place_title, address, city, state, zip_code, latitude, longitude";

#[derive(Clone)]
pub struct LocationRepository {
    pool: SqlitePool,
}

impl LocationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationStore for LocationRepository {
    async fn find(&self, user_id: i64, place_title: &str) -> Result<Option<Location>, AppError> {
        let location = sqlx::query_as::<_, Location>(&format!(
            "SELECT {} FROM locations WHERE user_id = ?1 AND place_title = ?2",
            LOCATION_COLUMNS
        ))
        .bind(user_id)
        .bind(place_title)
        .fetch_optional(&self.pool)
        .await?;

        Ok(location)
    }

    async fn list(&self) -> Result<Vec<Location>, AppError> {
        let locations = sqlx::query_as::<_, Location>(&format!(
            "SELECT {} FROM locations ORDER BY user_id, id",
            LOCATION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(locations)
    }

    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Location>, AppError> {
        let locations = sqlx::query_as::<_, Location>(&format!(
            "SELECT {} FROM locations WHERE user_id = ?1 ORDER BY id",
            LOCATION_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(locations)
    }

    async fn create(&self, input: LocationInput) -> Result<Location, AppError> {
        DatabaseTransaction::run(&self.pool, |tx| {
            Box::pin(async move {
                let owner: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE id = ?1")
                    .bind(input.user_id)
                    .fetch_optional(&mut **tx)
                    .await?;
                if owner.is_none() {
                    return Err(AppError::NotFound(format!("user {}", input.user_id)));
                }

                let location = sqlx::query_as::<_, Location>(&format!(
                    r#"
                    INSERT INTO locations
                        (user_id, place_title, address, city, state, zip_code, latitude, longitude)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                    RETURNING {}
                    "#,
                    LOCATION_COLUMNS
                ))
                .bind(input.user_id)
                .bind(&input.place_title)
                .bind(&input.address)
                .bind(&input.city)
                .bind(&input.state)
                .bind(&input.zip_code)
                .bind(input.latitude)
                .bind(input.longitude)
                .fetch_one(&mut **tx)
                .await
                .map_err(|err| {
                    conflict_as_bad_request(
                        err,
                        format!(
                            "user {} already has a location titled '{}'",
                            input.user_id, input.place_title
                        ),
                    )
                })?;

                log::info!(
                    "Created location {} '{}' for user {}",
                    location.id,
                    location.place_title,
                    location.user_id
                );
                Ok(location)
            })
        })
        .await
    }

    async fn update(
        &self,
        user_id: i64,
        place_title: &str,
        changes: LocationChanges,
    ) -> Result<Option<Location>, AppError> {
        let place_title = place_title.to_string();

        DatabaseTransaction::run(&self.pool, |tx| {
            Box::pin(async move {
                let current = sqlx::query_as::<_, Location>(&format!(
                    "SELECT {} FROM locations WHERE user_id = ?1 AND place_title = ?2",
                    LOCATION_COLUMNS
                ))
                .bind(user_id)
                .bind(&place_title)
                .fetch_optional(&mut **tx)
                .await?;

                let Some(mut location) = current else {
                    return Ok(None);
                };
                changes.apply(&mut location);

                sqlx::query(
                    r#"
                    UPDATE locations
                    SET place_title = ?1, address = ?2, city = ?3, state = ?4,
                        zip_code = ?5, latitude = ?6, longitude = ?7
                    WHERE id = ?8
                    "#,
                )
                .bind(&location.place_title)
                .bind(&location.address)
                .bind(&location.city)
                .bind(&location.state)
                .bind(&location.zip_code)
                .bind(location.latitude)
                .bind(location.longitude)
                .bind(location.id)
                .execute(&mut **tx)
                .await
                .map_err(|err| {
                    conflict_as_bad_request(
                        err,
                        format!(
                            "user {} already has a location titled '{}'",
                            user_id, location.place_title
                        ),
                    )
                })?;

                Ok(Some(location))
            })
        })
        .await
    }

    async fn delete(&self, user_id: i64, place_title: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM locations WHERE user_id = ?1 AND place_title = ?2")
            .bind(user_id)
            .bind(place_title)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
