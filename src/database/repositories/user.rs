use async_trait::async_trait;
use sqlx::SqlitePool;

use super::UserStore;
use crate::database::models::{User, UserChanges, UserInput};
use crate::database::transaction::DatabaseTransaction;
use crate::error::AppError;

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, display_name, username, latitude, longitude
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        // usernames are not unique; the oldest account wins
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, display_name, username, latitude, longitude
            FROM users
            WHERE username = ?1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, display_name, username, latitude, longitude FROM users ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn create(&self, input: UserInput) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (display_name, username, latitude, longitude)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, display_name, username, latitude, longitude
            "#,
        )
        .bind(&input.display_name)
        .bind(&input.username)
        .bind(input.latitude)
        .bind(input.longitude)
        .fetch_one(&self.pool)
        .await?;

        log::info!("Created user {} (@{})", user.id, user.username);
        Ok(user)
    }

    async fn update(&self, id: i64, changes: UserChanges) -> Result<Option<User>, AppError> {
        DatabaseTransaction::run(&self.pool, |tx| {
            Box::pin(async move {
                let current = sqlx::query_as::<_, User>(
                    "SELECT id, display_name, username, latitude, longitude FROM users WHERE id = ?1",
                )
                .bind(id)
                .fetch_optional(&mut **tx)
                .await?;

                let Some(mut user) = current else {
                    return Ok(None);
                };
                changes.apply(&mut user);

                sqlx::query(
                    r#"
                    UPDATE users
                    SET display_name = ?1, username = ?2, latitude = ?3, longitude = ?4
                    WHERE id = ?5
                    "#,
                )
                .bind(&user.display_name)
                .bind(&user.username)
                .bind(user.latitude)
                .bind(user.longitude)
                .bind(user.id)
                .execute(&mut **tx)
                .await?;

                Ok(Some(user))
            })
        })
        .await
    }

    /// Locations are deleted explicitly rather than left to `ON DELETE
    /// CASCADE`, which SQLite only honours on connections opened with
    /// `foreign_keys` enabled.
    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        DatabaseTransaction::run(&self.pool, |tx| {
            Box::pin(async move {
                let removed_locations = sqlx::query("DELETE FROM locations WHERE user_id = ?1")
                    .bind(id)
                    .execute(&mut **tx)
                    .await?
                    .rows_affected();

                let result = sqlx::query("DELETE FROM users WHERE id = ?1")
                    .bind(id)
                    .execute(&mut **tx)
                    .await?;

                if result.rows_affected() > 0 {
                    log::info!("Deleted user {} and {} location(s)", id, removed_locations);
                }
                Ok(result.rows_affected() > 0)
            })
        })
        .await
    }
}
