use std::str::FromStr;

use anyhow::Result;
use sqlx::{
    Sqlite,
    migrate::MigrateDatabase,
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
};

pub mod models;
pub mod repositories;
pub mod transaction;

pub async fn init_database(database_url: &str) -> Result<SqlitePool> {
    let in_memory = database_url.contains(":memory:");

    // Create database if it doesn't exist
    if !in_memory && !Sqlite::database_exists(database_url).await.unwrap_or(false) {
        log::info!("Creating database {}", database_url);
        Sqlite::create_database(database_url).await?;
    }

    let options = SqliteConnectOptions::from_str(database_url)?.foreign_keys(true);

    // Every connection to `:memory:` is its own database, so keep exactly one
    let pool = SqlitePoolOptions::new()
        .max_connections(if in_memory { 1 } else { 5 })
        .connect_with(options)
        .await?;

    log::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    log::info!("Migrations completed successfully");

    Ok(pool)
}
