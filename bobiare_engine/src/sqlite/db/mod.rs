//! # SQLite Database methods
//!
//! This module contains "low-level" SQLite database interactions.
//!
//! All these interactions are simple functions (rather than stateful structs) that accept a `&mut SqliteConnection`
//! argument. Callers can obtain a connection from a pool, or open a transaction and pass `&mut *tx` through.
use std::env;

use log::info;
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Error as SqlxError, Sqlite, SqlitePool};

pub mod colors;
pub mod images;
pub mod products;
pub mod user_accounts;

const SQLITE_DB_URL: &str = "sqlite://data/bobiare.db";

pub fn db_url() -> String {
    let result = env::var("BOBIARE_DATABASE_URL").unwrap_or_else(|_| {
        info!("🗃️ BOBIARE_DATABASE_URL is not set. Using the default.");
        SQLITE_DB_URL.to_string()
    });
    info!("🗃️ Using database URL: {result}");
    result
}

/// Opens a connection pool, creating the database file first if it does not exist yet.
pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqlxError> {
    if !Sqlite::database_exists(url).await.unwrap_or(false) {
        info!("🗃️ Database {url} does not exist. Creating it.");
        Sqlite::create_database(url).await?;
    }
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect(url).await?;
    Ok(pool)
}
