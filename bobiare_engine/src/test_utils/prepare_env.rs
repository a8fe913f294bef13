use log::*;
use sqlx::{migrate::MigrateDatabase, Sqlite};

use crate::SqliteDatabase;

/// Public address used to build image URLs in test databases.
pub const TEST_BASE_URL: &str = "http://localhost:8470";

/// Creates an empty SQLite file in the system temp directory, runs the migrations (which seed the catalog and the
/// colour palette) and hands back a small pool connected to it.
pub async fn seeded_test_db() -> SqliteDatabase {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    let url = random_db_url();
    recreate_database(&url).await;
    let db = SqliteDatabase::new_with_url(&url, 2, TEST_BASE_URL).await.expect("Could not connect to the test database");
    db.migrate().await.expect("Migrations failed on the test database");
    db
}

pub fn random_db_url() -> String {
    let dir = std::env::temp_dir();
    format!("sqlite://{}/bobiare_test_{}.db", dir.display(), rand::random::<u64>())
}

/// Drops `url` if a previous run left it behind, then creates it afresh.
pub async fn recreate_database(url: &str) {
    if Sqlite::database_exists(url).await.unwrap_or(false) {
        debug!("🗃️ Removing stale test database {url}");
        Sqlite::drop_database(url).await.expect("Could not drop the stale test database");
    }
    Sqlite::create_database(url).await.expect("Could not create the test database");
    info!("🗃️ Created test database {url}");
}
