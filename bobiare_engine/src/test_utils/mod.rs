//! Helpers for tests that need a throwaway SQLite database.
mod prepare_env;

pub use prepare_env::{random_db_url, recreate_database, seeded_test_db, TEST_BASE_URL};
