use bobiare_common::Secret;
use thiserror::Error;

use crate::{
    db_types::UserAccount,
    helpers::PasswordHashError,
    traits::data_objects::NewUserAccount,
};

#[derive(Debug, Clone, Error)]
pub enum AccountError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("An account for {0} already exists")]
    AccountExists(String),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Invalid account details: {0}")]
    InvalidAccount(String),
    #[error("{0}")]
    PasswordHash(#[from] PasswordHashError),
}

impl From<sqlx::Error> for AccountError {
    fn from(e: sqlx::Error) -> Self {
        AccountError::DatabaseError(e.to_string())
    }
}

/// The `AccountManagement` trait defines how customer accounts are created and how their credentials are checked.
///
/// Passwords are never stored in plain text. Implementations keep an Argon2 hash (see
/// [`crate::helpers::hash_password`]) alongside the account record.
#[allow(async_fn_in_trait)]
pub trait AccountManagement {
    /// Creates a new account. Emails are compared case-insensitively, and a second account for the same email
    /// fails with [`AccountError::AccountExists`].
    async fn create_account(&self, account: NewUserAccount) -> Result<UserAccount, AccountError>;

    /// Returns the account if the email exists and the password matches its stored hash. Both failure cases
    /// produce [`AccountError::InvalidCredentials`], so callers cannot tell which one it was.
    async fn verify_credentials(&self, email: &str, password: &Secret<String>) -> Result<UserAccount, AccountError>;

    async fn fetch_account(&self, email: &str) -> Result<Option<UserAccount>, AccountError>;
}
