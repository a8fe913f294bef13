use log::debug;
use sqlx::{FromRow, SqliteConnection};

use crate::{db_types::UserAccount, traits::AccountError};

/// An account row together with its password hash.
#[derive(FromRow)]
pub struct AccountWithHash {
    #[sqlx(flatten)]
    pub account: UserAccount,
    pub password_hash: String,
}

pub async fn fetch_account(email: &str, conn: &mut SqliteConnection) -> Result<Option<UserAccount>, AccountError> {
    let account = sqlx::query_as("SELECT id, email, is_admin, created_at FROM user_accounts WHERE email = $1")
        .bind(email)
        .fetch_optional(conn)
        .await?;
    Ok(account)
}

pub async fn fetch_account_with_hash(
    email: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<AccountWithHash>, AccountError> {
    let account = sqlx::query_as(
        r#"SELECT id, email, is_admin, created_at, password_hash FROM user_accounts WHERE email = $1"#,
    )
    .bind(email)
    .fetch_optional(conn)
    .await?;
    Ok(account)
}

/// Inserts the account. The email must already be normalized and checked for duplicates.
pub async fn insert_account(
    email: &str,
    password_hash: &str,
    is_admin: bool,
    conn: &mut SqliteConnection,
) -> Result<UserAccount, AccountError> {
    let account: UserAccount = sqlx::query_as(
        r#"INSERT INTO user_accounts (email, password_hash, is_admin) VALUES ($1, $2, $3)
        RETURNING id, email, is_admin, created_at"#,
    )
    .bind(email)
    .bind(password_hash)
    .bind(is_admin)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Account #{} created for {}", account.id, account.email);
    Ok(account)
}
