//! Argon2 password hashing, shared by every backend that stores credentials.
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use bobiare_common::Secret;
use log::*;
use rand_core::OsRng;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("Password hashing error: {0}")]
pub struct PasswordHashError(String);

/// Returns the PHC string form of the hash (`$argon2id$v=19$...`), salt included.
pub fn hash_password(password: &Secret<String>) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.reveal().as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| PasswordHashError(e.to_string()))
}

/// `Ok(false)` means the password is wrong. Errors are reserved for unreadable hashes.
pub fn verify_password(password: &Secret<String>, hash: &str) -> Result<bool, PasswordHashError> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!("🔐️ Stored password hash cannot be parsed. {e}");
        PasswordHashError(e.to_string())
    })?;
    match Argon2::default().verify_password(password.reveal().as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordHashError(e.to_string())),
    }
}
