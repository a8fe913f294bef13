use thiserror::Error;

use crate::db_types::StoredImage;

/// The bucket product images are uploaded to. It is the first segment of every public image path.
pub const IMAGE_BUCKET: &str = "bobiareimg";

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("An object already exists at {0}")]
    AlreadyExists(String),
    #[error("Invalid object path: {0}")]
    InvalidPath(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        StorageError::DatabaseError(e.to_string())
    }
}

/// The public URL of an object in the image bucket, as served by the storefront's `/imagenes` route.
pub fn public_image_url(base_url: &str, path: &str) -> String {
    format!("{}/imagenes/{IMAGE_BUCKET}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Object paths are flat file names such as `1692712800000.png`.
pub fn validate_image_path(path: &str) -> Result<(), StorageError> {
    let valid = !path.is_empty()
        && !path.starts_with('.')
        && path.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidPath(path.to_string()))
    }
}

/// Object storage for product images.
#[allow(async_fn_in_trait)]
pub trait ImageStorage {
    /// Stores `bytes` at `path` inside [`IMAGE_BUCKET`]. Uploads never overwrite; an existing path is an error.
    async fn upload_image(&self, path: &str, content_type: &str, bytes: Vec<u8>) -> Result<(), StorageError>;

    /// The URL at which the object at `path` can be downloaded. The object does not have to exist.
    fn public_url(&self, path: &str) -> String;

    async fn fetch_image(&self, path: &str) -> Result<Option<StoredImage>, StorageError>;
}
