use log::debug;
use sqlx::SqliteConnection;

use crate::{db_types::StoredImage, traits::StorageError};

pub async fn image_exists(path: &str, conn: &mut SqliteConnection) -> Result<bool, StorageError> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM images WHERE path = $1").bind(path).fetch_one(conn).await?;
    Ok(count > 0)
}

pub async fn insert_image(
    path: &str,
    content_type: &str,
    bytes: Vec<u8>,
    conn: &mut SqliteConnection,
) -> Result<(), StorageError> {
    let size = bytes.len();
    sqlx::query("INSERT INTO images (path, content_type, bytes) VALUES ($1, $2, $3)")
        .bind(path)
        .bind(content_type)
        .bind(bytes)
        .execute(conn)
        .await?;
    debug!("🗃️ Image {path} stored ({size} bytes)");
    Ok(())
}

pub async fn fetch_image(path: &str, conn: &mut SqliteConnection) -> Result<Option<StoredImage>, StorageError> {
    let image = sqlx::query_as("SELECT path, content_type, bytes FROM images WHERE path = $1")
        .bind(path)
        .fetch_optional(conn)
        .await?;
    Ok(image)
}
