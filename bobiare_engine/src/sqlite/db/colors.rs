use sqlx::SqliteConnection;

use crate::{
    db_types::{ColorId, ColorOption},
    traits::CatalogError,
};

pub async fn fetch_colors(conn: &mut SqliteConnection) -> Result<Vec<ColorOption>, CatalogError> {
    // Sort c1, c2, .., c10 numerically rather than as text
    let colors = sqlx::query_as(
        r#"SELECT id, name, color_code, price FROM colors ORDER BY CAST(SUBSTR(id, 2) AS INTEGER), id"#,
    )
    .fetch_all(conn)
    .await?;
    Ok(colors)
}

pub async fn color_exists(id: &ColorId, conn: &mut SqliteConnection) -> Result<bool, CatalogError> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM colors WHERE id = $1").bind(id.as_str()).fetch_one(conn).await?;
    Ok(count > 0)
}
