use bobiare_common::Pesos;
use log::debug;
use sqlx::{FromRow, SqliteConnection};

use crate::{
    db_types::{ColorId, ColorOption, NewProduct, Product, ProductId, ProductWithColor},
    traits::CatalogError,
};

const PRODUCT_COLUMNS: &str = r#"
    CAST(products.id AS TEXT) AS id,
    products.name,
    products.category,
    products.description,
    products.image,
    products.color_id,
    products.time_estimate,
    products.price
"#;

#[derive(FromRow)]
struct ProductColorRow {
    #[sqlx(flatten)]
    product: Product,
    color_name: Option<String>,
    color_code: Option<String>,
    color_price: Option<Pesos>,
}

impl From<ProductColorRow> for ProductWithColor {
    fn from(row: ProductColorRow) -> Self {
        let color = match (row.product.color_id.clone(), row.color_name, row.color_code) {
            (Some(id), Some(name), Some(color_code)) => {
                Some(ColorOption { id, name, color_code, price: row.color_price.unwrap_or_default() })
            },
            _ => None,
        };
        Self { product: row.product, color }
    }
}

pub async fn fetch_products(conn: &mut SqliteConnection) -> Result<Vec<Product>, CatalogError> {
    let q = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY products.id");
    let products = sqlx::query_as(&q).fetch_all(conn).await?;
    Ok(products)
}

/// Product ids are integers in this database, so any id that does not parse as one cannot exist.
pub async fn fetch_product(
    id: &ProductId,
    conn: &mut SqliteConnection,
) -> Result<Option<ProductWithColor>, CatalogError> {
    let Ok(id) = id.as_str().parse::<i64>() else {
        return Ok(None);
    };
    let q = format!(
        r#"SELECT {PRODUCT_COLUMNS},
            colors.name AS color_name,
            colors.color_code AS color_code,
            colors.price AS color_price
        FROM products LEFT JOIN colors ON products.color_id = colors.id
        WHERE products.id = $1"#
    );
    let row: Option<ProductColorRow> = sqlx::query_as(&q).bind(id).fetch_optional(conn).await?;
    Ok(row.map(ProductWithColor::from))
}

pub async fn insert_product(product: NewProduct, conn: &mut SqliteConnection) -> Result<Product, CatalogError> {
    let q = format!(
        r#"INSERT INTO products (name, category, description, image, color_id, time_estimate, price)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {PRODUCT_COLUMNS}"#
    );
    let product: Product = sqlx::query_as(&q)
        .bind(product.name)
        .bind(product.category)
        .bind(product.description)
        .bind(product.image)
        .bind(product.color_id.map(|ColorId(id)| id))
        .bind(product.time_estimate)
        .bind(product.price)
        .fetch_one(conn)
        .await?;
    debug!("🗃️ Product {} ({}) inserted", product.id, product.name);
    Ok(product)
}
