use thiserror::Error;

use crate::db_types::{ColorOption, NewProduct, Product, ProductId, ProductWithColor};

#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Producto no encontrado")]
    ProductNotFound(ProductId),
    #[error("The product cannot be saved: {0}")]
    InvalidProduct(String),
    #[error("Could not upload the product image: {0}")]
    ImageUploadFailed(String),
}

impl From<sqlx::Error> for CatalogError {
    fn from(e: sqlx::Error) -> Self {
        CatalogError::DatabaseError(e.to_string())
    }
}

/// The `CatalogManagement` trait defines the product and color queries the storefront needs.
///
/// Products are created by the admin "add product" form and are read by the listing, detail and home pages.
/// Colors are read-only as far as the storefront is concerned.
#[allow(async_fn_in_trait)]
pub trait CatalogManagement {
    /// Fetches every product in the catalog, in insertion order.
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError>;

    /// Fetches a single product together with its referenced color. If the product does not exist, `None` is
    /// returned. A dangling color reference is not an error; the color is simply `None`.
    async fn fetch_product(&self, id: &ProductId) -> Result<Option<ProductWithColor>, CatalogError>;

    /// Stores a new product and returns it with its newly assigned id.
    async fn insert_product(&self, product: NewProduct) -> Result<Product, CatalogError>;

    async fn fetch_colors(&self) -> Result<Vec<ColorOption>, CatalogError>;
}
