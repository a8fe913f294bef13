//! `SqliteDatabase` is a concrete implementation of a storefront backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements all the traits defined in the [`crate::traits`]
//! module. Products, colors, uploaded images and user accounts all live in the same database file.
use std::fmt::Debug;

use bobiare_common::Secret;
use log::*;
use sqlx::{migrate::MigrateError, SqlitePool};

use super::db::{colors, db_url, images, new_pool, products, user_accounts};
use crate::{
    db_types::{ColorOption, NewProduct, Product, ProductId, ProductWithColor, StoredImage, UserAccount},
    helpers::{hash_password, verify_password},
    traits::{
        public_image_url,
        validate_image_path,
        AccountError,
        AccountManagement,
        CatalogError,
        CatalogManagement,
        ImageStorage,
        NewUserAccount,
        StorageError,
    },
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
    base_url: String,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Creates a new database API object, using the URL in `BOBIARE_DATABASE_URL`.
    pub async fn new(max_connections: u32, base_url: &str) -> Result<Self, sqlx::Error> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections, base_url).await
    }

    /// `base_url` is the public address of the storefront, used to build image URLs.
    pub async fn new_with_url(url: &str, max_connections: u32, base_url: &str) -> Result<Self, sqlx::Error> {
        trace!("🗃️ Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool, base_url: base_url.to_string() })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Brings the schema up to date. Safe to call on every startup.
    pub async fn migrate(&self) -> Result<(), MigrateError> {
        sqlx::migrate!("./src/sqlite/migrations").run(&self.pool).await?;
        info!("🗃️ Migrations complete");
        Ok(())
    }
}

impl CatalogManagement for SqliteDatabase {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let mut conn = self.pool.acquire().await?;
        products::fetch_products(&mut conn).await
    }

    async fn fetch_product(&self, id: &ProductId) -> Result<Option<ProductWithColor>, CatalogError> {
        let mut conn = self.pool.acquire().await?;
        products::fetch_product(id, &mut conn).await
    }

    async fn insert_product(&self, product: NewProduct) -> Result<Product, CatalogError> {
        product.validate().map_err(CatalogError::InvalidProduct)?;
        let mut tx = self.pool.begin().await?;
        if let Some(cid) = &product.color_id {
            if !colors::color_exists(cid, &mut tx).await? {
                return Err(CatalogError::InvalidProduct(format!("Color {cid} does not exist")));
            }
        }
        let product = products::insert_product(product, &mut tx).await?;
        tx.commit().await?;
        Ok(product)
    }

    async fn fetch_colors(&self) -> Result<Vec<ColorOption>, CatalogError> {
        let mut conn = self.pool.acquire().await?;
        colors::fetch_colors(&mut conn).await
    }
}

impl ImageStorage for SqliteDatabase {
    async fn upload_image(&self, path: &str, content_type: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        validate_image_path(path)?;
        let mut tx = self.pool.begin().await?;
        if images::image_exists(path, &mut tx).await? {
            return Err(StorageError::AlreadyExists(path.to_string()));
        }
        images::insert_image(path, content_type, bytes, &mut tx).await?;
        tx.commit().await?;
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        public_image_url(&self.base_url, path)
    }

    async fn fetch_image(&self, path: &str) -> Result<Option<StoredImage>, StorageError> {
        let mut conn = self.pool.acquire().await?;
        images::fetch_image(path, &mut conn).await
    }
}

impl AccountManagement for SqliteDatabase {
    async fn create_account(&self, account: NewUserAccount) -> Result<UserAccount, AccountError> {
        account.validate().map_err(AccountError::InvalidAccount)?;
        let email = account.normalized_email();
        let hash = hash_password(&account.password)?;
        let mut tx = self.pool.begin().await?;
        if user_accounts::fetch_account(&email, &mut tx).await?.is_some() {
            return Err(AccountError::AccountExists(email));
        }
        let user = user_accounts::insert_account(&email, &hash, account.is_admin, &mut tx).await?;
        tx.commit().await?;
        Ok(user)
    }

    async fn verify_credentials(&self, email: &str, password: &Secret<String>) -> Result<UserAccount, AccountError> {
        let email = email.trim().to_lowercase();
        let mut conn = self.pool.acquire().await?;
        let Some(row) = user_accounts::fetch_account_with_hash(&email, &mut conn).await? else {
            trace!("🔐️ No account for {email}");
            return Err(AccountError::InvalidCredentials);
        };
        if verify_password(password, &row.password_hash)? {
            Ok(row.account)
        } else {
            debug!("🔐️ Wrong password for {email}");
            Err(AccountError::InvalidCredentials)
        }
    }

    async fn fetch_account(&self, email: &str) -> Result<Option<UserAccount>, AccountError> {
        let email = email.trim().to_lowercase();
        let mut conn = self.pool.acquire().await?;
        user_accounts::fetch_account(&email, &mut conn).await
    }
}
