//! `MemoryBackend` keeps the catalog, uploaded images and accounts in process memory.
//!
//! It starts from the launch catalog in [`crate::fixtures`] and forgets everything on restart. The server uses it
//! when no database is configured.
use std::{collections::HashMap, fmt::Debug, sync::Arc};

use bobiare_common::Secret;
use chrono::Utc;
use log::*;
use tokio::sync::RwLock;

use crate::{
    db_types::{ColorOption, NewProduct, Product, ProductId, ProductWithColor, StoredImage, UserAccount},
    fixtures::{seed_colors, seed_products},
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

#[derive(Default)]
struct MemoryState {
    products: Vec<Product>,
    colors: Vec<ColorOption>,
    images: HashMap<String, StoredImage>,
    accounts: Vec<(UserAccount, String)>,
}

#[derive(Clone)]
pub struct MemoryBackend {
    state: Arc<RwLock<MemoryState>>,
    base_url: String,
}

impl Debug for MemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MemoryBackend ({})", self.base_url)
    }
}

impl MemoryBackend {
    /// A backend holding the launch catalog. `base_url` is used to build public image URLs.
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        let state = MemoryState { products: seed_products(), colors: seed_colors(), ..Default::default() };
        Self { state: Arc::new(RwLock::new(state)), base_url: base_url.into() }
    }

    /// A backend with no products, colors or accounts.
    pub fn empty<S: Into<String>>(base_url: S) -> Self {
        Self { state: Arc::new(RwLock::new(MemoryState::default())), base_url: base_url.into() }
    }
}

impl CatalogManagement for MemoryBackend {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.state.read().await.products.clone())
    }

    async fn fetch_product(&self, id: &ProductId) -> Result<Option<ProductWithColor>, CatalogError> {
        let state = self.state.read().await;
        let result = state.products.iter().find(|p| &p.id == id).map(|product| {
            let color = product.color_id.as_ref().and_then(|cid| state.colors.iter().find(|c| &c.id == cid)).cloned();
            ProductWithColor { product: product.clone(), color }
        });
        Ok(result)
    }

    async fn insert_product(&self, product: NewProduct) -> Result<Product, CatalogError> {
        product.validate().map_err(CatalogError::InvalidProduct)?;
        let mut state = self.state.write().await;
        if let Some(cid) = &product.color_id {
            if !state.colors.iter().any(|c| &c.id == cid) {
                return Err(CatalogError::InvalidProduct(format!("Color {cid} does not exist")));
            }
        }
        let next_id = state.products.iter().filter_map(|p| p.id.as_str().parse::<i64>().ok()).max().unwrap_or(0) + 1;
        let NewProduct { name, category, description, image, color_id, time_estimate, price } = product;
        let product =
            Product { id: next_id.to_string().into(), name, category, description, image, color_id, time_estimate, price };
        state.products.push(product.clone());
        debug!("🗃️ Product {} ({}) added to the in-memory catalog", product.id, product.name);
        Ok(product)
    }

    async fn fetch_colors(&self) -> Result<Vec<ColorOption>, CatalogError> {
        Ok(self.state.read().await.colors.clone())
    }
}

impl ImageStorage for MemoryBackend {
    async fn upload_image(&self, path: &str, content_type: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        validate_image_path(path)?;
        let mut state = self.state.write().await;
        if state.images.contains_key(path) {
            return Err(StorageError::AlreadyExists(path.to_string()));
        }
        let image = StoredImage { path: path.to_string(), content_type: content_type.to_string(), bytes };
        debug!("🗃️ Stored image {path} ({} bytes)", image.bytes.len());
        state.images.insert(path.to_string(), image);
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        public_image_url(&self.base_url, path)
    }

    async fn fetch_image(&self, path: &str) -> Result<Option<StoredImage>, StorageError> {
        Ok(self.state.read().await.images.get(path).cloned())
    }
}

impl AccountManagement for MemoryBackend {
    async fn create_account(&self, account: NewUserAccount) -> Result<UserAccount, AccountError> {
        account.validate().map_err(AccountError::InvalidAccount)?;
        let email = account.normalized_email();
        let hash = hash_password(&account.password)?;
        let mut state = self.state.write().await;
        if state.accounts.iter().any(|(a, _)| a.email == email) {
            return Err(AccountError::AccountExists(email));
        }
        let id = state.accounts.len() as i64 + 1;
        let user = UserAccount { id, email, is_admin: account.is_admin, created_at: Utc::now() };
        state.accounts.push((user.clone(), hash));
        debug!("🔐️ Created account #{id} for {}", user.email);
        Ok(user)
    }

    async fn verify_credentials(&self, email: &str, password: &Secret<String>) -> Result<UserAccount, AccountError> {
        let email = email.trim().to_lowercase();
        let found = self.state.read().await.accounts.iter().find(|(a, _)| a.email == email).cloned();
        let Some((user, hash)) = found else {
            trace!("🔐️ No account for {email}");
            return Err(AccountError::InvalidCredentials);
        };
        if verify_password(password, &hash)? {
            Ok(user)
        } else {
            Err(AccountError::InvalidCredentials)
        }
    }

    async fn fetch_account(&self, email: &str) -> Result<Option<UserAccount>, AccountError> {
        let email = email.trim().to_lowercase();
        let state = self.state.read().await;
        Ok(state.accounts.iter().find(|(a, _)| a.email == email).map(|(a, _)| a.clone()))
    }
}
