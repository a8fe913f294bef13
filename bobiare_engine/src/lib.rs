//! Bobiare Engine
//!
//! The Bobiare Engine holds the business logic of the Bobiare storefront: a catalog of sandblasting, painting and
//! metal finishing services that customers configure, add to a cart and check out. It knows nothing about HTTP.
//!
//! The library is divided into these main sections:
//! 1. The backend traits ([`mod@traits`]). Catalog data, uploaded images and user accounts live behind
//!    [`CatalogManagement`], [`ImageStorage`] and [`AccountManagement`]. Two backends are provided:
//!    [`MemoryBackend`], which serves the launch catalog from memory, and `SqliteDatabase`.
//! 2. The shopping cart ([`mod@cart`]), which persists its items to a [`cart::KeyValueStore`].
//! 3. The storefront public API ([`mod@shop_api`]): catalog browsing, authentication, checkout and the admin pages.
//!
//! The data types shared by all of these are defined in the [`mod@db_types`] module.
pub mod cart;
pub mod db_types;
pub mod fixtures;
pub mod helpers;
mod memory_backend;
pub mod shop_api;
pub mod traits;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use cart::{CartError, CartProvider, FileStore, KeyValueStore, MemoryStore};
pub use memory_backend::MemoryBackend;
pub use shop_api::{
    admin_api::AdminApi,
    admin_objects,
    auth_api::{AuthApi, AuthSession, LoginMode, SimulatedAuthenticator},
    catalog_api::CatalogApi,
    catalog_objects,
    checkout_flow::CheckoutFlow,
    checkout_objects,
    errors::{AuthApiError, CheckoutError},
};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
pub use traits::{AccountManagement, CatalogError, CatalogManagement, ImageStorage, StorageError};
