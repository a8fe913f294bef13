//! # Backend contracts
//!
//! The storefront delegates three concerns to a backend service. This module defines the traits a backend must
//! implement to be usable by the engine APIs.
//!
//! * [`CatalogManagement`] reads and writes products, and lists the available colors.
//! * [`ImageStorage`] is an object store for product images, addressed by path, with public URLs.
//! * [`AccountManagement`] creates customer accounts and checks their credentials.
//!
//! Two backends ship with the engine: [`crate::MemoryBackend`], seeded with the fixed catalog, and
//! `SqliteDatabase` (behind the `sqlite` feature).
mod account_management;
mod catalog_management;
mod data_objects;
mod image_storage;

pub use account_management::{AccountError, AccountManagement};
pub use catalog_management::{CatalogError, CatalogManagement};
pub use data_objects::{NewUserAccount, UploadedImage};
pub use image_storage::{public_image_url, validate_image_path, ImageStorage, StorageError, IMAGE_BUCKET};
