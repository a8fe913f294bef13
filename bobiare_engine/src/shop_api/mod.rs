//! # Bobiare storefront API
//!
//! The `shop_api` module holds the storefront logic, independent of any HTTP framework.
//!
//! * [`catalog_api`] serves the product listing, product detail pages and the item configurator, and lets admins add
//!   products to the catalog.
//! * [`auth_api`] logs customers in and out of an [`auth_api::AuthSession`] and signs them up.
//! * [`checkout_flow`] walks a customer through the four checkout steps and turns their cart into an order.
//! * [`admin_api`] computes the back-office dashboard, the orders table and the delivery calendar.
//!
//! # API usage
//!
//! APIs that need a backend are created by supplying one that implements the backend traits they require:
//!
//! ```rust,ignore
//! use bobiare_engine::{catalog_objects::ProductFilter, CatalogApi, MemoryBackend};
//! // MemoryBackend implements CatalogManagement
//! let api = CatalogApi::new(MemoryBackend::new("http://localhost:8470"));
//! let listing = api.browse(&ProductFilter::default().with_category("Motos")).await;
//! ```
//!
//! Per-customer state (the cart, the auth session and the checkout progress) is owned by the caller and passed into
//! the API calls that need it.

pub mod admin_api;
pub mod admin_fixtures;
pub mod admin_objects;
pub mod auth_api;
pub mod catalog_api;
pub mod catalog_objects;
pub mod checkout_flow;
pub mod checkout_objects;
pub mod errors;
