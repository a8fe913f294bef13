//! # Bobiare server
//! This crate hosts the HTTP server for the Bobiare storefront and its admin panel. It is responsible for:
//! Serving the product catalog and the product configurator.
//! Keeping a cart and a checkout in progress for every browser session.
//! Logging customers in and out, and registering new accounts.
//! Serving the admin dashboard, the orders table, the delivery calendar and the add-product form.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Sessions
//! Clients identify their session with the `x-bobiare-session` header. Requests without one get a new session, and
//! its id is returned in the same header.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/`, `/home`: Featured products and service shortcuts.
//! * `/productos`, `/productos/{id}`: The catalog and product details. `POST /productos/{id}` adds the configured
//!   product to the cart.
//! * `/carrito`, `/carrito/{item_id}`: The cart.
//! * `/checkout`, `/checkout/next`, `/checkout/back`, `/checkout/submit`: The four-step checkout.
//! * `/confirmacion/{order_id}`: The order confirmation.
//! * `/login`, `/logout`, `/register`: Authentication.
//! * `/admin`, `/admin/pedidos`, `/admin/calendario`, `/admin/addproduct`: The admin panel.
//! * `/imagenes/{bucket}/{path}`: Uploaded product images.

pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod helpers;
pub mod routes;
pub mod server;
pub mod sessions;

#[cfg(test)]
mod endpoint_tests;
