//! # Shopping cart
//!
//! A [`CartProvider`] owns the items of one customer's cart. Every mutation writes the full item list, as JSON, to
//! its [`KeyValueStore`] under the [`CART_STORAGE_KEY`] key. The cart is loaded from the store once, at construction.
//!
//! Adding an item whose product, model and color match an existing line merges the two: quantities and totals are
//! summed, and the existing line keeps everything else (delivery option, pickup location, notes). A line never holds
//! more than [`MAX_ITEM_QUANTITY`] units; a merge that would exceed it is rejected and leaves the cart untouched.
//!
//! Storage problems never take the cart down. Unreadable data is discarded with a warning, and failed writes are
//! logged while the in-memory cart keeps the change.
use bobiare_common::Pesos;
use log::*;
use thiserror::Error;

use crate::{
    db_types::{CartItem, CartItemPatch, ColorId, ProductId},
    helpers::FieldErrors,
    traits::CatalogError,
};

pub mod pricing;
pub mod storage;

pub use storage::{FileStore, KeyValueStore, KeyValueStoreError, MemoryStore};

pub const CART_STORAGE_KEY: &str = "cart";
/// The most units a single cart line may hold.
pub const MAX_ITEM_QUANTITY: u32 = 9_999;

#[derive(Debug, Clone, Error)]
pub enum CartError {
    #[error("Quantity must be at least 1, got {0}")]
    InvalidQuantity(u32),
    #[error("Quantity cannot exceed {MAX_ITEM_QUANTITY}, got {0}")]
    QuantityTooLarge(u64),
    #[error("Cart item {0} not found")]
    ItemNotFound(String),
    #[error("Product {0} not found")]
    ProductNotFound(ProductId),
    #[error("Color {0} does not exist")]
    ColorNotFound(ColorId),
    #[error("Delivery option {0} does not exist")]
    DeliveryOptionNotFound(u8),
    #[error("Invalid item: {0}")]
    Validation(FieldErrors),
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

pub struct CartProvider<S: KeyValueStore> {
    items: Vec<CartItem>,
    store: S,
}

impl<S: KeyValueStore> CartProvider<S> {
    pub fn new(store: S) -> Self {
        let items = load_items(&store);
        Self { items, store }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn item(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn add_item(&mut self, item: CartItem) -> Result<(), CartError> {
        match self.items.iter_mut().find(|existing| existing.same_configuration(&item)) {
            Some(existing) => {
                existing.quantity = merged_quantity(existing.quantity, item.quantity)?;
                existing.total_price += item.total_price;
                debug!("🛒️ Merged {} x product {} into cart item {}", item.quantity, item.product_id, existing.id);
            },
            None => {
                check_quantity(item.quantity)?;
                debug!("🛒️ Added cart item {} ({} x product {})", item.id, item.quantity, item.product_id);
                self.items.push(item);
            },
        }
        self.persist();
        Ok(())
    }

    /// Removes the item with the given id. Unknown ids are ignored.
    pub fn remove_item(&mut self, id: &str) {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        if self.items.len() == before {
            trace!("🛒️ Cart item {id} is not in the cart. Nothing to remove");
            return;
        }
        debug!("🛒️ Removed cart item {id}");
        self.persist();
    }

    /// Merges the fields present in `patch` into the item with the given id. The total price is taken from the patch
    /// as is, so callers changing the quantity should reprice first (see [`pricing::reprice`]). Unknown ids are
    /// ignored.
    pub fn update_item(&mut self, id: &str, patch: CartItemPatch) {
        match self.items.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                patch.apply_to(item);
                debug!("🛒️ Updated cart item {id}");
            },
            None => {
                trace!("🛒️ Cart item {id} is not in the cart. Nothing to update");
                return;
            },
        }
        self.persist();
    }

    pub fn clear_cart(&mut self) {
        self.items.clear();
        debug!("🛒️ Cart cleared");
        self.persist();
    }

    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    pub fn total_price(&self) -> Pesos {
        self.items.iter().map(|i| i.total_price).sum()
    }

    fn persist(&mut self) {
        let json = match serde_json::to_string(&self.items) {
            Ok(json) => json,
            Err(e) => {
                error!("🛒️ Could not serialize the cart: {e}");
                return;
            },
        };
        if let Err(e) = self.store.set_item(CART_STORAGE_KEY, &json) {
            error!("🛒️ Could not save the cart. The change is kept in memory only. {e}");
        }
    }
}

/// Rejects quantities outside `1..=MAX_ITEM_QUANTITY`.
pub fn check_quantity(quantity: u32) -> Result<(), CartError> {
    match quantity {
        0 => Err(CartError::InvalidQuantity(0)),
        q if q > MAX_ITEM_QUANTITY => Err(CartError::QuantityTooLarge(u64::from(q))),
        _ => Ok(()),
    }
}

fn merged_quantity(current: u32, added: u32) -> Result<u32, CartError> {
    let merged = u64::from(current) + u64::from(added);
    match u32::try_from(merged) {
        Ok(q) if q <= MAX_ITEM_QUANTITY => Ok(q),
        _ => {
            warn!("🛒️ Refusing to merge {added} units into a line of {current}. The limit is {MAX_ITEM_QUANTITY}");
            Err(CartError::QuantityTooLarge(merged))
        },
    }
}

fn load_items<S: KeyValueStore>(store: &S) -> Vec<CartItem> {
    let stored = match store.get_item(CART_STORAGE_KEY) {
        Ok(Some(s)) => s,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!("🛒️ Could not read the stored cart. Starting with an empty cart. {e}");
            return Vec::new();
        },
    };
    match serde_json::from_str::<Vec<CartItem>>(&stored) {
        Ok(items) => {
            trace!("🛒️ Loaded {} items from storage", items.len());
            items
        },
        Err(e) => {
            warn!("🛒️ The stored cart is corrupt and will be discarded. {e}");
            Vec::new()
        },
    }
}
