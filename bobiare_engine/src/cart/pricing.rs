//! Line-item pricing.
//!
//! A line costs `(base price + color surcharge + delivery surcharge) × quantity`. Surcharges are per piece, and the
//! quantity must lie in `1..=MAX_ITEM_QUANTITY`.
//!
//! Totals are computed once, when an item is configured or its quantity changes. Nothing re-derives them later, so
//! an item added before a catalog price change keeps its old total.
use bobiare_common::Pesos;

use super::{check_quantity, CartError};
use crate::db_types::{CartItem, CartItemPatch, ColorOption, DeliveryOption, Product};

/// The fixed list of turnaround options, fastest last.
pub fn delivery_options() -> Vec<DeliveryOption> {
    [(1, 10, 0, "Estándar"), (2, 7, 3000, "Rápido"), (3, 5, 5000, "Express"), (4, 3, 8000, "Urgente")]
        .into_iter()
        .map(|(id, days, price, name)| DeliveryOption {
            id,
            days,
            price: Pesos::from(price),
            description: format!("{name} ({days} días hábiles)"),
        })
        .collect()
}

pub fn delivery_option(id: u8) -> Option<DeliveryOption> {
    delivery_options().into_iter().find(|o| o.id == id)
}

pub fn line_total(
    base: Pesos,
    color: Option<&ColorOption>,
    delivery: &DeliveryOption,
    quantity: u32,
) -> Result<Pesos, CartError> {
    check_quantity(quantity)?;
    let color_surcharge = color.map(|c| c.price).unwrap_or_default();
    Ok((base + color_surcharge + delivery.price) * quantity)
}

/// Builds the patch that sets a new quantity on `item` and recomputes its total from the product's current base
/// price and the item's chosen color and delivery option.
pub fn reprice(item: &CartItem, product: &Product, quantity: u32) -> Result<CartItemPatch, CartError> {
    let total = line_total(product.price, item.color.as_ref(), &item.delivery_option, quantity)?;
    Ok(CartItemPatch::quantity_and_total(quantity, total))
}
