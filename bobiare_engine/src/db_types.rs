use std::{fmt::Display, str::FromStr};

use bobiare_common::Pesos;
use chrono::{DateTime, NaiveDate, Utc};
use log::error;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

//--------------------------------------       ProductId       ---------------------------------------------------------
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

//--------------------------------------        ColorId        ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct ColorId(pub String);

impl ColorId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColorId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Display for ColorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

//--------------------------------------        Product        ---------------------------------------------------------
/// A service offered in the catalog. `price` is the base price for a single piece.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub description: String,
    /// Public URL of the product image. Empty when no image was uploaded.
    pub image: String,
    pub color_id: Option<ColorId>,
    pub time_estimate: Option<String>,
    pub price: Pesos,
}

/// A product together with its referenced color, if it has one and the color still exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductWithColor {
    #[serde(flatten)]
    pub product: Product,
    pub color: Option<ColorOption>,
}

//--------------------------------------       NewProduct      ---------------------------------------------------------
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub description: String,
    /// Set by the add-product flow once the image has been uploaded.
    #[serde(default)]
    pub image: String,
    pub color_id: Option<ColorId>,
    pub time_estimate: Option<String>,
    pub price: Pesos,
}

impl NewProduct {
    pub fn new<S: Into<String>>(name: S, category: S, price: Pesos) -> Self {
        Self { name: name.into(), category: category.into(), price, ..Default::default() }
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_color(mut self, color_id: ColorId) -> Self {
        self.color_id = Some(color_id);
        self
    }

    pub fn with_time_estimate<S: Into<String>>(mut self, estimate: S) -> Self {
        self.time_estimate = Some(estimate.into());
        self
    }

    pub fn with_image<S: Into<String>>(mut self, url: S) -> Self {
        self.image = url.into();
        self
    }

    /// Checks the fields the admin form marks as required. Color references are checked by the backend.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("The product name is required".into());
        }
        if self.category.trim().is_empty() {
            return Err("The product category is required".into());
        }
        if self.price < Pesos::zero() {
            return Err(format!("The price cannot be negative ({})", self.price));
        }
        Ok(())
    }
}

//--------------------------------------      ColorOption      ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorOption {
    pub id: ColorId,
    pub name: String,
    /// Swatch color, e.g. `#ff2800`
    pub color_code: String,
    /// Surcharge per piece
    pub price: Pesos,
}

//--------------------------------------    DeliveryOption     ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryOption {
    pub id: u8,
    /// Turnaround in business days
    pub days: u32,
    /// Surcharge per piece
    pub price: Pesos,
    pub description: String,
}

//--------------------------------------        CartItem       ---------------------------------------------------------
/// One configured service in the cart. This is also the on-disk format of the stored cart, so the field names follow
/// the storefront's camelCase JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub product_id: ProductId,
    pub quantity: u32,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub color: Option<ColorOption>,
    pub delivery_option: DeliveryOption,
    pub pickup_location: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub total_price: Pesos,
}

impl CartItem {
    pub fn color_id(&self) -> Option<&ColorId> {
        self.color.as_ref().map(|c| &c.id)
    }

    /// Two items describe the same configuration when product, model and color all agree.
    pub fn same_configuration(&self, other: &CartItem) -> bool {
        self.product_id == other.product_id && self.model == other.model && self.color_id() == other.color_id()
    }
}

/// A partial update for a [`CartItem`]. Fields that are `None` are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemPatch {
    pub quantity: Option<u32>,
    pub model: Option<String>,
    pub color: Option<ColorOption>,
    pub delivery_option: Option<DeliveryOption>,
    pub pickup_location: Option<String>,
    pub notes: Option<String>,
    pub total_price: Option<Pesos>,
}

impl CartItemPatch {
    pub fn quantity_and_total(quantity: u32, total_price: Pesos) -> Self {
        Self { quantity: Some(quantity), total_price: Some(total_price), ..Default::default() }
    }

    pub fn apply_to(self, item: &mut CartItem) {
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
        if let Some(model) = self.model {
            item.model = Some(model);
        }
        if let Some(color) = self.color {
            item.color = Some(color);
        }
        if let Some(delivery) = self.delivery_option {
            item.delivery_option = delivery;
        }
        if let Some(location) = self.pickup_location {
            item.pickup_location = location;
        }
        if let Some(notes) = self.notes {
            item.notes = Some(notes);
        }
        if let Some(total) = self.total_price {
            item.total_price = total;
        }
    }
}

//--------------------------------------   OrderStatusType     ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatusType {
    /// The order has been placed, but work has not started.
    Pending,
    /// The piece has been picked up and is being treated.
    Processing,
    /// The treated piece is on its way back to the customer.
    Shipping,
    /// The piece was handed back to the customer.
    Delivered,
    /// The order is closed.
    Completed,
    /// The order was cancelled by the customer or an admin.
    Cancelled,
}

impl Display for OrderStatusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatusType::Pending => write!(f, "pending"),
            OrderStatusType::Processing => write!(f, "processing"),
            OrderStatusType::Shipping => write!(f, "shipping"),
            OrderStatusType::Delivered => write!(f, "delivered"),
            OrderStatusType::Completed => write!(f, "completed"),
            OrderStatusType::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl From<String> for OrderStatusType {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid order status: {value}. But this conversion cannot fail. Defaulting to pending");
            OrderStatusType::Pending
        })
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid conversion: {0}")]
pub struct ConversionError(String);

impl ConversionError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self(message.into())
    }
}

impl FromStr for OrderStatusType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "shipping" => Ok(Self::Shipping),
            "delivered" => Ok(Self::Delivered),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            s => Err(ConversionError(format!("Invalid order status: {s}"))),
        }
    }
}

//--------------------------------------     PaymentStatus     ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Paid => write!(f, "paid"),
            PaymentStatus::Failed => write!(f, "failed"),
        }
    }
}

//--------------------------------------        OrderId        ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl FromStr for OrderId {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_start_matches('#');
        if s.is_empty() {
            return Err(ConversionError("An order id cannot be empty".into()));
        }
        Ok(Self(s.to_string()))
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl OrderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------        Address        ---------------------------------------------------------
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

//--------------------------------------         Order         ---------------------------------------------------------
/// An order as produced by the checkout. Orders are not persisted anywhere; they only live in the checkout receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    /// The email of the logged-in customer, if any
    pub user_id: Option<String>,
    pub items: Vec<CartItem>,
    pub status: OrderStatusType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub delivery_date: NaiveDate,
    pub total_amount: Pesos,
    pub payment_status: PaymentStatus,
    pub shipping_address: Address,
}

//--------------------------------------      UserAccount      ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: i64,
    pub email: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------      StoredImage      ---------------------------------------------------------
/// A file held by the image storage, addressed by its path inside the bucket.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct StoredImage {
    pub path: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}
