use std::{cmp::Ordering, fmt::Display, str::FromStr};

use bobiare_common::Pesos;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db_types::{ConversionError, OrderId, OrderStatusType};

/// The Spanish badge text for an order status.
pub fn status_label(status: OrderStatusType) -> &'static str {
    match status {
        OrderStatusType::Pending => "Pendiente",
        OrderStatusType::Processing => "Procesando",
        OrderStatusType::Shipping => "Enviando",
        OrderStatusType::Delivered => "Entregado",
        OrderStatusType::Completed => "Completado",
        OrderStatusType::Cancelled => "Cancelado",
    }
}

//--------------------------------------      AdminOrder       ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOrder {
    pub id: OrderId,
    pub customer: String,
    pub email: String,
    pub product: String,
    pub date: NaiveDate,
    pub status: OrderStatusType,
    pub status_label: String,
    pub total: Pesos,
}

impl AdminOrder {
    /// Case-insensitive substring match against the order number (with its `#`), customer name or product.
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty() ||
            self.id.to_string().to_lowercase().contains(&query) ||
            self.customer.to_lowercase().contains(&query) ||
            self.product.to_lowercase().contains(&query)
    }
}

//--------------------------------------       Delivery        ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryKind {
    /// A treated piece goes back to the customer
    Scheduled,
    /// A piece is collected from the customer
    Pickup,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    /// `HH:MM`, 24h
    pub time: String,
    pub address: String,
    pub product: String,
    pub kind: DeliveryKind,
}

//--------------------------------------    AdminDashboard     ---------------------------------------------------------
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub total_orders: usize,
    /// Pending and processing orders
    pub pending_orders: usize,
    /// Sum of all orders that were not cancelled
    pub revenue: Pesos,
    pub customers: usize,
    pub recent_orders: Vec<AdminOrder>,
    pub upcoming_deliveries: Vec<Delivery>,
}

//--------------------------------------      Order sorting    ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSortField {
    Id,
    Customer,
    Email,
    Product,
    Date,
    Status,
    Total,
}

impl FromStr for OrderSortField {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(Self::Id),
            "customer" => Ok(Self::Customer),
            "email" => Ok(Self::Email),
            "product" => Ok(Self::Product),
            "date" => Ok(Self::Date),
            "status" => Ok(Self::Status),
            "total" => Ok(Self::Total),
            s => Err(ConversionError::new(format!("Orders cannot be sorted by {s}"))),
        }
    }
}

impl OrderSortField {
    /// Compares two orders on this field. Totals compare numerically, dates by calendar day and everything else as
    /// case-insensitive text.
    pub fn compare(&self, a: &AdminOrder, b: &AdminOrder) -> Ordering {
        let text = |x: &str, y: &str| x.to_lowercase().cmp(&y.to_lowercase());
        match self {
            OrderSortField::Total => a.total.cmp(&b.total),
            OrderSortField::Date => a.date.cmp(&b.date),
            OrderSortField::Id => text(a.id.as_str(), b.id.as_str()),
            OrderSortField::Customer => text(&a.customer, &b.customer),
            OrderSortField::Email => text(&a.email, &b.email),
            OrderSortField::Product => text(&a.product, &b.product),
            OrderSortField::Status => text(&a.status.to_string(), &b.status.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl FromStr for SortDirection {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            s => Err(ConversionError::new(format!("Invalid sort direction: {s}"))),
        }
    }
}

/// The column the orders table is sorted on. No field means the fixture order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SortState {
    pub field: Option<OrderSortField>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(field: OrderSortField, direction: SortDirection) -> Self {
        Self { field: Some(field), direction }
    }

    /// Choosing the current column again flips the direction. A new column starts ascending.
    pub fn toggle(&mut self, field: OrderSortField) {
        if self.field == Some(field) {
            self.direction = self.direction.flipped();
        } else {
            self.field = Some(field);
            self.direction = SortDirection::Asc;
        }
    }

    pub fn compare(&self, a: &AdminOrder, b: &AdminOrder) -> Ordering {
        match (self.field, self.direction) {
            (None, _) => Ordering::Equal,
            (Some(field), SortDirection::Asc) => field.compare(a, b),
            (Some(field), SortDirection::Desc) => field.compare(b, a),
        }
    }
}

/// Filters for the orders table. When both are given, an order must match the search and the status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderQuery {
    pub search: Option<String>,
    pub status: Option<OrderStatusType>,
    pub sort: SortState,
}

impl OrderQuery {
    pub fn with_search<S: Into<String>>(mut self, search: S) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_status(mut self, status: OrderStatusType) -> Self {
        self.status = Some(status);
        self
    }

    pub fn sorted_by(mut self, field: OrderSortField, direction: SortDirection) -> Self {
        self.sort = SortState::new(field, direction);
        self
    }

    pub fn matches(&self, order: &AdminOrder) -> bool {
        let search_ok = self.search.as_deref().map(|q| order.matches_search(q)).unwrap_or(true);
        let status_ok = self.status.map(|s| order.status == s).unwrap_or(true);
        search_ok && status_ok
    }
}

//--------------------------------------       Calendar        ---------------------------------------------------------
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    Day,
    #[default]
    Week,
    Month,
}

impl FromStr for CalendarView {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            s => Err(ConversionError::new(format!("Invalid calendar view: {s}"))),
        }
    }
}

impl Display for CalendarView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalendarView::Day => write!(f, "day"),
            CalendarView::Week => write!(f, "week"),
            CalendarView::Month => write!(f, "month"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day: u32,
    /// Abbreviated Spanish weekday, e.g. `mié`
    pub day_name: String,
    /// Deliveries on this date, earliest first. Month cells only carry a preview.
    pub deliveries: Vec<Delivery>,
    /// Deliveries left out of a month cell preview
    pub more: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Calendar {
    pub view: CalendarView,
    pub date: NaiveDate,
    pub title: String,
    /// For the month view, `None` cells pad the first week up to the first of the month.
    pub cells: Vec<Option<CalendarDay>>,
}
