mod business_days;
mod field_errors;
mod passwords;

pub use business_days::{
    add_business_days,
    estimated_delivery_date,
    format_long_date_es,
    is_weekend,
    month_name_es,
    weekday_name_es,
    CONFIRMATION_BUSINESS_DAYS,
};
pub use field_errors::{is_valid_email, FieldErrors};
pub use passwords::{hash_password, verify_password, PasswordHashError};
use rand::Rng;

use crate::db_types::OrderId;

/// A random six-digit order number. Uniqueness is not guaranteed, since orders are never stored.
pub fn new_order_id() -> OrderId {
    let n: u32 = rand::thread_rng().gen_range(100_000..=999_999);
    OrderId(n.to_string())
}

pub fn new_cart_item_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
