mod pesos;

pub mod helpers;
pub mod op;
mod secret;

pub use pesos::{Pesos, PesosConversionError, PESO_CURRENCY_CODE};
pub use secret::Secret;
