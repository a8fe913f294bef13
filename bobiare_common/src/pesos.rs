use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Mul},
};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

use crate::op;

pub const PESO_CURRENCY_CODE: &str = "ARS";

//--------------------------------------        Pesos         ---------------------------------------------------------
/// A whole-peso amount. Catalog prices and surcharges have no fractional part, so an integer is all we need.
#[derive(Debug, Clone, Copy, Default, Type, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct Pesos(i64);

op!(binary Pesos, Add, add);
op!(binary Pesos, Sub, sub);
op!(inplace Pesos, AddAssign, add_assign);
op!(inplace Pesos, SubAssign, sub_assign);
op!(unary Pesos, Neg, neg);

impl Mul<u32> for Pesos {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        Self::from(self.value() * i64::from(rhs))
    }
}

impl Sum for Pesos {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented in pesos: {0}")]
pub struct PesosConversionError(String);

impl From<i64> for Pesos {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl TryFrom<u64> for Pesos {
    type Error = PesosConversionError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        i64::try_from(value)
            .map(Self)
            .map_err(|_| PesosConversionError(format!("Value {value} is too large to convert to Pesos")))
    }
}

/// Formats the amount the way the storefront shows prices (es-AR grouping), e.g. `$258.450`.
impl Display for Pesos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{sign}${grouped}")
    }
}

impl Pesos {
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn zero() -> Self {
        Self(0)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}
