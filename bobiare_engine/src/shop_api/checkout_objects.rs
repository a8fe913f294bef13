use std::fmt::Display;

use bobiare_common::Pesos;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    db_types::{CartItem, Order, OrderId},
    helpers::{estimated_delivery_date, format_long_date_es, is_valid_email, FieldErrors},
};

//--------------------------------------     CheckoutStep      ---------------------------------------------------------
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStep {
    #[default]
    Information,
    Shipping,
    Payment,
    Confirmation,
}

impl CheckoutStep {
    /// 1-based, as shown in the progress bar
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::Information => 1,
            CheckoutStep::Shipping => 2,
            CheckoutStep::Payment => 3,
            CheckoutStep::Confirmation => 4,
        }
    }

    pub fn next(&self) -> Option<CheckoutStep> {
        match self {
            CheckoutStep::Information => Some(CheckoutStep::Shipping),
            CheckoutStep::Shipping => Some(CheckoutStep::Payment),
            CheckoutStep::Payment => Some(CheckoutStep::Confirmation),
            CheckoutStep::Confirmation => None,
        }
    }

    /// The step before this one. The first step has no predecessor, so it stays put.
    pub fn previous(&self) -> CheckoutStep {
        match self {
            CheckoutStep::Information | CheckoutStep::Shipping => CheckoutStep::Information,
            CheckoutStep::Payment => CheckoutStep::Shipping,
            CheckoutStep::Confirmation => CheckoutStep::Payment,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CheckoutStep::Information => "Información Personal",
            CheckoutStep::Shipping => "Dirección de Envío",
            CheckoutStep::Payment => "Información de Pago",
            CheckoutStep::Confirmation => "Confirmación",
        }
    }
}

impl Display for CheckoutStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.number(), self.title())
    }
}

//--------------------------------------     CheckoutForm      ---------------------------------------------------------
/// Everything typed into the checkout form so far. Card details are never echoed back in responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub card_name: String,
    #[serde(skip_serializing)]
    pub card_number: String,
    pub exp_month: String,
    pub exp_year: String,
    #[serde(skip_serializing)]
    pub cvv: String,
}

/// A partial update of the checkout form. Missing fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutFormPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub card_name: Option<String>,
    pub card_number: Option<String>,
    pub exp_month: Option<String>,
    pub exp_year: Option<String>,
    pub cvv: Option<String>,
}

impl CheckoutForm {
    /// Copies the fields present in `patch` into the form. Returns the (camelCase) names of the fields whose value
    /// actually changed.
    pub fn merge(&mut self, patch: CheckoutFormPatch) -> Vec<&'static str> {
        let mut changed = Vec::new();
        let mut set = |name: &'static str, target: &mut String, value: Option<String>| {
            if let Some(value) = value {
                if *target != value {
                    *target = value;
                    changed.push(name);
                }
            }
        };
        set("firstName", &mut self.first_name, patch.first_name);
        set("lastName", &mut self.last_name, patch.last_name);
        set("email", &mut self.email, patch.email);
        set("phone", &mut self.phone, patch.phone);
        set("address", &mut self.address, patch.address);
        set("city", &mut self.city, patch.city);
        set("state", &mut self.state, patch.state);
        set("postalCode", &mut self.postal_code, patch.postal_code);
        set("cardName", &mut self.card_name, patch.card_name);
        set("cardNumber", &mut self.card_number, patch.card_number);
        set("expMonth", &mut self.exp_month, patch.exp_month);
        set("expYear", &mut self.exp_year, patch.exp_year);
        set("cvv", &mut self.cvv, patch.cvv);
        changed
    }

    /// Validates the fields that belong to `step`. The confirmation step has no fields.
    pub fn validate(&self, step: CheckoutStep) -> FieldErrors {
        let mut errors = FieldErrors::new();
        match step {
            CheckoutStep::Information => {
                errors.require("firstName", &self.first_name, "El nombre es requerido");
                errors.require("lastName", &self.last_name, "El apellido es requerido");
                if errors.require("email", &self.email, "El email es requerido") && !is_valid_email(&self.email) {
                    errors.insert("email", "El email es inválido");
                }
                errors.require("phone", &self.phone, "El teléfono es requerido");
            },
            CheckoutStep::Shipping => {
                errors.require("address", &self.address, "La dirección es requerida");
                errors.require("city", &self.city, "La ciudad es requerida");
                errors.require("state", &self.state, "La provincia es requerida");
                errors.require("postalCode", &self.postal_code, "El código postal es requerido");
            },
            CheckoutStep::Payment => {
                errors.require("cardName", &self.card_name, "El nombre en la tarjeta es requerido");
                if errors.require("cardNumber", &self.card_number, "El número de tarjeta es requerido") {
                    let digits = self.card_number.chars().filter(|c| !c.is_whitespace()).collect::<String>();
                    if digits.len() != 16 || !digits.chars().all(|c| c.is_ascii_digit()) {
                        errors.insert("cardNumber", "El número de tarjeta debe tener 16 dígitos");
                    }
                }
                errors.require("expMonth", &self.exp_month, "El mes de expiración es requerido");
                errors.require("expYear", &self.exp_year, "El año de expiración es requerido");
                if errors.require("cvv", &self.cvv, "El código de seguridad es requerido") &&
                    self.cvv.chars().count() != 3
                {
                    errors.insert("cvv", "El código debe tener 3 dígitos");
                }
            },
            CheckoutStep::Confirmation => {},
        }
        errors
    }
}

//--------------------------------------    CheckoutSummary    ---------------------------------------------------------
/// The checkout page: where the customer is, what they have typed, and what they are buying.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub step: u8,
    pub step_title: String,
    pub form: CheckoutForm,
    pub errors: FieldErrors,
    pub items: Vec<CartItem>,
    pub total_price: Pesos,
}

//--------------------------------------    CheckoutReceipt    ---------------------------------------------------------
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    pub order: Order,
    /// Where the storefront should go next, e.g. `/confirmacion/482913`
    pub confirmation_route: String,
}

//--------------------------------------   OrderConfirmation   ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    pub estimated_delivery_date: NaiveDate,
    /// e.g. `30 de octubre de 2026`
    pub estimated_delivery: String,
    pub message: String,
}

impl OrderConfirmation {
    /// The confirmation page for `order_id`, with a delivery estimate counted from `today`.
    pub fn new(order_id: OrderId, today: NaiveDate) -> Self {
        let date = estimated_delivery_date(today);
        let message = format!("Tu pedido {order_id} ha sido recibido y está siendo procesado.");
        Self { order_id, estimated_delivery_date: date, estimated_delivery: format_long_date_es(date), message }
    }
}
