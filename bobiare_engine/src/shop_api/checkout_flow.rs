use chrono::{DateTime, Utc};
use log::*;
use serde::Serialize;

use crate::{
    cart::{CartProvider, KeyValueStore},
    db_types::{Address, Order, OrderStatusType, PaymentStatus},
    helpers::{estimated_delivery_date, new_order_id, FieldErrors},
    shop_api::{
        checkout_objects::{CheckoutForm, CheckoutFormPatch, CheckoutReceipt, CheckoutStep, CheckoutSummary},
        errors::CheckoutError,
    },
};

pub const SHIPPING_COUNTRY: &str = "Argentina";

/// One customer's progress through the checkout.
///
/// The flow moves forward one step at a time, and only when the fields of the current step are valid. Moving back
/// never re-validates. Placing the order (from the payment step) clears the cart and parks the flow on the
/// confirmation step until a new checkout is opened.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutFlow {
    step: CheckoutStep,
    form: CheckoutForm,
    errors: FieldErrors,
    order: Option<Order>,
}

impl CheckoutFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn form(&self) -> &CheckoutForm {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// The order placed by this checkout, once it has been submitted
    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.step == CheckoutStep::Confirmation
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns the checkout page for the given cart.
    ///
    /// A checkout that already placed an order starts over when the customer comes back with a new cart.
    pub fn open<S: KeyValueStore>(&mut self, cart: &CartProvider<S>) -> Result<CheckoutSummary, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        if self.is_complete() {
            debug!("🛒️ Previous checkout was completed. Starting a new one");
            self.reset();
        }
        Ok(CheckoutSummary {
            step: self.step.number(),
            step_title: self.step.title().to_string(),
            form: self.form.clone(),
            errors: self.errors.clone(),
            items: cart.items().to_vec(),
            total_price: cart.total_price(),
        })
    }

    /// Merges the given fields into the form. Fields that changed lose their validation error.
    pub fn update_fields(&mut self, patch: CheckoutFormPatch) {
        for field in self.form.merge(patch) {
            self.errors.remove(field);
        }
    }

    /// Validates the current step without moving.
    pub fn validate_step(&mut self) -> Result<(), CheckoutError> {
        self.errors = self.form.validate(self.step);
        if self.errors.is_empty() {
            Ok(())
        } else {
            trace!("🛒️ Checkout step {} has errors: {}", self.step, self.errors);
            Err(CheckoutError::Validation(self.errors.clone()))
        }
    }

    /// Validates the current step and, if it is valid, advances one step. The payment step is left with
    /// [`Self::submit`] instead.
    pub fn next(&mut self) -> Result<CheckoutStep, CheckoutError> {
        match self.step {
            CheckoutStep::Information | CheckoutStep::Shipping => {},
            step => return Err(CheckoutError::NoNextStep(step)),
        }
        self.validate_step()?;
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        debug!("🛒️ Checkout advanced to step {}", self.step);
        Ok(self.step)
    }

    /// Goes back one step without validating. Step 1 stays on step 1, and a placed order cannot be walked back.
    pub fn back(&mut self) -> CheckoutStep {
        if !self.is_complete() {
            self.step = self.step.previous();
        }
        self.step
    }

    /// Places the order.
    ///
    /// The payment fields are validated, then an order is built from the cart contents and the form, the cart is
    /// emptied and the flow moves to the confirmation step. No payment is taken.
    pub fn submit<S: KeyValueStore>(
        &mut self,
        cart: &mut CartProvider<S>,
        user: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        if self.step != CheckoutStep::Payment {
            return Err(CheckoutError::WrongStep(self.step));
        }
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        self.validate_step()?;
        let order = Order {
            id: new_order_id(),
            user_id: user.map(String::from),
            items: cart.items().to_vec(),
            status: OrderStatusType::Pending,
            created_at: now,
            updated_at: now,
            delivery_date: estimated_delivery_date(now.date_naive()),
            total_amount: cart.total_price(),
            payment_status: PaymentStatus::Pending,
            shipping_address: Address {
                street: self.form.address.clone(),
                city: self.form.city.clone(),
                state: self.form.state.clone(),
                postal_code: self.form.postal_code.clone(),
                country: SHIPPING_COUNTRY.to_string(),
            },
        };
        info!(
            "🛒️ Order {} placed: {} items for {} (customer: {})",
            order.id,
            cart.total_items(),
            order.total_amount,
            user.unwrap_or("guest")
        );
        cart.clear_cart();
        self.step = CheckoutStep::Confirmation;
        self.order = Some(order.clone());
        let confirmation_route = format!("/confirmacion/{}", order.id.as_str());
        Ok(CheckoutReceipt { order, confirmation_route })
    }
}
