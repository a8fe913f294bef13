use thiserror::Error;

use crate::{helpers::FieldErrors, shop_api::checkout_objects::CheckoutStep};

#[derive(Debug, Clone, Error)]
pub enum AuthApiError {
    #[error("Correo o contraseña incorrectos")]
    LoginFailed,
    /// The reason is for the logs. Customers only ever see the generic message.
    #[error("Hubo un error al crear la cuenta")]
    SignUpFailed(String),
    #[error("Could not set up the admin account: {0}")]
    AdminSetupFailed(String),
}

#[derive(Debug, Clone, Error)]
pub enum CheckoutError {
    #[error("The cart is empty. There is nothing to check out.")]
    EmptyCart,
    #[error("The order can only be submitted from the payment step. The checkout is at step {0}.")]
    WrongStep(CheckoutStep),
    #[error("There is no step after {0}. Submit the order to finish the checkout.")]
    NoNextStep(CheckoutStep),
    #[error("Please correct the highlighted fields: {0}")]
    Validation(FieldErrors),
}
