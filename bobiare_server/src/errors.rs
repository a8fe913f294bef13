use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use bobiare_engine::{
    cart::MAX_ITEM_QUANTITY,
    catalog_objects::ALL_PRODUCTS_LINK,
    helpers::FieldErrors,
    traits::StorageError,
    AuthApiError,
    CartError,
    CatalogError,
    CheckoutError,
};
use log::error;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("Could not read request path: {0}")]
    InvalidRequestPath(String),
    #[error("Invalid query string: {0}")]
    InvalidQuery(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("{0}")]
    LoginFailed(String),
    #[error("{0}")]
    SignUpFailed(String),
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
    #[error("Producto no encontrado")]
    ProductNotFound(String),
    #[error("El carrito está vacío")]
    EmptyCart,
    #[error("{0}")]
    CheckoutConflict(String),
    #[error("{message}")]
    ValidationError { message: String, fields: FieldErrors },
}

impl ServerError {
    pub fn validation<S: Into<String>>(message: S, fields: FieldErrors) -> Self {
        Self::ValidationError { message: message.into(), fields }
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::InvalidRequestPath(_) => StatusCode::BAD_REQUEST,
            Self::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Self::SignUpFailed(_) => StatusCode::BAD_REQUEST,
            Self::LoginFailed(_) => StatusCode::UNAUTHORIZED,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::ProductNotFound(_) => StatusCode::NOT_FOUND,
            Self::EmptyCart => StatusCode::CONFLICT,
            Self::CheckoutConflict(_) => StatusCode::CONFLICT,
            Self::ValidationError { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            Self::ValidationError { message, fields } => json!({ "error": message, "fields": fields }),
            Self::ProductNotFound(id) => json!({ "error": self.to_string(), "productId": id, "link": ALL_PRODUCTS_LINK }),
            Self::EmptyCart => json!({ "error": self.to_string(), "link": ALL_PRODUCTS_LINK }),
            _ => json!({ "error": self.to_string() }),
        };
        if self.status_code().is_server_error() {
            error!("💻️ {self}");
        }
        HttpResponse::build(self.status_code()).insert_header(ContentType::json()).body(body.to_string())
    }
}

impl From<AuthApiError> for ServerError {
    fn from(e: AuthApiError) -> Self {
        match e {
            AuthApiError::LoginFailed => Self::LoginFailed(e.to_string()),
            AuthApiError::SignUpFailed(_) => Self::SignUpFailed(e.to_string()),
            AuthApiError::AdminSetupFailed(_) => Self::InitializeError(e.to_string()),
        }
    }
}

impl From<CatalogError> for ServerError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::DatabaseError(s) => Self::BackendError(s),
            CatalogError::ProductNotFound(id) => Self::ProductNotFound(id.to_string()),
            CatalogError::InvalidProduct(s) => Self::validation(s, FieldErrors::new()),
            CatalogError::ImageUploadFailed(s) => Self::BackendError(format!("Image upload failed. {s}")),
        }
    }
}

impl From<StorageError> for ServerError {
    fn from(e: StorageError) -> Self {
        Self::BackendError(e.to_string())
    }
}

impl From<CartError> for ServerError {
    fn from(e: CartError) -> Self {
        match e {
            CartError::InvalidQuantity(_) => {
                let mut fields = FieldErrors::new();
                fields.insert("quantity", "La cantidad debe ser al menos 1");
                Self::validation(e.to_string(), fields)
            },
            CartError::QuantityTooLarge(_) => {
                let mut fields = FieldErrors::new();
                fields.insert("quantity", format!("La cantidad máxima por artículo es {MAX_ITEM_QUANTITY}"));
                Self::validation(e.to_string(), fields)
            },
            CartError::Validation(fields) => Self::validation("Revisá los datos del servicio", fields),
            CartError::ItemNotFound(_) => Self::NoRecordFound(e.to_string()),
            CartError::ProductNotFound(id) => Self::ProductNotFound(id.to_string()),
            CartError::ColorNotFound(_) | CartError::DeliveryOptionNotFound(_) => Self::InvalidRequestBody(e.to_string()),
            CartError::Catalog(e) => e.into(),
        }
    }
}

impl From<CheckoutError> for ServerError {
    fn from(e: CheckoutError) -> Self {
        match e {
            CheckoutError::EmptyCart => Self::EmptyCart,
            CheckoutError::WrongStep(_) | CheckoutError::NoNextStep(_) => Self::CheckoutConflict(e.to_string()),
            CheckoutError::Validation(fields) => Self::validation("Revisá los campos marcados", fields),
        }
    }
}
