use std::fmt::Display;

use base64::decode as base64_decode;
use bobiare_common::{Pesos, Secret};
use bobiare_engine::{
    admin_objects::{CalendarView, OrderQuery, SortDirection, SortState},
    cart::KeyValueStore,
    db_types::{CartItem, ColorId, NewProduct, Product},
    traits::UploadedImage,
    CartProvider,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::ServerError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
    /// Where the storefront should navigate next, if anywhere
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string(), redirect: None }
    }

    pub fn redirect_to<S: Into<String>>(mut self, path: S) -> Self {
        self.redirect = Some(path.into());
        self
    }
}

//----------------------------------------------   Auth  ----------------------------------------------------
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: Secret<String>,
}

//----------------------------------------------   Cart  ----------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub total_items: u64,
    pub total_price: Pesos,
}

impl<S: KeyValueStore> From<&CartProvider<S>> for CartResponse {
    fn from(cart: &CartProvider<S>) -> Self {
        Self { items: cart.items().to_vec(), total_items: cart.total_items(), total_price: cart.total_price() }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct QuantityUpdate {
    pub quantity: u32,
}

//----------------------------------------------   Admin  ----------------------------------------------------
/// Query string of `/admin/pedidos`. Empty values are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrdersParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
}

impl OrdersParams {
    pub fn into_query(self) -> Result<OrderQuery, ServerError> {
        let mut query = OrderQuery::default();
        if let Some(search) = non_empty(self.search) {
            query = query.with_search(search);
        }
        if let Some(status) = non_empty(self.status) {
            let status = status.parse::<bobiare_engine::db_types::OrderStatusType>().map_err(|e| ServerError::InvalidQuery(e.to_string()))?;
            query = query.with_status(status);
        }
        if let Some(sort) = non_empty(self.sort) {
            let field = sort.parse::<bobiare_engine::admin_objects::OrderSortField>().map_err(|e| ServerError::InvalidQuery(e.to_string()))?;
            let direction = match non_empty(self.direction) {
                Some(d) => d.parse::<SortDirection>().map_err(|e| ServerError::InvalidQuery(e.to_string()))?,
                None => SortDirection::Asc,
            };
            query.sort = SortState::new(field, direction);
        }
        Ok(query)
    }
}

/// Query string of `/admin/calendario`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalendarParams {
    pub view: Option<String>,
    /// `YYYY-MM-DD`. Defaults to today.
    pub date: Option<NaiveDate>,
    /// Periods to move from `date`; negative moves back
    #[serde(default)]
    pub step: i32,
}

impl CalendarParams {
    pub fn view(&self) -> Result<CalendarView, ServerError> {
        match self.view.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(v) => v.parse::<CalendarView>().map_err(|e| ServerError::InvalidQuery(e.to_string())),
            None => Ok(CalendarView::default()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    /// The file contents, base64-encoded
    pub data: String,
}

impl TryFrom<ImageUpload> for UploadedImage {
    type Error = ServerError;

    fn try_from(upload: ImageUpload) -> Result<Self, Self::Error> {
        let bytes = base64_decode(upload.data.trim())
            .map_err(|e| ServerError::InvalidRequestBody(format!("The image is not valid base64. {e}")))?;
        Ok(UploadedImage { file_name: upload.file_name, content_type: upload.content_type, bytes })
    }
}

/// The add-product form
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProductForm {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub price: Pesos,
    #[serde(default)]
    pub color_id: Option<ColorId>,
    #[serde(default)]
    pub time_estimate: Option<String>,
    #[serde(default)]
    pub image: Option<ImageUpload>,
}

impl NewProductForm {
    pub fn into_parts(self) -> Result<(NewProduct, Option<UploadedImage>), ServerError> {
        let mut product =
            NewProduct::new(self.name, self.category, self.price).with_description(self.description.trim().to_string());
        if let Some(color) = self.color_id.filter(|c| !c.as_str().trim().is_empty()) {
            product = product.with_color(color);
        }
        if let Some(estimate) = non_empty(self.time_estimate) {
            product = product.with_time_estimate(estimate);
        }
        let image = self.image.map(UploadedImage::try_from).transpose()?;
        Ok((product, image))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewProductResponse {
    pub success: bool,
    pub message: String,
    pub redirect: String,
    pub product: Product,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod test {
    use bobiare_engine::{admin_objects::OrderSortField, db_types::OrderStatusType};

    use super::*;

    #[test]
    fn orders_params() {
        let params = OrdersParams {
            search: Some("  ".into()),
            status: Some("completed".into()),
            sort: Some("total".into()),
            direction: Some("desc".into()),
        };
        let query = params.into_query().unwrap();
        assert_eq!(query.search, None);
        assert_eq!(query.status, Some(OrderStatusType::Completed));
        assert_eq!(query.sort, SortState::new(OrderSortField::Total, SortDirection::Desc));
        let bad = OrdersParams { sort: Some("price".into()), ..Default::default() };
        assert!(bad.into_query().is_err());
    }

    #[test]
    fn calendar_view_defaults_to_week() {
        assert_eq!(CalendarParams::default().view().unwrap(), CalendarView::Week);
        let params = CalendarParams { view: Some("year".into()), ..Default::default() };
        assert!(params.view().is_err());
    }

    #[test]
    fn product_form_with_image() {
        let json = r#"{
            "name": "Cromado de Escapes",
            "category": "Motos",
            "price": 30000,
            "colorId": "",
            "timeEstimate": "7 días",
            "image": { "fileName": "escape.PNG", "contentType": "image/png", "data": "AQID" }
        }"#;
        let form: NewProductForm = serde_json::from_str(json).unwrap();
        let (product, image) = form.into_parts().unwrap();
        assert_eq!(product.price, Pesos::from(30_000));
        assert!(product.color_id.is_none());
        assert_eq!(product.time_estimate.as_deref(), Some("7 días"));
        let image = image.unwrap();
        assert_eq!(image.bytes, vec![1, 2, 3]);
        assert_eq!(image.extension(), Some("PNG"));
    }

    #[test]
    fn invalid_base64_is_rejected() {
        let upload = ImageUpload { file_name: "a.png".into(), content_type: "image/png".into(), data: "%%%".into() };
        assert!(matches!(UploadedImage::try_from(upload), Err(ServerError::InvalidRequestBody(_))));
    }
}
