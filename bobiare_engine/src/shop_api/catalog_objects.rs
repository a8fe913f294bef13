use serde::{Deserialize, Serialize};

use crate::db_types::{ColorId, ColorOption, DeliveryOption, Product, ProductId};

/// Shown in place of the product grid when a listing has nothing to show.
pub const NO_SERVICES_FOUND: &str = "No se encontraron servicios";
/// Shown when a configured item has no pickup address.
pub const PICKUP_LOCATION_REQUIRED: &str = "Por favor, ingresa la dirección de retiro.";
/// Where customers are sent when the product they asked for does not exist.
pub const ALL_PRODUCTS_LINK: &str = "/productos";

//--------------------------------------     ProductFilter     ---------------------------------------------------------
/// Query parameters of the product listing. Blank values are the same as missing ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Exact category, from the `category` query parameter
    pub category: Option<String>,
    /// Case-insensitive substring of the product name, from the `service` query parameter
    pub service: Option<String>,
    /// Exact category picked in the filter sidebar
    pub selected: Option<String>,
}

impl ProductFilter {
    pub fn with_category<S: Into<String>>(mut self, category: S) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_service<S: Into<String>>(mut self, service: S) -> Self {
        self.service = Some(service.into());
        self
    }

    pub fn with_selected<S: Into<String>>(mut self, category: S) -> Self {
        self.selected = Some(category.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        [&self.category, &self.service, &self.selected].into_iter().all(|v| non_blank(v).is_none())
    }

    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = non_blank(&self.category) {
            if product.category != category {
                return false;
            }
        }
        if let Some(service) = non_blank(&self.service) {
            if !product.name.to_lowercase().contains(&service.to_lowercase()) {
                return false;
            }
        }
        if let Some(selected) = non_blank(&self.selected) {
            if product.category != selected {
                return false;
            }
        }
        true
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

//--------------------------------------    ProductListing     ---------------------------------------------------------
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductListing {
    pub products: Vec<Product>,
    /// Distinct categories of every loaded product (not just the matching ones), in first-seen order
    pub categories: Vec<String>,
    /// Set when `products` is empty
    pub message: Option<String>,
}

//--------------------------------------     ProductDetail     ---------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDetail {
    pub product: Product,
    pub color: Option<ColorOption>,
    /// Up to three other products of the same category
    pub related: Vec<Product>,
    pub colors: Vec<ColorOption>,
    pub delivery_options: Vec<DeliveryOption>,
}

//--------------------------------------   FeaturedProducts    ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceLink {
    pub title: String,
    pub description: String,
    pub link: String,
}

impl ServiceLink {
    fn new(service: &str, title: &str, description: &str) -> Self {
        Self { title: title.into(), description: description.into(), link: format!("/productos?service={service}") }
    }
}

pub fn service_links() -> Vec<ServiceLink> {
    vec![
        ServiceLink::new(
            "arenado",
            "Arenado Profesional",
            "Eliminamos óxido, pintura vieja y contaminantes de cualquier superficie metálica. Ideal para preparación \
             antes de pintura.",
        ),
        ServiceLink::new(
            "pintura",
            "Pintura Industrial",
            "Aplicamos pinturas de alta calidad con técnicas industriales para asegurar un acabado duradero y \
             resistente.",
        ),
        ServiceLink::new(
            "anticorrosivo",
            "Tratamiento Anticorrosivo",
            "Protección especializada contra la corrosión para entornos agresivos, marítimos e industriales.",
        ),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturedProducts {
    pub products: Vec<Product>,
    pub services: Vec<ServiceLink>,
}

//--------------------------------------  ConfigureItemRequest ---------------------------------------------------------
/// The options picked on the product detail page before adding it to the cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigureItemRequest {
    #[serde(default)]
    pub product_id: ProductId,
    #[serde(default = "one")]
    pub quantity: u32,
    #[serde(default)]
    pub model: Option<String>,
    /// Defaults to the first available color
    #[serde(default)]
    pub color_id: Option<ColorId>,
    /// Defaults to the first delivery option
    #[serde(default)]
    pub delivery_option_id: Option<u8>,
    #[serde(default)]
    pub pickup_location: String,
    #[serde(default)]
    pub notes: Option<String>,
}

fn one() -> u32 {
    1
}

impl ConfigureItemRequest {
    pub fn new<P: Into<ProductId>, S: Into<String>>(product_id: P, quantity: u32, pickup_location: S) -> Self {
        Self { product_id: product_id.into(), quantity, pickup_location: pickup_location.into(), ..Default::default() }
    }

    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_color<S: Into<String>>(mut self, color_id: S) -> Self {
        self.color_id = Some(ColorId(color_id.into()));
        self
    }

    pub fn with_delivery_option(mut self, id: u8) -> Self {
        self.delivery_option_id = Some(id);
        self
    }

    pub fn with_notes<S: Into<String>>(mut self, notes: S) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

#[cfg(test)]
mod test {
    use bobiare_common::Pesos;

    use super::*;

    fn product(name: &str, category: &str) -> Product {
        Product {
            id: "1".into(),
            name: name.into(),
            category: category.into(),
            description: String::new(),
            image: String::new(),
            color_id: None,
            time_estimate: None,
            price: Pesos::from(1),
        }
    }

    #[test]
    fn filters_combine() {
        let moto = product("Arenado y Pintura de Cuadro de Moto", "Motos");
        assert!(ProductFilter::default().matches(&moto));
        assert!(ProductFilter::default().with_service("ARENADO").matches(&moto));
        assert!(!ProductFilter::default().with_service("anticorrosivo").matches(&moto));
        assert!(ProductFilter::default().with_category("Motos").with_service("pintura").matches(&moto));
        assert!(!ProductFilter::default().with_category("motos").matches(&moto));
        assert!(!ProductFilter::default().with_category("Motos").with_selected("Hogar").matches(&moto));
        assert!(ProductFilter::default().with_category("  ").matches(&moto));
        assert!(ProductFilter::default().with_selected("").is_empty());
    }

    #[test]
    fn configure_request_defaults() {
        let req: ConfigureItemRequest = serde_json::from_str(r#"{"pickupLocation": "Av. Santa Fe 2468"}"#).unwrap();
        assert_eq!(req.quantity, 1);
        assert!(req.color_id.is_none());
        assert!(req.delivery_option_id.is_none());
    }

    #[test]
    fn service_shortcuts() {
        let links = service_links();
        assert_eq!(links.len(), 3);
        assert_eq!(links[0].link, "/productos?service=arenado");
        assert_eq!(links[2].link, "/productos?service=anticorrosivo");
    }
}
