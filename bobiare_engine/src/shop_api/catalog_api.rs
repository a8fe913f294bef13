use std::fmt::Debug;

use chrono::Utc;
use log::*;

use crate::{
    cart::{
        check_quantity,
        pricing::{delivery_option, delivery_options, line_total, reprice},
        CartError,
    },
    db_types::{CartItem, CartItemPatch, ColorOption, NewProduct, Product, ProductId, StoredImage},
    helpers::{new_cart_item_id, FieldErrors},
    shop_api::catalog_objects::{
        service_links,
        ConfigureItemRequest,
        FeaturedProducts,
        ProductDetail,
        ProductFilter,
        ProductListing,
        NO_SERVICES_FOUND,
        PICKUP_LOCATION_REQUIRED,
    },
    traits::{CatalogError, CatalogManagement, ImageStorage, StorageError, UploadedImage},
};

const FEATURED_COUNT: usize = 4;
const RELATED_COUNT: usize = 3;

/// `CatalogApi` serves the storefront's product pages and turns product options into cart items.
///
/// Read paths are forgiving: backend failures are logged and produce an empty listing (or a "not found" detail page)
/// rather than an error. Write paths report errors.
pub struct CatalogApi<B> {
    db: B,
}

impl<B> Debug for CatalogApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CatalogApi")
    }
}

impl<B> CatalogApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}

impl<B> CatalogApi<B>
where B: CatalogManagement
{
    /// Lists the products matching `filter`, along with every category in the catalog.
    pub async fn browse(&self, filter: &ProductFilter) -> ProductListing {
        let products = match self.db.fetch_products().await {
            Ok(p) => p,
            Err(e) => {
                error!("🗃️ Could not load products. Showing an empty listing. {e}");
                Vec::new()
            },
        };
        let categories = distinct_categories(&products);
        let products = products.into_iter().filter(|p| filter.matches(p)).collect::<Vec<_>>();
        trace!("🗃️ Listing {} products for {filter:?}", products.len());
        let message = products.is_empty().then(|| NO_SERVICES_FOUND.to_string());
        ProductListing { products, categories, message }
    }

    /// The first four products, for the home page, plus the service shortcuts.
    pub async fn featured_products(&self) -> FeaturedProducts {
        let products = match self.db.fetch_products().await {
            Ok(p) => p.into_iter().take(FEATURED_COUNT).collect(),
            Err(e) => {
                error!("🗃️ Could not load featured products. {e}");
                Vec::new()
            },
        };
        FeaturedProducts { products, services: service_links() }
    }

    /// Everything the product detail page needs. A backend failure is reported as [`CatalogError::ProductNotFound`],
    /// after being logged.
    pub async fn product_detail(&self, id: &ProductId) -> Result<ProductDetail, CatalogError> {
        let found = match self.db.fetch_product(id).await {
            Ok(found) => found,
            Err(e) => {
                error!("🗃️ Could not load product {id}. {e}");
                None
            },
        };
        let found = found.ok_or_else(|| CatalogError::ProductNotFound(id.clone()))?;
        let related = match self.db.fetch_products().await {
            Ok(all) => related_products(&found.product, all),
            Err(e) => {
                warn!("🗃️ Could not load related products for {id}. {e}");
                Vec::new()
            },
        };
        let colors = self.db.fetch_colors().await.unwrap_or_else(|e| {
            warn!("🗃️ Could not load colors for the detail page of {id}. {e}");
            Vec::new()
        });
        Ok(ProductDetail {
            product: found.product,
            color: found.color,
            related,
            colors,
            delivery_options: delivery_options(),
        })
    }

    pub async fn colors(&self) -> Result<Vec<ColorOption>, CatalogError> {
        self.db.fetch_colors().await
    }

    /// Builds a priced cart item from the options picked on the detail page.
    ///
    /// The color defaults to the first available color and the delivery option to the first (standard) one. A pickup
    /// address is required.
    pub async fn configure_item(&self, request: ConfigureItemRequest) -> Result<CartItem, CartError> {
        check_quantity(request.quantity)?;
        let pickup_location = request.pickup_location.trim().to_string();
        if pickup_location.is_empty() {
            let mut errors = FieldErrors::new();
            errors.insert("pickupLocation", PICKUP_LOCATION_REQUIRED);
            return Err(CartError::Validation(errors));
        }
        let product = self
            .db
            .fetch_product(&request.product_id)
            .await?
            .ok_or_else(|| CartError::ProductNotFound(request.product_id.clone()))?
            .product;
        let colors = self.db.fetch_colors().await?;
        let color = match &request.color_id {
            Some(cid) => {
                Some(colors.into_iter().find(|c| &c.id == cid).ok_or_else(|| CartError::ColorNotFound(cid.clone()))?)
            },
            None => colors.into_iter().next(),
        };
        let delivery = match request.delivery_option_id {
            Some(id) => delivery_option(id).ok_or(CartError::DeliveryOptionNotFound(id))?,
            None => delivery_options().into_iter().next().ok_or(CartError::DeliveryOptionNotFound(1))?,
        };
        let total_price = line_total(product.price, color.as_ref(), &delivery, request.quantity)?;
        let item = CartItem {
            id: new_cart_item_id(),
            product_id: product.id,
            quantity: request.quantity,
            model: non_empty(request.model),
            color,
            delivery_option: delivery,
            pickup_location,
            notes: non_empty(request.notes),
            total_price,
        };
        debug!("🛒️ Configured {} x product {} for {}", item.quantity, item.product_id, item.total_price);
        Ok(item)
    }

    /// Recomputes the total of a cart item for a new quantity, using the product's current base price.
    pub async fn reprice_item(&self, item: &CartItem, quantity: u32) -> Result<CartItemPatch, CartError> {
        let product = self
            .db
            .fetch_product(&item.product_id)
            .await?
            .ok_or_else(|| CartError::ProductNotFound(item.product_id.clone()))?
            .product;
        reprice(item, &product, quantity)
    }
}

impl<B> CatalogApi<B>
where B: CatalogManagement + ImageStorage
{
    /// Stores a new product. If an image is attached, it is uploaded first, under a name derived from the current
    /// time, and its public URL becomes the product image.
    pub async fn add_product(&self, product: NewProduct, image: Option<UploadedImage>) -> Result<Product, CatalogError> {
        product.validate().map_err(CatalogError::InvalidProduct)?;
        let product = match image {
            Some(image) => {
                let path = image_path(&image, Utc::now().timestamp_millis());
                self.db.upload_image(&path, &image.content_type, image.bytes).await.map_err(|e| {
                    error!("🗃️ Error uploading image {path}. {e}");
                    CatalogError::ImageUploadFailed(e.to_string())
                })?;
                let url = self.db.public_url(&path);
                debug!("🗃️ Product image uploaded to {url}");
                product.with_image(url)
            },
            None => product,
        };
        let product = self.db.insert_product(product).await?;
        info!("🗃️ Product {} ({}) added to the catalog", product.id, product.name);
        Ok(product)
    }
}

impl<B> CatalogApi<B>
where B: ImageStorage
{
    pub async fn fetch_image(&self, path: &str) -> Result<Option<StoredImage>, StorageError> {
        self.db.fetch_image(path).await
    }
}

/// `<unix millis>.<extension>`, or just the millis if the file name has no extension.
fn image_path(image: &UploadedImage, millis: i64) -> String {
    match image.extension() {
        Some(ext) => format!("{millis}.{}", ext.to_ascii_lowercase()),
        None => millis.to_string(),
    }
}

fn distinct_categories(products: &[Product]) -> Vec<String> {
    products.iter().fold(Vec::new(), |mut acc, p| {
        if !acc.contains(&p.category) {
            acc.push(p.category.clone());
        }
        acc
    })
}

fn related_products(product: &Product, all: Vec<Product>) -> Vec<Product> {
    all.into_iter().filter(|p| p.id != product.id && p.category == product.category).take(RELATED_COUNT).collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod test {
    use bobiare_common::Pesos;

    use super::*;
    use crate::{memory_backend::MemoryBackend, shop_api::catalog_objects::ALL_PRODUCTS_LINK};

    fn api() -> CatalogApi<MemoryBackend> {
        CatalogApi::new(MemoryBackend::new("http://localhost:8470"))
    }

    #[tokio::test]
    async fn browse_everything() {
        let listing = api().browse(&ProductFilter::default()).await;
        assert_eq!(listing.products.len(), 6);
        assert_eq!(listing.categories, vec!["Motos", "Industrial", "Hogar", "Automóviles", "Bicicletas"]);
        assert!(listing.message.is_none());
    }

    #[tokio::test]
    async fn browse_with_filters() {
        let api = api();
        let industrial = api.browse(&ProductFilter::default().with_category("Industrial")).await;
        assert_eq!(industrial.products.len(), 2);
        assert_eq!(industrial.categories.len(), 5);
        let arenado = api.browse(&ProductFilter::default().with_service("arenado")).await;
        let ids = arenado.products.iter().map(|p| p.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["1", "5"]);
        let nothing = api.browse(&ProductFilter::default().with_category("Motos").with_selected("Hogar")).await;
        assert!(nothing.products.is_empty());
        assert_eq!(nothing.message.as_deref(), Some(NO_SERVICES_FOUND));
    }

    #[tokio::test]
    async fn detail_with_related_products() {
        let detail = api().product_detail(&"2".into()).await.unwrap();
        assert_eq!(detail.product.name, "Tratamiento Anticorrosivo Industrial");
        assert_eq!(detail.related.len(), 1);
        assert_eq!(detail.related[0].id.as_str(), "4");
        assert_eq!(detail.colors.len(), 10);
        assert_eq!(detail.delivery_options.len(), 4);
    }

    #[tokio::test]
    async fn detail_not_found() {
        let err = api().product_detail(&"404".into()).await.unwrap_err();
        assert!(matches!(err, CatalogError::ProductNotFound(_)));
        assert_eq!(err.to_string(), "Producto no encontrado");
        assert_eq!(ALL_PRODUCTS_LINK, "/productos");
    }

    #[tokio::test]
    async fn featured() {
        let featured = api().featured_products().await;
        assert_eq!(featured.products.len(), 4);
        assert_eq!(featured.products[3].id.as_str(), "4");
        assert_eq!(featured.services.len(), 3);
    }

    #[tokio::test]
    async fn configure_prices_the_item() {
        let request = ConfigureItemRequest::new("1", 2, "Av. Rivadavia 1234, CABA")
            .with_model("Honda CB 190")
            .with_color("c2")
            .with_delivery_option(2);
        let item = api().configure_item(request).await.unwrap();
        assert_eq!(item.total_price, Pesos::from(57_000));
        assert_eq!(item.quantity, 2);
        assert_eq!(item.color.as_ref().map(|c| c.name.as_str()), Some("Negro Brillante"));
        assert_eq!(item.delivery_option.days, 7);
        assert_eq!(item.model.as_deref(), Some("Honda CB 190"));
        assert!(item.notes.is_none());
    }

    #[tokio::test]
    async fn configure_defaults() {
        let item = api().configure_item(ConfigureItemRequest::new("3", 1, "Calle Florida 7890")).await.unwrap();
        assert_eq!(item.color.as_ref().map(|c| c.id.as_str()), Some("c1"));
        assert_eq!(item.delivery_option.id, 1);
        assert_eq!(item.total_price, Pesos::from(18_000));
    }

    #[tokio::test]
    async fn configure_rejections() {
        let api = api();
        let no_pickup = api.configure_item(ConfigureItemRequest::new("1", 1, "  ")).await.unwrap_err();
        match no_pickup {
            CartError::Validation(errors) => {
                assert_eq!(errors.get("pickupLocation"), Some(PICKUP_LOCATION_REQUIRED))
            },
            e => panic!("Unexpected error {e}"),
        }
        let zero = api.configure_item(ConfigureItemRequest::new("1", 0, "CABA")).await.unwrap_err();
        assert!(matches!(zero, CartError::InvalidQuantity(0)));
        let missing = api.configure_item(ConfigureItemRequest::new("77", 1, "CABA")).await.unwrap_err();
        assert!(matches!(missing, CartError::ProductNotFound(_)));
        let color = api.configure_item(ConfigureItemRequest::new("1", 1, "CABA").with_color("c77")).await;
        assert!(matches!(color, Err(CartError::ColorNotFound(_))));
        let delivery = api.configure_item(ConfigureItemRequest::new("1", 1, "CABA").with_delivery_option(9)).await;
        assert!(matches!(delivery, Err(CartError::DeliveryOptionNotFound(9))));
    }

    #[tokio::test]
    async fn reprice_uses_current_price() {
        let api = api();
        let item = api.configure_item(ConfigureItemRequest::new("1", 1, "CABA").with_color("c2")).await.unwrap();
        assert_eq!(item.total_price, Pesos::from(25_500));
        let patch = api.reprice_item(&item, 3).await.unwrap();
        assert_eq!(patch.quantity, Some(3));
        assert_eq!(patch.total_price, Some(Pesos::from(76_500)));
        assert!(matches!(api.reprice_item(&item, 0).await, Err(CartError::InvalidQuantity(0))));
        assert!(matches!(api.reprice_item(&item, u32::MAX).await, Err(CartError::QuantityTooLarge(_))));
        let huge = api.configure_item(ConfigureItemRequest::new("1", 10_000, "CABA")).await;
        assert!(matches!(huge, Err(CartError::QuantityTooLarge(10_000))));
    }

    #[tokio::test]
    async fn add_product_with_image() {
        let api = api();
        let image = UploadedImage { file_name: "Cuadro.PNG".into(), content_type: "image/png".into(), bytes: vec![1] };
        let product = api
            .add_product(NewProduct::new("Cromado", "Motos", Pesos::from(30_000)), Some(image))
            .await
            .unwrap();
        assert!(product.image.starts_with("http://localhost:8470/imagenes/bobiareimg/"));
        assert!(product.image.ends_with(".png"));
        let path = product.image.rsplit('/').next().unwrap();
        assert!(api.fetch_image(path).await.unwrap().is_some());
        let listing = api.browse(&ProductFilter::default().with_category("Motos")).await;
        assert_eq!(listing.products.len(), 2);
    }

    #[tokio::test]
    async fn add_product_without_image() {
        let product =
            api().add_product(NewProduct::new("Cromado", "Motos", Pesos::from(30_000)), None).await.unwrap();
        assert_eq!(product.image, "");
        assert!(matches!(
            api().add_product(NewProduct::new("", "Motos", Pesos::from(1)), None).await,
            Err(CatalogError::InvalidProduct(_))
        ));
    }

    #[test]
    fn image_paths_use_the_timestamp() {
        let image = |name: &str| UploadedImage { file_name: name.into(), content_type: String::new(), bytes: vec![] };
        assert_eq!(image_path(&image("foto.JPG"), 1692712800000), "1692712800000.jpg");
        assert_eq!(image_path(&image("foto"), 1692712800000), "1692712800000");
    }
}
