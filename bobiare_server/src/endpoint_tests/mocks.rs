use bobiare_common::Secret;
use bobiare_engine::{
    db_types::{ColorOption, NewProduct, Product, ProductId, ProductWithColor, StoredImage, UserAccount},
    traits::{
        AccountError,
        AccountManagement,
        CatalogError,
        CatalogManagement,
        ImageStorage,
        NewUserAccount,
        StorageError,
    },
};
use mockall::mock;

mock! {
    pub Backend {}
    impl CatalogManagement for Backend {
        async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError>;
        async fn fetch_product(&self, id: &ProductId) -> Result<Option<ProductWithColor>, CatalogError>;
        async fn insert_product(&self, product: NewProduct) -> Result<Product, CatalogError>;
        async fn fetch_colors(&self) -> Result<Vec<ColorOption>, CatalogError>;
    }
    impl ImageStorage for Backend {
        async fn upload_image(&self, path: &str, content_type: &str, bytes: Vec<u8>) -> Result<(), StorageError>;
        fn public_url(&self, path: &str) -> String;
        async fn fetch_image(&self, path: &str) -> Result<Option<StoredImage>, StorageError>;
    }
    impl AccountManagement for Backend {
        async fn create_account(&self, account: NewUserAccount) -> Result<UserAccount, AccountError>;
        async fn verify_credentials(&self, email: &str, password: &Secret<String>) -> Result<UserAccount, AccountError>;
        async fn fetch_account(&self, email: &str) -> Result<Option<UserAccount>, AccountError>;
    }
}
