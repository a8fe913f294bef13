use actix_web::http::StatusCode;
use bobiare_engine::{traits::AccountError, LoginMode};
use serde_json::json;

use super::{helpers::TestShop, mocks::MockBackend};

#[actix_web::test]
async fn simulated_login_accepts_anyone() {
    let _ = env_logger::try_init().ok();
    let shop = TestShop::memory();
    let res = shop.post("/login", Some("s1"), json!({ "email": " ana@correo.com ", "password": "x" })).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.session(), "s1");
    let body = res.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["redirect"], "/");
    assert!(body["message"].as_str().unwrap().contains("ana@correo.com"));
}

#[actix_web::test]
async fn register_then_login_against_the_backend() {
    let shop = TestShop::memory_with_backend_logins();
    let credentials = json!({ "email": "ana@correo.com", "password": "una clave larga" });
    let res = shop.post("/register", Some("s1"), credentials.clone()).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["redirect"], "/admin");

    let res = shop.post("/register", Some("s2"), credentials.clone()).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json()["error"], "Hubo un error al crear la cuenta");

    let res = shop.post("/login", Some("s2"), credentials).await;
    assert_eq!(res.status, StatusCode::OK);

    let res = shop.post("/login", Some("s3"), json!({ "email": "ana@correo.com", "password": "otra" })).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.json()["error"], "Correo o contraseña incorrectos");
}

#[actix_web::test]
async fn backend_errors_look_like_bad_credentials() {
    let mut accounts = MockBackend::new();
    accounts
        .expect_verify_credentials()
        .times(1)
        .returning(|_, _| Err(AccountError::DatabaseError("disk I/O error".into())));
    let shop = TestShop::new(MockBackend::new(), accounts, LoginMode::Backend);
    let res = shop.post("/login", Some("s1"), json!({ "email": "ana@correo.com", "password": "x" })).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.json()["error"], "Correo o contraseña incorrectos");
}

#[actix_web::test]
async fn logout() {
    let shop = TestShop::memory();
    shop.post("/login", Some("s1"), json!({ "email": "ana@correo.com", "password": "x" })).await;
    let res = shop.post("/logout", Some("s1"), json!({})).await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["message"], "Sesión cerrada");
    assert_eq!(body["redirect"], "/");
}

#[actix_web::test]
async fn login_needs_both_fields() {
    let shop = TestShop::memory();
    let res = shop.post("/login", Some("s1"), json!({ "email": "ana@correo.com" })).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}
