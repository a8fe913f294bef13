use actix_web::{http::StatusCode, test::TestRequest};
use bobiare_engine::{traits::CatalogError, LoginMode};
use serde_json::json;

use super::{helpers::TestShop, mocks::MockBackend};

#[actix_web::test]
async fn home_shows_four_products_and_the_services() {
    let _ = env_logger::try_init().ok();
    let shop = TestShop::memory();
    for path in ["/", "/home"] {
        let res = shop.get(path, None).await;
        assert_eq!(res.status, StatusCode::OK);
        let body = res.json();
        assert_eq!(body["products"].as_array().unwrap().len(), 4);
        assert_eq!(body["services"][0]["link"], "/productos?service=arenado");
    }
}

#[actix_web::test]
async fn products_can_be_filtered() {
    let shop = TestShop::memory();
    let body = shop.get("/productos", None).await.json();
    assert_eq!(body["products"].as_array().unwrap().len(), 6);
    assert_eq!(body["categories"].as_array().unwrap().len(), 5);

    let body = shop.get("/productos?category=Industrial", None).await.json();
    let ids = body["products"].as_array().unwrap().iter().map(|p| p["id"].as_str().unwrap()).collect::<Vec<_>>();
    assert_eq!(ids, ["2", "4"]);
    assert_eq!(body["categories"].as_array().unwrap().len(), 5);

    let body = shop.get("/productos?service=ARENADO", None).await.json();
    assert_eq!(body["products"].as_array().unwrap().len(), 2);

    let body = shop.get("/productos?category=Industrial&selected=Hogar", None).await.json();
    assert!(body["products"].as_array().unwrap().is_empty());
    assert_eq!(body["message"], "No se encontraron servicios");
}

#[actix_web::test]
async fn product_detail() {
    let shop = TestShop::memory();
    let res = shop.get("/productos/2", None).await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["product"]["name"], "Tratamiento Anticorrosivo Industrial");
    assert_eq!(body["related"][0]["id"], "4");
    assert_eq!(body["colors"].as_array().unwrap().len(), 10);
    assert_eq!(body["delivery_options"].as_array().unwrap().len(), 4);
}

#[actix_web::test]
async fn missing_product_links_back_to_the_catalog() {
    let shop = TestShop::memory();
    let res = shop.get("/productos/999", None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    let body = res.json();
    assert_eq!(body["error"], "Producto no encontrado");
    assert_eq!(body["link"], "/productos");
}

#[actix_web::test]
async fn unknown_pages() {
    let shop = TestShop::memory();
    let res = shop.get("/no/such/page", None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    let body = res.json();
    assert_eq!(body["error"], "Página no encontrada");
    assert_eq!(body["link"], "/");
}

#[actix_web::test]
async fn backend_failures_show_an_empty_listing() {
    let mut catalog = MockBackend::new();
    catalog.expect_fetch_products().returning(|| Err(CatalogError::DatabaseError("connection refused".into())));
    catalog.expect_fetch_product().returning(|_| Err(CatalogError::DatabaseError("connection refused".into())));
    let shop = TestShop::new(catalog, MockBackend::new(), LoginMode::Backend);

    let res = shop.get("/productos", None).await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert!(body["products"].as_array().unwrap().is_empty());
    assert!(body["categories"].as_array().unwrap().is_empty());

    let res = shop.get("/productos/1", None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn add_product_with_an_image() {
    let shop = TestShop::memory();
    let res = shop.get("/admin/addproduct", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["colors"][3]["name"], "Rojo Ferrari");

    let form = json!({
        "name": "Cromado de Escapes",
        "category": "Motos",
        "description": "Cromado completo de escapes.",
        "price": 30000,
        "colorId": "c7",
        "timeEstimate": "7 días",
        "image": { "fileName": "escape.PNG", "contentType": "image/png", "data": "iVBORw0K" }
    });
    let res = shop.post("/admin/addproduct", None, form).await;
    assert_eq!(res.status, StatusCode::CREATED);
    let body = res.json();
    assert_eq!(body["redirect"], "/admin");
    assert_eq!(body["product"]["id"], "7");
    let url = body["product"]["image"].as_str().unwrap().to_string();
    assert!(url.starts_with("http://localhost:8470/imagenes/bobiareimg/"), "was: {url}");
    assert!(url.ends_with(".png"), "was: {url}");

    let path = url.trim_start_matches("http://localhost:8470");
    let res = shop.get(path, None).await;
    assert_eq!(res.status, StatusCode::OK);

    let body = shop.get("/productos?category=Motos", None).await.json();
    assert_eq!(body["products"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn add_product_rejects_incomplete_forms() {
    let shop = TestShop::memory();
    let res = shop.post("/admin/addproduct", None, json!({ "name": " ", "category": "Motos", "price": 100 })).await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
    let res = shop.post("/admin/addproduct", None, json!({ "category": "Motos", "price": 100 })).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn images_from_other_buckets_are_not_served() {
    let shop = TestShop::memory();
    let res = shop.get("/imagenes/otherbucket/1.png", None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    let res = shop.get("/imagenes/bobiareimg/1.png", None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn malformed_query_strings() {
    let shop = TestShop::memory();
    let res = shop.send(TestRequest::get().uri("/admin/calendario?step=many")).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}
