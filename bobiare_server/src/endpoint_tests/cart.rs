use actix_web::http::StatusCode;
use serde_json::{json, Value};

use super::helpers::TestShop;

fn furniture_order(quantity: u32) -> Value {
    json!({
        "quantity": quantity,
        "colorId": "c4",
        "deliveryOptionId": 2,
        "pickupLocation": "Av. Córdoba 3456",
        "notes": "Dos sillas"
    })
}

#[actix_web::test]
async fn adding_to_the_cart_starts_a_session() {
    let _ = env_logger::try_init().ok();
    let shop = TestShop::memory();
    let res = shop.post("/productos/3", None, furniture_order(2)).await;
    assert_eq!(res.status, StatusCode::OK);
    let session = res.session().to_string();
    let body = res.json();
    // (18.000 + 1.500 + 3.000) x 2
    assert_eq!(body["totalPrice"], 45_000);
    assert_eq!(body["totalItems"], 2);
    let item = &body["items"][0];
    assert_eq!(item["productId"], "3");
    assert_eq!(item["color"]["name"], "Rojo Ferrari");
    assert_eq!(item["pickupLocation"], "Av. Córdoba 3456");

    let res = shop.get("/carrito", Some(&session)).await;
    assert_eq!(res.session(), session);
    assert_eq!(res.json()["totalPrice"], 45_000);
}

#[actix_web::test]
async fn carts_belong_to_their_session() {
    let shop = TestShop::memory();
    shop.post("/productos/3", Some("alice"), furniture_order(1)).await;
    let alice = shop.get("/carrito", Some("alice")).await.json();
    let bob = shop.get("/carrito", Some("bob")).await.json();
    assert_eq!(alice["totalItems"], 1);
    assert_eq!(bob["totalItems"], 0);
    assert_eq!(bob["totalPrice"], 0);
}

#[actix_web::test]
async fn default_options() {
    let shop = TestShop::memory();
    let res = shop.post("/productos/5", Some("s1"), json!({ "pickupLocation": "Taller" })).await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    // Negro Mate and standard delivery cost nothing extra
    assert_eq!(body["totalPrice"], 15_000);
    assert_eq!(body["items"][0]["color"]["id"], "c1");
    assert_eq!(body["items"][0]["deliveryOption"]["id"], 1);
}

#[actix_web::test]
async fn invalid_items_are_rejected() {
    let shop = TestShop::memory();
    let res = shop.post("/productos/3", Some("s1"), json!({ "quantity": 1 })).await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(res.json()["fields"]["pickupLocation"], "Por favor, ingresa la dirección de retiro.");

    let res = shop.post("/productos/3", Some("s1"), furniture_order(0)).await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(res.json()["fields"]["quantity"], "La cantidad debe ser al menos 1");

    let res = shop.post("/productos/999", Some("s1"), furniture_order(1)).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let mut order = furniture_order(1);
    order["colorId"] = json!("c99");
    let res = shop.post("/productos/3", Some("s1"), order).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let cart = shop.get("/carrito", Some("s1")).await.json();
    assert_eq!(cart["totalItems"], 0);
}

#[actix_web::test]
async fn changing_the_quantity_reprices_the_item() {
    let shop = TestShop::memory();
    let body = shop.post("/productos/3", Some("s1"), furniture_order(2)).await.json();
    let id = body["items"][0]["id"].as_str().unwrap().to_string();

    let res = shop.patch(&format!("/carrito/{id}"), Some("s1"), json!({ "quantity": 3 })).await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["totalPrice"], 67_500);
    assert_eq!(body["items"][0]["quantity"], 3);

    let res = shop.patch(&format!("/carrito/{id}"), Some("s1"), json!({ "quantity": 0 })).await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
    let res = shop.patch("/carrito/not-an-item", Some("s1"), json!({ "quantity": 2 })).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let res = shop.delete(&format!("/carrito/{id}"), Some("s1")).await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert!(body["items"].as_array().unwrap().is_empty());
    assert_eq!(body["totalPrice"], 0);
}

#[actix_web::test]
async fn malformed_session_ids_get_a_fresh_session() {
    let shop = TestShop::memory();
    let res = shop.get("/carrito", Some("../../etc/passwd")).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_ne!(res.session(), "../../etc/passwd");
    assert_eq!(res.session().len(), 32);
}

#[actix_web::test]
async fn product_one_in_gloss_black_with_fast_delivery() {
    let shop = TestShop::memory();
    let order = json!({ "quantity": 2, "colorId": "c2", "deliveryOptionId": 2, "pickupLocation": "Av. Rivadavia 1234" });
    let res = shop.post("/productos/1", Some("s1"), order).await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    // (25.000 + 500 + 3.000) x 2
    assert_eq!(body["totalItems"], 2);
    assert_eq!(body["totalPrice"], 57_000);
    assert_eq!(body["items"][0]["color"]["name"], "Negro Brillante");
    assert_eq!(body["items"][0]["deliveryOption"]["id"], 2);
}

#[actix_web::test]
async fn huge_quantities_are_rejected_without_breaking_other_sessions() {
    let shop = TestShop::memory();
    let res = shop.post("/productos/3", Some("greedy"), furniture_order(u32::MAX)).await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(res.json()["fields"]["quantity"], "La cantidad máxima por artículo es 9999");

    shop.post("/productos/3", Some("greedy"), furniture_order(9_000)).await;
    let res = shop.post("/productos/3", Some("greedy"), furniture_order(1_000)).await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
    let cart = shop.get("/carrito", Some("greedy")).await.json();
    assert_eq!(cart["totalItems"], 9_000);
    assert_eq!(cart["totalPrice"], 202_500_000);

    let res = shop.post("/productos/3", Some("innocent"), furniture_order(1)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["totalPrice"], 22_500);
}
