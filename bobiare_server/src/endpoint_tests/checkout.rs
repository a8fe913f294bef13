use actix_web::http::StatusCode;
use bobiare_engine::MemoryBackend;
use serde_json::json;

use super::helpers::TestShop;

async fn shop_with_cart(session: &str) -> TestShop<MemoryBackend> {
    let shop = TestShop::memory();
    let order = json!({ "quantity": 1, "pickupLocation": "Av. Córdoba 3456" });
    let res = shop.post("/productos/1", Some(session), order).await;
    assert_eq!(res.status, StatusCode::OK);
    shop
}

#[actix_web::test]
async fn checkout_needs_a_cart() {
    let _ = env_logger::try_init().ok();
    let shop = TestShop::memory();
    let res = shop.get("/checkout", Some("s1")).await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    let body = res.json();
    assert_eq!(body["error"], "El carrito está vacío");
    assert_eq!(body["link"], "/productos");
    let res = shop.post("/checkout/submit", Some("s1"), json!({})).await;
    assert_eq!(res.status, StatusCode::CONFLICT);
}

#[actix_web::test]
async fn steps_are_validated_before_moving_on() {
    let shop = shop_with_cart("s1").await;
    let body = shop.get("/checkout", Some("s1")).await.json();
    assert_eq!(body["step"], 1);
    assert_eq!(body["stepTitle"], "Información Personal");
    assert_eq!(body["totalPrice"], 25_000);

    let res = shop.post("/checkout/next", Some("s1"), json!({})).await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields = res.json()["fields"].clone();
    assert_eq!(fields["firstName"], "El nombre es requerido");
    assert_eq!(fields["email"], "El email es requerido");

    // The errors are kept on the form, until the field is edited
    let body = shop.get("/checkout", Some("s1")).await.json();
    assert_eq!(body["step"], 1);
    assert_eq!(body["errors"]["lastName"], "El apellido es requerido");
    let patch = json!({ "firstName": "Lucía", "lastName": "Gómez", "email": "lucia@correo", "phone": "11 5555 0000" });
    let body = shop.patch("/checkout", Some("s1"), patch).await.json();
    assert!(body["errors"]["firstName"].is_null());
    assert_eq!(body["form"]["firstName"], "Lucía");

    let res = shop.post("/checkout/next", Some("s1"), json!({})).await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(res.json()["fields"]["email"], "El email es inválido");
}

#[actix_web::test]
async fn full_checkout() {
    let shop = shop_with_cart("s1").await;
    let info = json!({ "firstName": "Lucía", "lastName": "Gómez", "email": "lucia@correo.com", "phone": "1155550000" });
    shop.patch("/checkout", Some("s1"), info).await;
    let body = shop.post("/checkout/next", Some("s1"), json!({})).await.json();
    assert_eq!(body["step"], 2);
    assert_eq!(body["stepTitle"], "Dirección de Envío");

    let body = shop.post("/checkout/back", Some("s1"), json!({})).await.json();
    assert_eq!(body["step"], 1);
    assert_eq!(body["form"]["email"], "lucia@correo.com");
    shop.post("/checkout/next", Some("s1"), json!({})).await;

    let shipping = json!({ "address": "Av. Corrientes 1234", "city": "CABA", "state": "Buenos Aires", "postalCode": "1043" });
    shop.patch("/checkout", Some("s1"), shipping).await;
    let body = shop.post("/checkout/next", Some("s1"), json!({})).await.json();
    assert_eq!(body["step"], 3);

    let payment = json!({
        "cardName": "LUCIA GOMEZ",
        "cardNumber": "4111 1111 1111 11",
        "expMonth": "12",
        "expYear": "2028",
        "cvv": "1234"
    });
    let body = shop.patch("/checkout", Some("s1"), payment).await.json();
    assert!(body["form"]["cardNumber"].is_null());
    assert!(body["form"]["cvv"].is_null());
    assert_eq!(body["form"]["cardName"], "LUCIA GOMEZ");

    // There is no step after payment; the order has to be submitted
    let res = shop.post("/checkout/next", Some("s1"), json!({})).await;
    assert_eq!(res.status, StatusCode::CONFLICT);

    let res = shop.post("/checkout/submit", Some("s1"), json!({})).await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields = res.json()["fields"].clone();
    assert_eq!(fields["cardNumber"], "El número de tarjeta debe tener 16 dígitos");
    assert_eq!(fields["cvv"], "El código debe tener 3 dígitos");

    shop.patch("/checkout", Some("s1"), json!({ "cardNumber": "4111 1111 1111 1111", "cvv": "123" })).await;
    let res = shop.post("/checkout/submit", Some("s1"), json!({})).await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    let order_id = body["order"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["confirmationRoute"], format!("/confirmacion/{order_id}"));
    assert_eq!(body["order"]["status"], "pending");
    assert_eq!(body["order"]["totalAmount"], 25_000);
    assert_eq!(body["order"]["shippingAddress"]["city"], "CABA");
    assert_eq!(body["order"]["shippingAddress"]["country"], "Argentina");
    assert!(body["order"]["userId"].is_null());

    let cart = shop.get("/carrito", Some("s1")).await.json();
    assert_eq!(cart["totalItems"], 0);

    let res = shop.get(&format!("/confirmacion/{order_id}"), Some("s1")).await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["orderId"], order_id.as_str());
    assert_eq!(body["message"], format!("Tu pedido #{order_id} ha sido recibido y está siendo procesado."));
}

#[actix_web::test]
async fn orders_record_the_logged_in_customer() {
    let shop = shop_with_cart("s1").await;
    let res = shop.post("/login", Some("s1"), json!({ "email": "lucia@correo.com", "password": "secreto" })).await;
    assert_eq!(res.status, StatusCode::OK);
    let form = json!({
        "firstName": "Lucía", "lastName": "Gómez", "email": "lucia@correo.com", "phone": "1155550000",
        "address": "Av. Corrientes 1234", "city": "CABA", "state": "Buenos Aires", "postalCode": "1043",
        "cardName": "LUCIA GOMEZ", "cardNumber": "4111111111111111", "expMonth": "12", "expYear": "2028", "cvv": "123"
    });
    shop.patch("/checkout", Some("s1"), form).await;
    shop.post("/checkout/next", Some("s1"), json!({})).await;
    shop.post("/checkout/next", Some("s1"), json!({})).await;
    let res = shop.post("/checkout/submit", Some("s1"), json!({})).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["order"]["userId"], "lucia@correo.com");
}

#[actix_web::test]
async fn submitting_early_is_a_conflict() {
    let shop = shop_with_cart("s1").await;
    let res = shop.post("/checkout/submit", Some("s1"), json!({})).await;
    assert_eq!(res.status, StatusCode::CONFLICT);
}

#[actix_web::test]
async fn confirmation_needs_an_order_id() {
    let shop = TestShop::memory();
    let res = shop.get("/confirmacion/%20", None).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}
