use actix_web::http::StatusCode;
use serde_json::Value;

use super::helpers::TestShop;

fn ids(orders: &Value) -> Vec<&str> {
    orders.as_array().unwrap().iter().map(|o| o["id"].as_str().unwrap()).collect()
}

#[actix_web::test]
async fn dashboard() {
    let _ = env_logger::try_init().ok();
    let shop = TestShop::memory();
    let res = shop.get("/admin", None).await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["totalOrders"], 7);
    assert_eq!(body["pendingOrders"], 2);
    assert_eq!(body["revenue"], 127_000);
    assert_eq!(body["customers"], 7);
    assert_eq!(ids(&body["recentOrders"]), ["12345", "12344", "12343", "12342"]);
    assert_eq!(body["recentOrders"][0]["statusLabel"], "Procesando");
    assert_eq!(body["upcomingDeliveries"].as_array().unwrap().len(), 4);
}

#[actix_web::test]
async fn orders_table() {
    let shop = TestShop::memory();
    let body = shop.get("/admin/pedidos", None).await.json();
    assert_eq!(body.as_array().unwrap().len(), 7);

    let body = shop.get("/admin/pedidos?search=arenado&status=completed", None).await.json();
    assert_eq!(ids(&body), ["12339"]);

    let body = shop.get("/admin/pedidos?sort=total&direction=desc", None).await.json();
    assert_eq!(body[0]["total"], 35_000);
    assert_eq!(body[6]["total"], 12_000);

    let body = shop.get("/admin/pedidos?search=%2312344", None).await.json();
    assert_eq!(ids(&body), ["12344"]);
}

#[actix_web::test]
async fn orders_table_rejects_unknown_columns() {
    let shop = TestShop::memory();
    let res = shop.get("/admin/pedidos?sort=price", None).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.json()["error"].as_str().unwrap().starts_with("Invalid query string: "));
    let res = shop.get("/admin/pedidos?status=lost", None).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.json()["error"].as_str().unwrap().starts_with("Invalid query string: "));
}

#[actix_web::test]
async fn calendar_views() {
    let shop = TestShop::memory();
    let body = shop.get("/admin/calendario?view=month&date=2023-08-22", None).await.json();
    assert_eq!(body["view"], "month");
    assert_eq!(body["title"], "agosto de 2023");
    assert!(body["cells"][0].is_null());
    assert_eq!(body["cells"][23]["day"], 22);
    assert_eq!(body["cells"][23]["more"], 1);

    let body = shop.get("/admin/calendario?date=2023-08-23", None).await.json();
    assert_eq!(body["view"], "week");
    assert_eq!(body["cells"].as_array().unwrap().len(), 7);
    assert_eq!(body["cells"][0]["date"], "2023-08-20");

    let body = shop.get("/admin/calendario?view=day&date=2023-08-24&step=-1", None).await.json();
    assert_eq!(body["date"], "2023-08-23");
    assert_eq!(body["cells"][0]["deliveries"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn calendar_rejects_unknown_views() {
    let shop = TestShop::memory();
    let res = shop.get("/admin/calendario?view=year", None).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.json()["error"].as_str().unwrap().starts_with("Invalid query string: "));
    let res = shop.get("/admin/calendario?date=ayer", None).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.json()["error"].as_str().unwrap().starts_with("Invalid query string: "));
}
