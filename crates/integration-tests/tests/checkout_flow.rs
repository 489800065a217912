//! A guest orders on the storefront and staff work the order in admin.

#![allow(clippy::unwrap_used)]

use axum::http::{Method, StatusCode};
use nosso_sushi_integration_tests::TestContext;
use serde_json::json;

async fn fill_cart(ctx: &mut TestContext) {
    for id in [1, 1, 3] {
        let (status, _) = ctx.guest.post("/api/cart/items", json!({"menu_item_id": id})).await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, _) = ctx
        .guest
        .send(
            Method::PUT,
            "/api/cart/customer",
            Some(json!({"name": "Ana Costa", "type": "Takeaway", "phone": "912345678"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_guest_order_reaches_the_kitchen_queue() {
    let mut ctx = TestContext::with_staff_session().await;
    fill_cart(&mut ctx).await;

    let (_, cart) = ctx.guest.get("/api/cart").await;
    assert_eq!(cart["subtotal"], "44");
    assert_eq!(cart["tax"], "4.40");
    assert_eq!(cart["total"], "48.40");

    let (status, placed) = ctx.guest.post("/api/checkout", json!({})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(placed["total"], "48.40");

    let (_, orders) = ctx.staff.get("/api/orders?status=new").await;
    let order = orders.as_array().unwrap().first().unwrap().clone();
    assert_eq!(order["id"], placed["order_id"]);
    assert_eq!(order["customer_name"], "Ana Costa");
    assert_eq!(order["order_type"], "Take Away");
    assert_eq!(order["customer_address"], json!(null));
    assert_eq!(order["items"].as_array().unwrap().len(), 2);

    let id = order["id"].as_i64().unwrap();
    let (_, advanced) = ctx
        .staff
        .post(&format!("/api/orders/{id}/advance"), json!({}))
        .await;
    assert_eq!(advanced["status"], "preparing");

    let (_, stats) = ctx.staff.get("/api/dashboard").await;
    assert_eq!(stats["total_revenue"], "48.40");
    assert_eq!(stats["orders_today"], 1);
}

#[tokio::test]
async fn test_store_failure_keeps_cart_for_retry() {
    let mut ctx = TestContext::with_staff_session().await;
    fill_cart(&mut ctx).await;

    ctx.store.fail_next_writes(1);
    let (status, body) = ctx.guest.post("/api/checkout", json!({})).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Could not place your order, please try again");

    let (_, cart) = ctx.guest.get("/api/cart").await;
    assert_eq!(cart["item_count"], 3);
    assert_eq!(cart["customer"]["name"], "Ana Costa");
    assert_eq!(cart["can_checkout"], true);

    let (status, _) = ctx.guest.post("/api/checkout", json!({})).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, orders) = ctx.staff.get("/api/orders").await;
    assert_eq!(orders.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_details_block_the_order() {
    let mut ctx = TestContext::with_staff_session().await;
    ctx.guest.post("/api/cart/items", json!({"menu_item_id": 2})).await;
    ctx.guest
        .send(
            Method::PUT,
            "/api/cart/customer",
            Some(json!({"name": "  ", "type": "Dine In"})),
        )
        .await;

    let (status, body) = ctx.guest.post("/api/checkout", json!({})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["fields"], json!(["name", "table"]));

    let (_, orders) = ctx.staff.get("/api/orders").await;
    assert_eq!(orders, json!([]));
}

#[tokio::test]
async fn test_cancelled_order_is_final() {
    let mut ctx = TestContext::with_staff_session().await;
    fill_cart(&mut ctx).await;
    let (_, placed) = ctx.guest.post("/api/checkout", json!({})).await;
    let id = placed["order_id"].as_i64().unwrap();

    let (status, cancelled) = ctx
        .staff
        .post(&format!("/api/orders/{id}/cancel"), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "cancelled");

    for action in ["advance", "cancel"] {
        let (status, _) = ctx
            .staff
            .post(&format!("/api/orders/{id}/{action}"), json!({}))
            .await;
        assert_eq!(status, StatusCode::CONFLICT, "{action}");
    }
}
