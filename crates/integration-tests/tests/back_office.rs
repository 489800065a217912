//! Staff changes made in admin show up on the storefront, and guest
//! submissions land in the admin queues.

#![allow(clippy::unwrap_used)]

use axum::http::{Method, StatusCode};
use nosso_sushi_integration_tests::TestContext;
use serde_json::json;

#[tokio::test]
async fn test_reservation_request_starts_pending_until_staff_confirm() {
    let mut ctx = TestContext::with_staff_session().await;
    let (status, booking) = ctx
        .guest
        .post(
            "/api/reservations",
            json!({
                "name": "Rita Sousa", "email": "rita@example.pt", "phone": "912000111",
                "date": "2026-11-06", "time": "20:30", "guests": 6, "occasion": "Birthday",
                "status": "confirmed"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(booking["status"], "pending");

    let (_, stats) = ctx.staff.get("/api/dashboard").await;
    assert_eq!(stats["pending_reservations"], 1);

    let id = booking["id"].as_i64().unwrap();
    let (_, confirmed) = ctx
        .staff
        .post(&format!("/api/reservations/{id}/confirm"), json!({}))
        .await;
    assert_eq!(confirmed["status"], "confirmed");
    assert_eq!(confirmed["time"], "20:30");

    let (_, pending) = ctx.staff.get("/api/reservations?status=pending").await;
    assert_eq!(pending, json!([]));
}

#[tokio::test]
async fn test_contact_message_read_flag() {
    let mut ctx = TestContext::with_staff_session().await;
    let (_, receipt) = ctx
        .guest
        .post(
            "/api/contact",
            json!({"name": "Rui", "email": "rui@example.pt", "subject": "Catering", "message": "Do you cater weddings?"}),
        )
        .await;
    let id = receipt["id"].as_i64().unwrap();

    let (_, stats) = ctx.staff.get("/api/dashboard").await;
    assert_eq!(stats["unread_messages"], 1);

    let (_, contact) = ctx
        .staff
        .send(
            Method::PUT,
            &format!("/api/contacts/{id}/read"),
            Some(json!({"is_read": true})),
        )
        .await;
    assert_eq!(contact["is_read"], true);
    assert_eq!(contact["subject"], "Catering");

    let (_, stats) = ctx.staff.get("/api/dashboard").await;
    assert_eq!(stats["unread_messages"], 0);
}

#[tokio::test]
async fn test_review_moderation_controls_public_list() {
    let mut ctx = TestContext::with_staff_session().await;
    let review = ctx
        .store
        .insert_review("Joana", "Omakase Nigiri", 5, "Best sushi in town", false)
        .unwrap();

    let (_, public) = ctx.guest.get("/api/reviews").await;
    assert_eq!(public, json!([]));

    ctx.staff
        .send(
            Method::PUT,
            &format!("/api/reviews/{}/visibility", review.id),
            Some(json!({"is_visible": true})),
        )
        .await;
    let (_, public) = ctx.guest.get("/api/reviews").await;
    assert_eq!(public.as_array().unwrap().len(), 1);
    assert_eq!(public[0]["dish"], "Omakase Nigiri");
}

#[tokio::test]
async fn test_menu_edits_apply_to_storefront() {
    let mut ctx = TestContext::with_staff_session().await;
    let (_, menu) = ctx.guest.get("/api/menu").await;
    assert_eq!(menu.as_array().unwrap().len(), 3);

    ctx.staff
        .send(Method::PATCH, "/api/menu/1", Some(json!({"is_active": false})))
        .await;
    ctx.staff
        .send(
            Method::PATCH,
            "/api/menu/4",
            Some(json!({"is_active": true, "price": "12.50"})),
        )
        .await;

    let (_, menu) = ctx.guest.get("/api/menu").await;
    let names: Vec<&str> = menu
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Tuna Tataki", "Omakase Nigiri", "Seasonal Special"]);

    let (status, _) = ctx.guest.post("/api/cart/items", json!({"menu_item_id": 1})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, cart) = ctx.guest.post("/api/cart/items", json!({"menu_item_id": 4})).await;
    assert_eq!(cart["subtotal"], "12.50");
}

#[tokio::test]
async fn test_settings_published_to_storefront() {
    let mut ctx = TestContext::with_staff_session().await;
    let (status, _) = ctx
        .staff
        .send(
            Method::PUT,
            "/api/settings",
            Some(json!({
                "restaurant_info": {
                    "name": "Nosso Sushi Thai",
                    "address": "Rua das Flores 12, Porto",
                    "phone": "+351 220 000 000",
                    "email": "ola@nossosushi.pt"
                },
                "hours": {"lunch": "12:00 - 15:00", "lunch_days": "Tue - Sun"}
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, settings) = ctx.guest.get("/api/settings").await;
    assert_eq!(settings["restaurant_info"]["name"], "Nosso Sushi Thai");
    assert_eq!(settings["hours"]["lunch_days"], "Tue - Sun");
    assert_eq!(settings["social_links"]["instagram"], "");
}

#[tokio::test]
async fn test_admin_api_rejects_guests() {
    let mut ctx = TestContext::new().await;
    let (status, _) = ctx.staff.get("/api/orders").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = ctx
        .staff
        .post("/auth/login", json!({"email": "gerente@nossosushi.pt", "password": "guess"}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
