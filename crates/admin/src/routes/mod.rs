//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health, /health/ready           - Probes
//!
//! # Auth
//! POST   /auth/login                      - Email + password, starts session
//! POST   /auth/logout                     - Ends session
//! GET    /auth/me                         - Current admin
//!
//! # Everything below answers 401 without an admin session
//! GET    /api/dashboard                   - Overview figures
//! GET    /api/menu                        - All items
//! POST   /api/menu                        - Create item
//! PATCH  /api/menu/{id}                   - Partial update
//! DELETE /api/menu/{id}                   - Delete item
//! GET    /api/orders[?status=]            - Orders, newest first
//! POST   /api/orders/{id}/advance         - One step forward
//! POST   /api/orders/{id}/cancel          - Cancel
//! GET    /api/reservations[?status=]      - Bookings
//! POST   /api/reservations/{id}/confirm   - pending -> confirmed
//! POST   /api/reservations/{id}/cancel    - pending|confirmed -> cancelled
//! POST   /api/reservations/{id}/restore   - cancelled -> pending
//! GET    /api/reviews                     - All reviews
//! PUT    /api/reviews/{id}/visibility     - Show or hide
//! DELETE /api/reviews/{id}                - Delete review
//! GET    /api/contacts                    - Inbox
//! PUT    /api/contacts/{id}/read          - Read flag
//! GET    /api/settings                    - Site settings
//! PUT    /api/settings                    - Replace site settings
//! ```

pub mod auth;
pub mod contacts;
pub mod dashboard;
pub mod health;
pub mod menu;
pub mod orders;
pub mod reservations;
pub mod reviews;
pub mod settings;

use axum::{
    Router,
    routing::{get, patch, post, put},
};
use nosso_sushi_core::RecordStore;

use crate::state::AppState;

fn api_routes<S: RecordStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        .route("/dashboard", get(dashboard::stats::<S>))
        .route("/menu", get(menu::index::<S>).post(menu::create::<S>))
        .route("/menu/{id}", patch(menu::update::<S>).delete(menu::delete::<S>))
        .route("/orders", get(orders::index::<S>))
        .route("/orders/{id}/advance", post(orders::advance::<S>))
        .route("/orders/{id}/cancel", post(orders::cancel::<S>))
        .route("/reservations", get(reservations::index::<S>))
        .route("/reservations/{id}/confirm", post(reservations::confirm::<S>))
        .route("/reservations/{id}/cancel", post(reservations::cancel::<S>))
        .route("/reservations/{id}/restore", post(reservations::restore::<S>))
        .route("/reviews", get(reviews::index::<S>))
        .route("/reviews/{id}", axum::routing::delete(reviews::delete::<S>))
        .route("/reviews/{id}/visibility", put(reviews::set_visibility::<S>))
        .route("/contacts", get(contacts::index::<S>))
        .route("/contacts/{id}/read", put(contacts::mark_read::<S>))
        .route("/settings", get(settings::show::<S>).put(settings::update::<S>))
}

/// Create all routes for the admin panel.
pub fn routes<S: RecordStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness::<S>))
        .route("/auth/login", post(auth::login::<S>))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .nest("/api", api_routes())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use http_body_util::BodyExt;
    use nosso_sushi_core::{
        Cart, Category, CustomerInfo, MemoryStore, Money, NewMenuItem, NewOrder, NewReservation,
        OrderType,
    };
    use secrecy::SecretString;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::config::AdminConfig;
    use crate::middleware::session_layer;
    use crate::services::AuthService;

    const EMAIL: &str = "gerente@nossosushi.pt";
    const PASSWORD: &str = "wasabi-verde-42";

    fn config() -> AdminConfig {
        AdminConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3001,
            base_url: "http://localhost:3001".to_string(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    fn new_item(name: &str, euros: u32) -> NewMenuItem {
        serde_json::from_value(json!({
            "name": name,
            "price": Money::from_euros(euros),
            "category": Category::Mains,
        }))
        .unwrap()
    }

    async fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        AuthService::new(&store)
            .create_admin(EMAIL, "Gerente", PASSWORD)
            .await
            .unwrap();

        let item = store.create_menu_item(new_item("Green Curry", 20)).await.unwrap();
        let mut cart = Cart::new();
        cart.add_item(&item);
        let info = CustomerInfo {
            name: "Ana".to_string(),
            order_type: OrderType::DineIn,
            table: "7".to_string(),
            ..CustomerInfo::default()
        };
        store
            .create_order(NewOrder::from_checkout(&cart, &info))
            .await
            .unwrap();

        let booking: NewReservation = serde_json::from_value(json!({
            "name": "Rita", "email": "rita@example.pt", "phone": "912000111",
            "date": "2026-11-06", "time": "20:00"
        }))
        .unwrap();
        store.create_reservation(booking).await.unwrap();
        store
            .insert_review("Joao", "Pad Thai", 5, "Excelente", false)
            .unwrap();
        store
    }

    struct Client {
        app: Router,
        cookie: Option<String>,
    }

    impl Client {
        fn new(store: MemoryStore) -> Self {
            let app = routes()
                .layer(session_layer(tower_sessions::MemoryStore::default(), false))
                .with_state(AppState::new(config(), store));
            Self { app, cookie: None }
        }

        async fn logged_in() -> Self {
            let mut client = Self::new(seeded_store().await);
            let (status, _) = client
                .send(
                    Method::POST,
                    "/auth/login",
                    Some(json!({"email": EMAIL, "password": PASSWORD})),
                )
                .await;
            assert_eq!(status, StatusCode::OK);
            client
        }

        async fn send(&mut self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
            let mut request = Request::builder().method(method).uri(uri);
            if let Some(cookie) = &self.cookie {
                request = request.header(header::COOKIE, cookie);
            }
            let request = match body {
                Some(json) => request
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json.to_string())),
                None => request.body(Body::empty()),
            }
            .unwrap();

            let response = self.app.clone().oneshot(request).await.unwrap();
            if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
                let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
                self.cookie = Some(pair.to_owned());
            }
            let status = response.status();
            let bytes = response.into_body().collect().await.unwrap().to_bytes();
            (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
        }
    }

    #[tokio::test]
    async fn test_api_requires_login() {
        let mut client = Client::new(seeded_store().await);
        for uri in ["/api/dashboard", "/api/orders", "/api/settings"] {
            let (status, _) = client.send(Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        }

        let (status, body) = client
            .send(
                Method::POST,
                "/auth/login",
                Some(json!({"email": EMAIL, "password": "not-the-password"})),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid email or password");
    }

    #[tokio::test]
    async fn test_login_then_logout() {
        let mut client = Client::logged_in().await;
        let (status, me) = client.send(Method::GET, "/auth/me", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["name"], "Gerente");

        let (status, _) = client.send(Method::POST, "/auth/logout", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = client.send(Method::GET, "/api/dashboard", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_dashboard_figures() {
        let mut client = Client::logged_in().await;
        let (status, stats) = client.send(Method::GET, "/api/dashboard", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stats["total_revenue"], "22.00");
        assert_eq!(stats["orders_today"], 1);
        assert_eq!(stats["pending_reservations"], 1);
        assert_eq!(stats["unread_messages"], 0);
    }

    #[tokio::test]
    async fn test_order_lifecycle() {
        let mut client = Client::logged_in().await;
        for expected in ["preparing", "ready", "delivered"] {
            let (status, order) = client.send(Method::POST, "/api/orders/1/advance", None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(order["status"], expected);
        }

        let (status, _) = client.send(Method::POST, "/api/orders/1/advance", None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        let (status, _) = client.send(Method::POST, "/api/orders/1/cancel", None).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (_, delivered) = client
            .send(Method::GET, "/api/orders?status=delivered", None)
            .await;
        assert_eq!(delivered.as_array().unwrap().len(), 1);

        let (status, _) = client.send(Method::POST, "/api/orders/99/advance", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_reservation_transitions() {
        let mut client = Client::logged_in().await;
        let (_, confirmed) = client
            .send(Method::POST, "/api/reservations/1/confirm", None)
            .await;
        assert_eq!(confirmed["status"], "confirmed");

        let (status, _) = client
            .send(Method::POST, "/api/reservations/1/restore", None)
            .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (_, cancelled) = client
            .send(Method::POST, "/api/reservations/1/cancel", None)
            .await;
        assert_eq!(cancelled["status"], "cancelled");
        let (_, restored) = client
            .send(Method::POST, "/api/reservations/1/restore", None)
            .await;
        assert_eq!(restored["status"], "pending");
    }

    #[tokio::test]
    async fn test_menu_crud() {
        let mut client = Client::logged_in().await;
        let (status, created) = client
            .send(Method::POST, "/api/menu", Some(json!(new_item("Mango Sticky Rice", 9))))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_i64().unwrap();

        let (status, updated) = client
            .send(
                Method::PATCH,
                &format!("/api/menu/{id}"),
                Some(json!({"is_active": false, "category": "desserts"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["is_active"], false);
        assert_eq!(updated["category"], "desserts");
        assert_eq!(updated["name"], "Mango Sticky Rice");

        let (_, all) = client.send(Method::GET, "/api/menu", None).await;
        assert_eq!(all.as_array().unwrap().len(), 2);

        let (status, _) = client
            .send(Method::DELETE, &format!("/api/menu/{id}"), None)
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = client
            .send(Method::DELETE, &format!("/api/menu/{id}"), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_review_moderation() {
        let mut client = Client::logged_in().await;
        let (_, review) = client
            .send(
                Method::PUT,
                "/api/reviews/1/visibility",
                Some(json!({"is_visible": true})),
            )
            .await;
        assert_eq!(review["is_visible"], true);

        let (status, _) = client.send(Method::DELETE, "/api/reviews/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (_, reviews) = client.send(Method::GET, "/api/reviews", None).await;
        assert_eq!(reviews, json!([]));
    }

    #[tokio::test]
    async fn test_settings_round_trip() {
        let mut client = Client::logged_in().await;
        let (_, mut settings) = client.send(Method::GET, "/api/settings", None).await;
        settings["hours"]["closed"] = json!("Monday");
        settings["hero_images"] = json!(["/images/hero-1.jpg"]);

        let (status, _) = client
            .send(Method::PUT, "/api/settings", Some(settings))
            .await;
        assert_eq!(status, StatusCode::OK);

        let (_, saved) = client.send(Method::GET, "/api/settings", None).await;
        assert_eq!(saved["hours"]["closed"], "Monday");
        assert_eq!(saved["hero_images"][0], "/images/hero-1.jpg");
    }
}
