//! Cross-crate tests for Nosso Sushi.
//!
//! The storefront and admin routers run in process over one shared
//! [`MemoryStore`], each behind its own in-memory session layer, so a
//! scenario can place an order as a guest and manage it as staff.
//!
//! ```bash
//! cargo test -p nosso-sushi-integration-tests
//! ```

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use nosso_sushi_admin::services::AuthService;
use nosso_sushi_core::{Category, MemoryStore, Money, NewMenuItem, RecordStore};
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "gerente@nossosushi.pt";
pub const ADMIN_PASSWORD: &str = "wasabi-verde-42";

/// Both servers over one store.
pub struct TestContext {
    pub store: MemoryStore,
    pub guest: Client,
    pub staff: Client,
}

impl TestContext {
    /// A store with an admin account and a small menu: Gyoza (8), Tuna
    /// Tataki (14), Omakase Nigiri (28) and the hidden Seasonal Special (11).
    pub async fn new() -> Self {
        let store = MemoryStore::new();
        AuthService::new(&store)
            .create_admin(ADMIN_EMAIL, "Gerente", ADMIN_PASSWORD)
            .await
            .expect("admin account");

        for (name, euros, category, is_active) in [
            ("Gyoza Selection", 8, Category::Starters, true),
            ("Tuna Tataki", 14, Category::Starters, true),
            ("Omakase Nigiri", 28, Category::Mains, true),
            ("Seasonal Special", 11, Category::Mains, false),
        ] {
            store
                .create_menu_item(menu_item(name, euros, category, is_active))
                .await
                .expect("menu item");
        }

        let storefront = nosso_sushi_storefront::routes::routes(false)
            .layer(nosso_sushi_storefront::middleware::session_layer(
                tower_sessions::MemoryStore::default(),
                false,
            ))
            .with_state(nosso_sushi_storefront::state::AppState::new(
                storefront_config(),
                store.clone(),
            ));

        let admin = nosso_sushi_admin::routes::routes()
            .layer(nosso_sushi_admin::middleware::session_layer(
                tower_sessions::MemoryStore::default(),
                false,
            ))
            .with_state(nosso_sushi_admin::state::AppState::new(
                admin_config(),
                store.clone(),
            ));

        Self {
            store,
            guest: Client::new(storefront),
            staff: Client::new(admin),
        }
    }

    /// Same as [`new`](Self::new) with the staff client already logged in.
    pub async fn with_staff_session() -> Self {
        let mut ctx = Self::new().await;
        let (status, _) = ctx
            .staff
            .send(
                Method::POST,
                "/auth/login",
                Some(json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD})),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "staff login");
        ctx
    }
}

/// A router plus a single-cookie jar.
pub struct Client {
    app: Router,
    cookie: Option<String>,
}

impl Client {
    #[must_use]
    pub const fn new(app: Router) -> Self {
        Self { app, cookie: None }
    }

    /// Send a request, keeping any session cookie the server sets.
    /// Non-JSON bodies come back as `Value::Null`.
    pub async fn send(&mut self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
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
        .expect("valid request");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("infallible router");

        if let Some(pair) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
        {
            self.cookie = Some(pair.to_owned());
        }

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("response body")
            .to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    pub async fn get(&mut self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&mut self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }
}

fn menu_item(name: &str, euros: u32, category: Category, is_active: bool) -> NewMenuItem {
    NewMenuItem {
        name: name.to_owned(),
        description: String::new(),
        price: Money::from_euros(euros),
        category,
        image: None,
        rating: 4.8,
        reviews_count: 0,
        ingredients: vec![],
        nutrition: None,
        benefits: vec![],
        sort_order: 0,
        is_active,
    }
}

fn storefront_config() -> nosso_sushi_storefront::config::StorefrontConfig {
    nosso_sushi_storefront::config::StorefrontConfig {
        database_url: SecretString::from("postgres://localhost/unused"),
        host: std::net::IpAddr::from([127, 0, 0, 1]),
        port: 3000,
        base_url: "http://localhost:3000".to_owned(),
        cors_origin: None,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 0.0,
        sentry_traces_sample_rate: 0.0,
    }
}

fn admin_config() -> nosso_sushi_admin::config::AdminConfig {
    nosso_sushi_admin::config::AdminConfig {
        database_url: SecretString::from("postgres://localhost/unused"),
        host: std::net::IpAddr::from([127, 0, 0, 1]),
        port: 3001,
        base_url: "http://localhost:3001".to_owned(),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 0.0,
        sentry_traces_sample_rate: 0.0,
    }
}
