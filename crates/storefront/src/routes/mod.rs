//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                        - Liveness
//! GET    /health/ready                  - Readiness (record store ping)
//!
//! # Menu
//! GET    /api/menu[?category=]          - Active items by sort order
//! GET    /api/menu/{id}                 - Active item detail
//!
//! # Cart (session)
//! GET    /api/cart                      - Cart view
//! DELETE /api/cart                      - Clear cart
//! POST   /api/cart/items                - Add one unit {menu_item_id}
//! POST   /api/cart/items/{id}/quantity  - Change quantity {delta}
//! DELETE /api/cart/items/{id}           - Remove line
//! PUT    /api/cart/customer             - Replace guest details
//! POST   /api/checkout                  - Place the order (rate limited)
//!
//! # Forms (rate limited)
//! POST   /api/reservations              - Booking request
//! POST   /api/contact                   - Contact message
//!
//! # Content
//! GET    /api/reviews                   - Visible reviews
//! GET    /api/settings                  - Public site settings
//! ```

pub mod cart;
pub mod contact;
pub mod content;
pub mod health;
pub mod menu;
pub mod reservations;

use axum::{
    Router,
    routing::{get, post, put},
};
use nosso_sushi_core::RecordStore;

use crate::middleware::{checkout_rate_limiter, form_rate_limiter};
use crate::state::AppState;

/// Cart routes, nested under `/api/cart`.
fn cart_routes<S: RecordStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route("/items", post(cart::add::<S>))
        .route("/items/{id}/quantity", post(cart::change_quantity))
        .route("/items/{id}", axum::routing::delete(cart::remove))
        .route("/customer", put(cart::update_customer))
}

/// Create all routes for the storefront.
///
/// With `rate_limited`, checkout and the public forms are throttled per
/// client IP taken from proxy headers.
pub fn routes<S: RecordStore + 'static>(rate_limited: bool) -> Router<AppState<S>> {
    let mut checkout = Router::new().route("/api/checkout", post(cart::checkout::<S>));
    let mut forms = Router::new()
        .route("/api/reservations", post(reservations::create::<S>))
        .route("/api/contact", post(contact::create::<S>));

    if rate_limited {
        if let Some(limiter) = checkout_rate_limiter() {
            checkout = checkout.layer(limiter);
        }
        if let Some(limiter) = form_rate_limiter() {
            forms = forms.layer(limiter);
        }
    }

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness::<S>))
        .route("/api/menu", get(menu::index::<S>))
        .route("/api/menu/{id}", get(menu::show::<S>))
        .nest("/api/cart", cart_routes())
        .route("/api/reviews", get(content::reviews::<S>))
        .route("/api/settings", get(content::settings::<S>))
        .merge(checkout)
        .merge(forms)
}
