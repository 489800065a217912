//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request spans)
//! 3. Request ID
//! 4. CORS (when `STOREFRONT_CORS_ORIGIN` is set)
//! 5. Session layer (tower-sessions with `PostgreSQL` store)
//! 6. Rate limiting on write endpoints (governor)

pub mod checkout_session;
pub mod rate_limit;
pub mod request_id;
pub mod session;

pub use checkout_session::{CHECKOUT_KEY, CheckoutSession};
pub use rate_limit::{checkout_rate_limiter, form_rate_limiter};
pub use request_id::request_id_middleware;
pub use session::{create_session_layer, session_layer};
