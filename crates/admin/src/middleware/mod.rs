//! HTTP middleware stack for admin.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (`x-request-id`)
//! 4. Session layer (tower-sessions, `admin.session` table)
//!
//! Authentication is enforced per handler by the [`RequireAdminAuth`]
//! extractor rather than by a layer.

mod auth;
mod request_id;
mod session;

pub use auth::{RequireAdminAuth, clear_current_admin, set_current_admin};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use session::{SESSION_COOKIE_NAME, create_session_layer, session_layer};
