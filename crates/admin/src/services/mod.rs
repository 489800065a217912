//! Business logic services for admin.
//!
//! - `auth` - Password login and admin account creation

pub mod auth;

pub use auth::{AuthError, AuthService, hash_password};
