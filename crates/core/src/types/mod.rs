//! Core value types for Nosso Sushi.
//!
//! This module provides type-safe wrappers for ids, money, email addresses
//! and record statuses.

pub mod email;
pub mod id;
pub mod money;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use money::{Money, MoneyError, TAX_RATE};
pub use status::*;
