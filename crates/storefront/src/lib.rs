//! Nosso Sushi Storefront library.
//!
//! The public ordering API as a library so the router can be built against
//! any record store and exercised in tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
