//! Nosso Sushi Admin - restaurant management API.
//!
//! Library half of the admin binary, split out so the router can be driven
//! from tests and the CLI can reuse password hashing.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
