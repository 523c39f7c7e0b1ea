//! `shoplite-api` — HTTP delivery layer.
//!
//! Routes user-triggered actions onto the cart/catalog/order contracts and
//! renders results as JSON. User identity arrives as an `x-user-id` header
//! (session management is the caller's concern); configuration selects
//! exactly one backing store at startup.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
