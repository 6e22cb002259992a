//! Server side of the storefront: session login, registration and order history,
//! forwarded to the shop's REST api.

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod orders;
pub mod register;
pub mod state;
