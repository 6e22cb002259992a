//! Client for the remote e-commerce REST service.

pub mod client;
pub mod dto;
pub mod error;
#[cfg(test)]
pub(crate) mod fake;

pub use client::{HttpShopApi, ShopApi};
pub use error::ApiError;
