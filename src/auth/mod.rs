use crate::state::AppState;
use axum::Router;

pub mod claims;
pub mod dto;
pub mod errors;
pub mod extractors;
pub mod handlers;
pub mod jwt;
pub mod services;
pub mod store;
pub mod token;

pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
