//! Account registration: schema, server action and the sign-up form controller.

pub mod dto;
pub mod form;
pub mod form_state;
pub mod handlers;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::register_routes()
}
