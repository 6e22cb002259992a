use axum::{extract::State, http::StatusCode, routing::post, Form, Json, Router};
use tracing::instrument;

use crate::{
    register::{
        dto::RegisterPayload,
        form_state::{ErrorKind, FormState},
        services::handle_register,
    },
    state::AppState,
};

pub fn register_routes() -> Router<AppState> {
    Router::new().route("/register", post(register))
}

/// Form post from the sign-up page (`application/x-www-form-urlencoded`).
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    Form(payload): Form<RegisterPayload>,
) -> (StatusCode, Json<FormState>) {
    let result = handle_register(state.api.as_ref(), &FormState::Idle, payload).await;
    let status = match result.error() {
        Some(ErrorKind::Validation) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::OK,
    };
    (status, Json(result))
}
