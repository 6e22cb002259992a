use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::instrument;

use crate::{
    auth::extractors::CurrentSession,
    orders::{dto::OrdersResult, services::get_user_orders},
    state::AppState,
};

pub fn orders_routes() -> Router<AppState> {
    Router::new().route("/orders", get(list_orders))
}

#[instrument(skip_all)]
pub async fn list_orders(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> (StatusCode, Json<OrdersResult>) {
    let result = get_user_orders(state.api.as_ref(), &session).await;
    let status = match result {
        OrdersResult::Orders(_) => StatusCode::OK,
        OrdersResult::Failed { .. } => StatusCode::BAD_GATEWAY,
    };
    (status, Json(result))
}
