use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tower_cookies::Cookies;
use tracing::{info, instrument};

use crate::{
    auth::{
        dto::{Credentials, Session},
        errors::{AuthError, SessionError},
        extractors::CurrentSession,
        services::{authorize, enrich_token, materialize_session},
    },
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/session", get(get_session))
}

#[instrument(skip(state, cookies, credentials))]
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(credentials): Json<Credentials>,
) -> Result<Json<Session>, AuthError> {
    let identity = authorize(state.api.as_ref(), &credentials).await?;

    let claims = enrich_token(None, Some(&identity), state.config.session.ttl())
        .ok_or(SessionError::Unauthenticated)?;
    state.sessions.write(&cookies, &claims)?;

    info!(user_id = %claims.sub, session_id = %claims.jti, "user signed in");
    Ok(Json(materialize_session(&claims)))
}

#[instrument(skip(state, cookies))]
pub async fn logout(State(state): State<AppState>, cookies: Cookies) -> StatusCode {
    state.sessions.clear(&cookies);
    info!("user signed out");
    StatusCode::NO_CONTENT
}

#[instrument(skip_all)]
pub async fn get_session(CurrentSession(session): CurrentSession) -> Json<Session> {
    Json(session)
}
