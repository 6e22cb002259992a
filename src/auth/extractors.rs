use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tower_cookies::Cookies;

use super::{
    dto::Session,
    errors::SessionError,
    services::{enrich_token, materialize_session},
};
use crate::state::AppState;

/// Session of the caller, refreshed on every request that asks for it.
pub struct CurrentSession(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let cookies = Cookies::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| SessionError::Cookies(msg))?;

        let existing = state.sessions.read(&cookies);
        let claims = enrich_token(existing, None, state.config.session.ttl())
            .ok_or(SessionError::Unauthenticated)?;
        state.sessions.write(&cookies, &claims)?;

        Ok(CurrentSession(materialize_session(&claims)))
    }
}
