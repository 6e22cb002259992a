//! Failures of the login flow and of session handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use super::token::TokenDecodeError;
use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("email and password are required")]
    MissingCredentials,
    /// The shop api refused the credentials; the message is shown to the user as-is.
    #[error("{0}")]
    Remote(String),
    #[error(transparent)]
    TokenDecode(#[from] TokenDecodeError),
    #[error(transparent)]
    Network(ApiError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl From<ApiError> for AuthError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::Remote { message, .. } => AuthError::Remote(message),
            other => AuthError::Network(other),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match &self {
            AuthError::MissingCredentials => StatusCode::BAD_REQUEST,
            AuthError::Remote(_) => StatusCode::UNAUTHORIZED,
            AuthError::TokenDecode(_) | AuthError::Network(_) => StatusCode::BAD_GATEWAY,
            AuthError::Session(e) => e.status(),
        };
        let message = match &self {
            AuthError::TokenDecode(_) => "Sign in failed: unreadable token from shop api".to_string(),
            other => other.to_string(),
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("not signed in")]
    Unauthenticated,
    #[error("cookie handling unavailable: {0}")]
    Cookies(&'static str),
    #[error("failed to sign session: {0}")]
    Sign(#[from] jsonwebtoken::errors::Error),
}

impl SessionError {
    fn status(&self) -> StatusCode {
        match self {
            SessionError::Unauthenticated => StatusCode::UNAUTHORIZED,
            SessionError::Cookies(_) | SessionError::Sign(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "message": self.to_string() }))).into_response()
    }
}
