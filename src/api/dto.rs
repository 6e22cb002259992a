use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /auth/signin`.
#[derive(Debug, Clone, Serialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// Successful answer of `POST /auth/signin`.
#[derive(Debug, Clone, Deserialize)]
pub struct SigninResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Value,
    pub token: String,
}

/// Body of `POST /auth/signup`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub re_password: String,
    pub phone: String,
}

/// Successful answer of `POST /auth/signup`.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Value,
    #[serde(default)]
    pub token: Option<String>,
}
