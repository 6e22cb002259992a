use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use validator::Validate;

/// Login form body. Only presence is checked locally; the shop api judges the rest.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct Credentials {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Verified identity returned by the credentials provider.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Identity {
    pub id: String,
    pub user: Value,
    pub token: String,
}

/// Session as seen by handlers and by the browser.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Session {
    pub user_id: String,
    pub user: Value,
    #[serde(skip_serializing)]
    pub token: String,
    #[serde(with = "time::serde::rfc3339")]
    pub expires: OffsetDateTime,
}
