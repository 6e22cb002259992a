use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Payload of the signed session cookie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionClaims {
    pub sub: String,    // user ID decoded from the bearer token
    pub user: Value,    // profile as returned by the shop api
    pub token: String,  // bearer token issued by the shop api
    pub iat: usize,     // issued at (unix timestamp)
    pub exp: usize,     // expires at (unix timestamp)
    pub jti: Uuid,      // session ID
}
