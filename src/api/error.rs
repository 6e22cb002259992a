use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx answer; `message` is taken from the response body when present.
    #[error("{message}")]
    Remote { status: u16, message: String },
    #[error("shop api request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("unexpected shop api response: {0}")]
    Body(#[from] serde_json::Error),
}

impl ApiError {
    pub fn remote(status: StatusCode, body: &Value) -> Self {
        ApiError::Remote {
            status: status.as_u16(),
            message: remote_message(status, body),
        }
    }
}

/// Error text the remote service attached to a failed response.
///
/// The service answers with `{"message": ...}` for most failures and with
/// `{"errors": {"msg": ...}}` for its own request validation.
pub fn remote_message(status: StatusCode, body: &Value) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .or_else(|| body.pointer("/errors/msg").and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        })
}
