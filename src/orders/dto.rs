use serde::Serialize;
use serde_json::Value;

/// Order history as handed to the page: the shop api's body untouched, or `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OrdersResult {
    Orders(Value),
    Failed { error: String },
}
