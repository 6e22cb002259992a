use tracing::{debug, warn};

use super::dto::OrdersResult;
use crate::api::{ApiError, ShopApi};
use crate::auth::dto::Session;

pub const FETCH_FAILED: &str = "Failed to fetch data";

/// Orders of the signed-in user. Never fails; errors come back as [`OrdersResult::Failed`].
pub async fn get_user_orders(api: &dyn ShopApi, session: &Session) -> OrdersResult {
    match api.user_orders(&session.user_id).await {
        Ok(body) => {
            debug!(user_id = %session.user_id, "orders fetched");
            OrdersResult::Orders(body)
        }
        Err(ApiError::Remote { status, message }) => {
            warn!(user_id = %session.user_id, status, %message, "orders request refused");
            OrdersResult::Failed {
                error: FETCH_FAILED.to_string(),
            }
        }
        Err(e) => {
            warn!(user_id = %session.user_id, error = %e, "orders request failed");
            OrdersResult::Failed {
                error: e.to_string(),
            }
        }
    }
}
