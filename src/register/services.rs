use tracing::{info, warn};
use validator::Validate;

use super::{
    dto::{field_messages, RegisterPayload},
    form_state::{ErrorKind, FormError, FormState},
};
use crate::api::{ApiError, ShopApi};

pub const REGISTERED_MESSAGE: &str = "Account created successfully";

/// Server action behind the sign-up form.
///
/// `previous` is the state the form currently shows; the outcome never depends on it.
pub async fn handle_register(
    api: &dyn ShopApi,
    _previous: &FormState,
    payload: RegisterPayload,
) -> FormState {
    register(api, payload).await.into()
}

async fn register(api: &dyn ShopApi, payload: RegisterPayload) -> Result<String, FormError> {
    if let Err(errors) = payload.validate() {
        let message = field_messages(&errors)
            .into_iter()
            .map(|(_, m)| m)
            .collect::<Vec<_>>()
            .join("; ");
        warn!(%message, "registration payload rejected");
        return Err(FormError::new(ErrorKind::Validation, message));
    }

    let email = payload.email.clone();
    match api.signup(&payload.into()).await {
        Ok(_) => {
            info!(%email, "account registered");
            Ok(REGISTERED_MESSAGE.to_string())
        }
        Err(ApiError::Remote { status, message }) => {
            warn!(%email, status, %message, "registration refused");
            Err(FormError::new(ErrorKind::Remote, message))
        }
        Err(e @ ApiError::Body(_)) => {
            warn!(%email, error = %e, "registration reply unreadable");
            Err(FormError::new(ErrorKind::Remote, e.to_string()))
        }
        Err(e) => {
            warn!(%email, error = %e, "registration request failed");
            Err(FormError::new(ErrorKind::Network, e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{FakeShopApi, Reply};
    use crate::register::dto::tests::valid_payload;
    use serde_json::json;
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn success_returns_succeeded_state() {
        let api = FakeShopApi::default();
        let state = handle_register(&api, &FormState::Idle, valid_payload()).await;
        assert_eq!(
            state,
            FormState::Succeeded {
                message: REGISTERED_MESSAGE.into()
            }
        );
        assert_eq!(api.signup_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn remote_refusal_keeps_remote_message() {
        let api = FakeShopApi::default().with_signup(Reply::Status(
            409,
            json!({ "statusMsg": "fail", "message": "Account Already Exists" }),
        ));
        let state = handle_register(&api, &FormState::Idle, valid_payload()).await;
        assert_eq!(
            state,
            FormState::Failed {
                kind: ErrorKind::Remote,
                message: "Account Already Exists".into()
            }
        );
    }

    #[tokio::test]
    async fn invalid_payload_never_reaches_remote() {
        let api = FakeShopApi::default();
        let payload = RegisterPayload {
            re_password: "different".into(),
            ..valid_payload()
        };
        let state = handle_register(&api, &FormState::Idle, payload).await;
        assert_eq!(state.error(), Some(ErrorKind::Validation));
        assert_eq!(state.message(), Some("Passwords do not match"));
        assert_eq!(api.signup_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn previous_state_does_not_matter() {
        let api = FakeShopApi::default();
        let previous = FormState::Failed {
            kind: ErrorKind::Remote,
            message: "Account Already Exists".into(),
        };
        let state = handle_register(&api, &previous, valid_payload()).await;
        assert!(state.is_success());
    }

    #[tokio::test]
    async fn network_failure_is_reported_not_raised() {
        use crate::api::client::tests::{api_at, dead_url};
        let api = api_at(&dead_url().await);
        let state = handle_register(&api, &FormState::Idle, valid_payload()).await;
        assert_eq!(state.error(), Some(ErrorKind::Network));
        assert!(state.message().is_some_and(|m| !m.is_empty()));
    }

    #[tokio::test]
    async fn unreadable_success_reply_is_remote_error() {
        let api = FakeShopApi::default().with_signup(Reply::Ok(json!("<html>oops</html>")));
        let state = handle_register(&api, &FormState::Idle, valid_payload()).await;
        assert_eq!(state.error(), Some(ErrorKind::Remote));
        assert_eq!(api.signup_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn works_against_http_remote() {
        use crate::api::client::tests::{api_at, spawn_remote};
        let api = api_at(&spawn_remote().await);
        let state = handle_register(&api, &FormState::Idle, valid_payload()).await;
        assert!(state.is_success());

        let taken = RegisterPayload {
            email: "taken@example.com".into(),
            ..valid_payload()
        };
        let state = handle_register(&api, &FormState::Idle, taken).await;
        assert_eq!(state.message(), Some("Account Already Exists"));
    }
}
