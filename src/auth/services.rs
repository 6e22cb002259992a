use std::time::Duration;

use time::OffsetDateTime;
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

use super::{
    claims::SessionClaims,
    dto::{Credentials, Identity, Session},
    errors::AuthError,
    token::decode_token_payload,
};
use crate::api::{dto::SigninRequest, ShopApi};

/// Credentials provider: trades email and password for a verified identity.
pub async fn authorize(api: &dyn ShopApi, credentials: &Credentials) -> Result<Identity, AuthError> {
    if credentials.validate().is_err() {
        return Err(AuthError::MissingCredentials);
    }

    let res = api
        .signin(&SigninRequest {
            email: credentials.email.clone(),
            password: credentials.password.clone(),
        })
        .await
        .map_err(|e| {
            warn!(error = %e, "signin failed");
            AuthError::from(e)
        })?;

    let payload = decode_token_payload(&res.token).map_err(|e| {
        warn!(error = %e, "signin returned an unreadable token");
        e
    })?;
    info!(user_id = %payload.id, "credentials authorized");

    Ok(Identity {
        id: payload.id,
        user: res.user,
        token: res.token,
    })
}

/// Builds or refreshes the persisted session.
///
/// With an identity (first login) a new session is issued from it. Without one the
/// existing session keeps its contents and only its expiry slides forward.
pub fn enrich_token(
    existing: Option<SessionClaims>,
    identity: Option<&Identity>,
    ttl: Duration,
) -> Option<SessionClaims> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
    let exp = now.saturating_add(ttl_secs) as usize;
    match (identity, existing) {
        (Some(identity), _) => Some(SessionClaims {
            sub: identity.id.clone(),
            user: identity.user.clone(),
            token: identity.token.clone(),
            iat: now as usize,
            exp,
            jti: Uuid::new_v4(),
        }),
        (None, Some(claims)) => {
            debug!(session_id = %claims.jti, "session refreshed");
            Some(SessionClaims { exp, ..claims })
        }
        (None, None) => None,
    }
}

/// Projects the persisted session into what handlers and the browser get to see.
pub fn materialize_session(claims: &SessionClaims) -> Session {
    let expires = OffsetDateTime::from_unix_timestamp(claims.exp as i64)
        .unwrap_or(OffsetDateTime::UNIX_EPOCH);
    Session {
        user_id: claims.sub.clone(),
        user: claims.user.clone(),
        token: claims.token.clone(),
        expires,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{FakeShopApi, Reply};
    use serde_json::json;
    use std::sync::atomic::Ordering;

    fn creds(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn authorize_returns_decoded_identity() {
        let api = FakeShopApi::default().with_signin(Reply::Ok(json!({
            "token": "h.eyJpZCI6IjEyMyJ9.s",
            "user": { "name": "A" },
        })));
        let identity = authorize(&api, &creds("a@b.com", "x")).await.expect("authorize");
        assert_eq!(
            identity,
            Identity {
                id: "123".into(),
                user: json!({ "name": "A" }),
                token: "h.eyJpZCI6IjEyMyJ9.s".into(),
            }
        );
    }

    #[tokio::test]
    async fn authorize_surfaces_remote_message() {
        let api = FakeShopApi::default().with_signin(Reply::Status(
            401,
            json!({ "statusMsg": "fail", "message": "Incorrect email or password" }),
        ));
        let err = authorize(&api, &creds("a@b.com", "bad")).await.unwrap_err();
        assert!(matches!(err, AuthError::Remote(_)));
        assert_eq!(err.to_string(), "Incorrect email or password");
    }

    #[tokio::test]
    async fn authorize_fails_on_malformed_token() {
        let api = FakeShopApi::default().with_signin(Reply::Ok(json!({
            "token": "garbage",
            "user": { "name": "A" },
        })));
        let err = authorize(&api, &creds("a@b.com", "x")).await.unwrap_err();
        assert!(matches!(err, AuthError::TokenDecode(_)));
    }

    #[tokio::test]
    async fn authorize_requires_both_fields_without_calling_remote() {
        let api = FakeShopApi::default();
        let err = authorize(&api, &creds("", "x")).await.unwrap_err();
        assert!(matches!(err, AuthError::MissingCredentials));
        let err = authorize(&api, &creds("a@b.com", "")).await.unwrap_err();
        assert!(matches!(err, AuthError::MissingCredentials));
        assert_eq!(api.signin_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn authorize_network_failure_is_network_error() {
        use crate::api::client::tests::{api_at, dead_url};
        let api = api_at(&dead_url().await);
        let err = authorize(&api, &creds("a@b.com", "x")).await.unwrap_err();
        assert!(matches!(err, AuthError::Network(_)));
    }

    fn identity() -> Identity {
        Identity {
            id: "123".into(),
            user: json!({ "name": "A" }),
            token: "h.eyJpZCI6IjEyMyJ9.s".into(),
        }
    }

    #[test]
    fn enrich_copies_identity_on_first_login() {
        let claims = enrich_token(None, Some(&identity()), Duration::from_secs(60)).expect("issued");
        assert_eq!(claims.sub, "123");
        assert_eq!(claims.user, json!({ "name": "A" }));
        assert_eq!(claims.token, "h.eyJpZCI6IjEyMyJ9.s");
        assert_eq!(claims.exp - claims.iat, 60);
    }

    #[test]
    fn enrich_without_identity_keeps_contents() {
        let mut first = enrich_token(None, Some(&identity()), Duration::from_secs(60)).expect("issued");
        first.exp -= 30;
        let refreshed = enrich_token(Some(first.clone()), None, Duration::from_secs(60)).expect("kept");
        assert_eq!(refreshed.sub, first.sub);
        assert_eq!(refreshed.user, first.user);
        assert_eq!(refreshed.token, first.token);
        assert_eq!(refreshed.jti, first.jti);
        assert_eq!(refreshed.iat, first.iat);
        assert!(refreshed.exp > first.exp);
    }

    #[test]
    fn enrich_with_huge_ttl_saturates_expiry() {
        let claims = enrich_token(None, Some(&identity()), Duration::from_secs(u64::MAX)).expect("issued");
        assert_eq!(claims.exp, i64::MAX as usize);
    }

    #[test]
    fn enrich_without_anything_yields_nothing() {
        assert!(enrich_token(None, None, Duration::from_secs(60)).is_none());
    }

    #[test]
    fn materialize_exposes_user() {
        let claims = enrich_token(None, Some(&identity()), Duration::from_secs(60)).expect("issued");
        let session = materialize_session(&claims);
        assert_eq!(session.user_id, "123");
        assert_eq!(session.user, json!({ "name": "A" }));
        assert_eq!(session.expires.unix_timestamp(), claims.exp as i64);

        let json = serde_json::to_value(&session).unwrap();
        assert!(json.get("token").is_none());
    }
}
