use anyhow::anyhow;
use tower_cookies::{
    cookie::{time::Duration as CookieDuration, SameSite},
    Cookie, Cookies, Key,
};
use tracing::{debug, warn};

use super::{claims::SessionClaims, errors::SessionError, jwt::SessionKeys};
use crate::config::{SessionConfig, MIN_SECRET_LEN};

pub const SESSION_COOKIE: &str = "storefront.session-token";

/// Where the session artifact lives between requests.
pub trait SessionStore: Send + Sync {
    /// Current session, if any. A session that is present but unusable is expired.
    fn read(&self, cookies: &Cookies) -> Option<SessionClaims>;
    fn write(&self, cookies: &Cookies, claims: &SessionClaims) -> Result<(), SessionError>;
    fn clear(&self, cookies: &Cookies);
}

/// Keeps the whole session in an HTTP-only cookie: a signed JWT, encrypted by the
/// private cookie jar so the browser cannot read the shop api token inside it.
pub struct CookieSessionStore {
    keys: SessionKeys,
    key: Key,
    secure: bool,
}

impl CookieSessionStore {
    pub fn new(config: &SessionConfig) -> anyhow::Result<Self> {
        let key = Key::try_from(config.secret.as_bytes()).map_err(|_| {
            anyhow!("SESSION_SECRET must be at least {} bytes", MIN_SECRET_LEN)
        })?;
        Ok(Self {
            keys: SessionKeys::new(config),
            key,
            secure: config.secure_cookie,
        })
    }

    fn cookie(&self, value: String, max_age: CookieDuration) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(max_age)
            .build()
    }
}

impl SessionStore for CookieSessionStore {
    fn read(&self, cookies: &Cookies) -> Option<SessionClaims> {
        cookies.get(SESSION_COOKIE)?;
        let verified = cookies
            .private(&self.key)
            .get(SESSION_COOKIE)
            .ok_or_else(|| anyhow!("session cookie does not decrypt"))
            .and_then(|cookie| self.keys.verify(cookie.value()));
        match verified {
            Ok(claims) => Some(claims),
            Err(e) => {
                warn!(error = %e, "discarding invalid session cookie");
                self.clear(cookies);
                None
            }
        }
    }

    fn write(&self, cookies: &Cookies, claims: &SessionClaims) -> Result<(), SessionError> {
        let value = self.keys.sign(claims)?;
        let ttl_secs = i64::try_from(self.keys.ttl.as_secs()).unwrap_or(i64::MAX);
        let max_age = CookieDuration::seconds(ttl_secs);
        cookies.private(&self.key).add(self.cookie(value, max_age));
        Ok(())
    }

    fn clear(&self, cookies: &Cookies) {
        debug!("clearing session cookie");
        cookies.add(self.cookie(String::new(), CookieDuration::ZERO));
    }
}
