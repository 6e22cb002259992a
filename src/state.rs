use crate::api::{HttpShopApi, ShopApi};
use crate::auth::store::{CookieSessionStore, SessionStore};
use crate::config::AppConfig;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub api: Arc<dyn ShopApi>,
    pub sessions: Arc<dyn SessionStore>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let api = Arc::new(HttpShopApi::new(&config.shop_api)?) as Arc<dyn ShopApi>;
        let sessions = Arc::new(CookieSessionStore::new(&config.session)?) as Arc<dyn SessionStore>;

        Ok(Self::from_parts(config, api, sessions))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        api: Arc<dyn ShopApi>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            config,
            api,
            sessions,
        }
    }

    #[cfg(test)]
    pub fn fake(api: Arc<dyn ShopApi>) -> Self {
        use crate::config::{SessionConfig, ShopApiConfig};

        let config = Arc::new(AppConfig {
            shop_api: ShopApiConfig {
                base_url: "http://fake.local".into(),
                timeout_secs: 5,
            },
            session: SessionConfig {
                secret: "test-session-secret-".repeat(4),
                ttl_minutes: 60,
                secure_cookie: false,
            },
        });
        let sessions = Arc::new(
            CookieSessionStore::new(&config.session).expect("test secret is long enough"),
        ) as Arc<dyn SessionStore>;
        Self::from_parts(config, api, sessions)
    }
}
