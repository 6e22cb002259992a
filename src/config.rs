use std::time::Duration;

use anyhow::bail;
use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "https://ecommerce.routemisr.com/api/v1";

/// Cookie encryption keys need at least this much material.
pub const MIN_SECRET_LEN: usize = 64;

/// One year.
pub const MAX_TTL_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Clone, Deserialize)]
pub struct ShopApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    pub ttl_minutes: i64,
    pub secure_cookie: bool,
}

impl SessionConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs((self.ttl_minutes.max(0) as u64).saturating_mul(60))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.secret.len() < MIN_SECRET_LEN {
            bail!(
                "SESSION_SECRET must be at least {} bytes, got {}",
                MIN_SECRET_LEN,
                self.secret.len()
            );
        }
        if !(1..=MAX_TTL_MINUTES).contains(&self.ttl_minutes) {
            bail!(
                "SESSION_TTL_MINUTES must be between 1 and {}, got {}",
                MAX_TTL_MINUTES,
                self.ttl_minutes
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub shop_api: ShopApiConfig,
    pub session: SessionConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let shop_api = ShopApiConfig {
            base_url: std::env::var("SHOP_API_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_API_URL.into()),
            timeout_secs: std::env::var("SHOP_API_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(30),
        };
        let session = SessionConfig {
            secret: std::env::var("SESSION_SECRET")
                .map_err(|_| anyhow::anyhow!("SESSION_SECRET must be set"))?,
            ttl_minutes: match std::env::var("SESSION_TTL_MINUTES") {
                Ok(v) => v
                    .parse::<i64>()
                    .map_err(|e| anyhow::anyhow!("SESSION_TTL_MINUTES is not a number: {e}"))?,
                Err(_) => 60 * 24 * 30,
            },
            secure_cookie: std::env::var("SESSION_COOKIE_SECURE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        };
        session.validate()?;
        Ok(Self { shop_api, session })
    }
}
