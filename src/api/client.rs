use std::time::Duration;

use async_trait::async_trait;
use anyhow::bail;
use reqwest::{header::CONTENT_TYPE, Client, Response, Url};
use serde_json::Value;
use tracing::{debug, warn};

use super::{
    dto::{SigninRequest, SigninResponse, SignupRequest, SignupResponse},
    error::ApiError,
};
use crate::config::ShopApiConfig;

#[async_trait]
pub trait ShopApi: Send + Sync {
    async fn signin(&self, req: &SigninRequest) -> Result<SigninResponse, ApiError>;
    async fn signup(&self, req: &SignupRequest) -> Result<SignupResponse, ApiError>;
    /// Raw order list of one user, exactly as the service returned it.
    async fn user_orders(&self, user_id: &str) -> Result<Value, ApiError>;
}

#[derive(Clone)]
pub struct HttpShopApi {
    client: Client,
    base_url: Url,
}

impl HttpShopApi {
    pub fn new(config: &ShopApiConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            bail!("shop api url {} cannot take a path", base_url);
        }
        Ok(Self { client, base_url })
    }

    /// Appends `segments` to the base path, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // always Ok, `new` rejects cannot-be-a-base urls
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn read_json(res: Response) -> Result<Value, ApiError> {
        let status = res.status();
        let bytes = res.bytes().await?;
        if !status.is_success() {
            let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            let err = ApiError::remote(status, &body);
            warn!(%status, error = %err, "shop api returned an error");
            return Err(err);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl ShopApi for HttpShopApi {
    async fn signin(&self, req: &SigninRequest) -> Result<SigninResponse, ApiError> {
        debug!("POST /auth/signin");
        let res = self
            .client
            .post(self.url(&["auth", "signin"]))
            .json(req)
            .send()
            .await?;
        let body = Self::read_json(res).await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn signup(&self, req: &SignupRequest) -> Result<SignupResponse, ApiError> {
        debug!("POST /auth/signup");
        let res = self
            .client
            .post(self.url(&["auth", "signup"]))
            .json(req)
            .send()
            .await?;
        let body = Self::read_json(res).await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn user_orders(&self, user_id: &str) -> Result<Value, ApiError> {
        debug!(%user_id, "GET /orders/user");
        let res = self
            .client
            .get(self.url(&["orders", "user", user_id]))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;
        Self::read_json(res).await
    }
}
