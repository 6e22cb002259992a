use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};

use super::{
    client::ShopApi,
    dto::{SigninRequest, SigninResponse, SignupRequest, SignupResponse},
    error::ApiError,
};

/// Canned answer for one endpoint of [`FakeShopApi`].
#[derive(Debug, Clone)]
pub enum Reply {
    Ok(Value),
    Status(u16, Value),
}

impl Reply {
    fn into_result(self) -> Result<Value, ApiError> {
        match self {
            Reply::Ok(v) => Ok(v),
            Reply::Status(code, body) => {
                let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_GATEWAY);
                Err(ApiError::remote(status, &body))
            }
        }
    }
}

/// In-memory [`ShopApi`] that records how often each endpoint was hit.
pub struct FakeShopApi {
    pub signin_reply: Mutex<Reply>,
    pub signup_reply: Mutex<Reply>,
    pub orders_reply: Mutex<Reply>,
    pub signin_calls: AtomicUsize,
    pub signup_calls: AtomicUsize,
    pub orders_calls: AtomicUsize,
    pub last_orders_user: Mutex<Option<String>>,
}

impl Default for FakeShopApi {
    fn default() -> Self {
        Self {
            signin_reply: Mutex::new(Reply::Ok(json!({
                "message": "success",
                "user": { "name": "A", "email": "a@b.com", "role": "user" },
                "token": "h.eyJpZCI6IjEyMyJ9.s",
            }))),
            signup_reply: Mutex::new(Reply::Ok(json!({ "message": "success", "user": {} }))),
            orders_reply: Mutex::new(Reply::Ok(json!([]))),
            signin_calls: AtomicUsize::new(0),
            signup_calls: AtomicUsize::new(0),
            orders_calls: AtomicUsize::new(0),
            last_orders_user: Mutex::new(None),
        }
    }
}

impl FakeShopApi {
    pub fn with_signin(self, reply: Reply) -> Self {
        *self.signin_reply.lock().unwrap() = reply;
        self
    }

    pub fn with_signup(self, reply: Reply) -> Self {
        *self.signup_reply.lock().unwrap() = reply;
        self
    }

    pub fn with_orders(self, reply: Reply) -> Self {
        *self.orders_reply.lock().unwrap() = reply;
        self
    }
}

#[async_trait]
impl ShopApi for FakeShopApi {
    async fn signin(&self, _req: &SigninRequest) -> Result<SigninResponse, ApiError> {
        self.signin_calls.fetch_add(1, Ordering::SeqCst);
        let body = self.signin_reply.lock().unwrap().clone().into_result()?;
        Ok(serde_json::from_value(body)?)
    }

    async fn signup(&self, _req: &SignupRequest) -> Result<SignupResponse, ApiError> {
        self.signup_calls.fetch_add(1, Ordering::SeqCst);
        let body = self.signup_reply.lock().unwrap().clone().into_result()?;
        Ok(serde_json::from_value(body)?)
    }

    async fn user_orders(&self, user_id: &str) -> Result<Value, ApiError> {
        self.orders_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_orders_user.lock().unwrap() = Some(user_id.to_string());
        self.orders_reply.lock().unwrap().clone().into_result()
    }
}
