//! Client-side model of the sign-up form.
//!
//! [`RegisterForm`] holds field values, per-field validation messages and the two flags
//! that keep the submit control disabled: `submitting` (set when the user submits) and
//! `pending` (set while the action is scheduled). Every new action result goes through
//! [`RegisterForm::apply_result`], which clears both flags and returns every effect the
//! UI has to perform for that result.

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
    time::Duration,
};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;
use validator::Validate;

use super::{
    dto::{field_messages, FormData, RegisterField, RegisterPayload},
    form_state::FormState,
    services::handle_register,
};
use crate::api::ShopApi;

pub const LOGIN_PATH: &str = "/login";
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEffect {
    Toast { level: ToastLevel, message: String },
    Navigate { to: &'static str, after: Duration },
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    values: RegisterPayload,
    errors: BTreeMap<RegisterField, String>,
    dirty: BTreeSet<RegisterField>,
    submitting: bool,
    pending: bool,
    state: FormState,
}

impl RegisterForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &RegisterPayload {
        &self.values
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Updates one field and re-validates.
    pub fn set_field(&mut self, field: RegisterField, value: impl Into<String>) {
        self.values.set(field, value.into());
        self.dirty.insert(field);
        self.revalidate(false);
    }

    /// Validation message currently shown under `field`.
    pub fn error(&self, field: RegisterField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_valid(&self) -> bool {
        self.values.validate().is_ok()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn is_submit_disabled(&self) -> bool {
        self.submitting || self.pending
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submit_disabled() {
            "Creating Account..."
        } else {
            "Sign Up"
        }
    }

    /// Transcribes the form for dispatch, or `None` when it must not be sent.
    pub fn submit(&mut self) -> Option<FormData> {
        if self.is_submit_disabled() {
            debug!("submit ignored while a submission is in flight");
            return None;
        }
        self.dirty.extend(RegisterField::ALL);
        self.revalidate(true);
        if !self.errors.is_empty() {
            debug!(invalid = self.errors.len(), "submit blocked by validation");
            return None;
        }
        self.submitting = true;
        Some(FormData::from(&self.values))
    }

    pub fn begin_pending(&mut self) {
        self.pending = true;
    }

    /// Takes a new action result and returns the effects it calls for.
    pub fn apply_result(&mut self, state: FormState) -> Vec<FormEffect> {
        self.submitting = false;
        self.pending = false;

        let effects = match &state {
            FormState::Succeeded { message } if !message.is_empty() => vec![
                FormEffect::Toast {
                    level: ToastLevel::Success,
                    message: message.clone(),
                },
                FormEffect::Navigate {
                    to: LOGIN_PATH,
                    after: REDIRECT_DELAY,
                },
            ],
            FormState::Failed { message, .. } if !message.is_empty() => vec![FormEffect::Toast {
                level: ToastLevel::Error,
                message: message.clone(),
            }],
            _ => Vec::new(),
        };
        self.state = state;
        effects
    }

    fn revalidate(&mut self, all: bool) {
        self.errors.clear();
        if let Err(errors) = self.values.validate() {
            for (field, message) in field_messages(&errors) {
                if all || self.dirty.contains(&field) {
                    self.errors.insert(field, message);
                }
            }
        }
    }
}

/// Something that can run the registration action for a submitted form.
#[async_trait]
pub trait RegisterAction: Send + Sync {
    async fn dispatch(&self, previous: &FormState, form: FormData) -> FormState;
}

/// Runs [`handle_register`] in-process against the shop api.
pub struct ServerRegisterAction {
    api: Arc<dyn ShopApi>,
}

impl ServerRegisterAction {
    pub fn new(api: Arc<dyn ShopApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl RegisterAction for ServerRegisterAction {
    async fn dispatch(&self, previous: &FormState, form: FormData) -> FormState {
        handle_register(self.api.as_ref(), previous, form.into_payload()).await
    }
}

/// Couples a form with an action; concurrent submits while one is in flight do nothing.
pub struct RegisterFlow<A> {
    form: Mutex<RegisterForm>,
    action: A,
}

impl<A: RegisterAction> RegisterFlow<A> {
    pub fn new(action: A) -> Self {
        Self {
            form: Mutex::new(RegisterForm::new()),
            action,
        }
    }

    pub async fn set_field(&self, field: RegisterField, value: impl Into<String>) {
        self.form.lock().await.set_field(field, value);
    }

    pub async fn snapshot(&self) -> RegisterForm {
        self.form.lock().await.clone()
    }

    /// Submits the form. Returns `None` if nothing was dispatched.
    pub async fn submit(&self) -> Option<Vec<FormEffect>> {
        let (data, previous) = {
            let mut form = self.form.lock().await;
            let data = form.submit()?;
            form.begin_pending();
            (data, form.state().clone())
        };

        let state = self.action.dispatch(&previous, data).await;
        Some(self.form.lock().await.apply_result(state))
    }
}
