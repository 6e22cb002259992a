use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::api::dto::SignupRequest;

lazy_static! {
    static ref PHONE_RE: Regex = Regex::new(r"^01[0125][0-9]{8}$").unwrap();
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        Err(ValidationError::new("phone"))
    }
}

/// Sign-up form contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterPayload {
    #[validate(length(min = 3, max = 50, message = "Name must be between 3 and 50 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub re_password: String,
    #[validate(custom(function = "validate_phone", message = "Enter a valid Egyptian mobile number"))]
    pub phone: String,
}

impl From<RegisterPayload> for SignupRequest {
    fn from(p: RegisterPayload) -> Self {
        SignupRequest {
            name: p.name,
            email: p.email,
            password: p.password,
            re_password: p.re_password,
            phone: p.phone,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegisterField {
    Name,
    Email,
    Password,
    RePassword,
    Phone,
}

impl RegisterField {
    pub const ALL: [RegisterField; 5] = [
        RegisterField::Name,
        RegisterField::Email,
        RegisterField::Password,
        RegisterField::RePassword,
        RegisterField::Phone,
    ];

    /// Name used on the wire and in form data.
    pub fn key(self) -> &'static str {
        match self {
            RegisterField::Name => "name",
            RegisterField::Email => "email",
            RegisterField::Password => "password",
            RegisterField::RePassword => "rePassword",
            RegisterField::Phone => "phone",
        }
    }

    /// Accepts both the wire name and the Rust field name used in validation reports.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "name" => Some(RegisterField::Name),
            "email" => Some(RegisterField::Email),
            "password" => Some(RegisterField::Password),
            "rePassword" | "re_password" => Some(RegisterField::RePassword),
            "phone" => Some(RegisterField::Phone),
            _ => None,
        }
    }
}

impl RegisterPayload {
    pub fn get(&self, field: RegisterField) -> &str {
        match field {
            RegisterField::Name => &self.name,
            RegisterField::Email => &self.email,
            RegisterField::Password => &self.password,
            RegisterField::RePassword => &self.re_password,
            RegisterField::Phone => &self.phone,
        }
    }

    pub fn set(&mut self, field: RegisterField, value: String) {
        match field {
            RegisterField::Name => self.name = value,
            RegisterField::Email => self.email = value,
            RegisterField::Password => self.password = value,
            RegisterField::RePassword => self.re_password = value,
            RegisterField::Phone => self.phone = value,
        }
    }
}

/// First message per failing field, in form order.
pub fn field_messages(errors: &ValidationErrors) -> Vec<(RegisterField, String)> {
    let mut out: Vec<(RegisterField, String)> = errors
        .field_errors()
        .into_iter()
        .filter_map(|(key, errs)| {
            let field = RegisterField::from_key(&key)?;
            let message = errs
                .first()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .unwrap_or_default();
            Some((field, message))
        })
        .collect();
    out.sort_by_key(|(field, _)| *field);
    out
}

/// Ordered key/value transport of a submitted form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData(Vec<(String, String)>);

impl FormData {
    pub fn append(&mut self, key: &str, value: &str) {
        self.0.push((key.to_string(), value.to_string()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.0
    }

    pub fn into_payload(self) -> RegisterPayload {
        let mut payload = RegisterPayload::default();
        for (key, value) in self.0 {
            if let Some(field) = RegisterField::from_key(&key) {
                payload.set(field, value);
            }
        }
        payload
    }
}

impl From<&RegisterPayload> for FormData {
    fn from(payload: &RegisterPayload) -> Self {
        let mut data = FormData::default();
        for field in RegisterField::ALL {
            data.append(field.key(), payload.get(field));
        }
        data
    }
}
