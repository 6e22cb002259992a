use serde::{Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    #[serde(rename = "validation_error")]
    Validation,
    #[serde(rename = "remote_error")]
    Remote,
    #[serde(rename = "network_error")]
    Network,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FormError {
    pub kind: ErrorKind,
    pub message: String,
}

impl FormError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Outcome of a server action as handed back to the form.
///
/// Serializes to `{"success": bool, "error": kind | null, "message": string | null}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Idle,
    Succeeded {
        message: String,
    },
    Failed {
        kind: ErrorKind,
        message: String,
    },
}

impl FormState {
    pub fn is_success(&self) -> bool {
        matches!(self, FormState::Succeeded { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            FormState::Idle => None,
            FormState::Succeeded { message } | FormState::Failed { message, .. } => {
                Some(message.as_str())
            }
        }
    }

    pub fn error(&self) -> Option<ErrorKind> {
        match self {
            FormState::Failed { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

impl From<Result<String, FormError>> for FormState {
    fn from(result: Result<String, FormError>) -> Self {
        match result {
            Ok(message) => FormState::Succeeded { message },
            Err(FormError { kind, message }) => FormState::Failed { kind, message },
        }
    }
}

#[derive(Serialize)]
struct Envelope<'a> {
    success: bool,
    error: Option<ErrorKind>,
    message: Option<&'a str>,
}

impl Serialize for FormState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Envelope {
            success: self.is_success(),
            error: self.error(),
            message: self.message(),
        }
        .serialize(serializer)
    }
}
