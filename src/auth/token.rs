//! Local decoding of the shop api's bearer token.
//!
//! The token is never verified here: its signature belongs to the shop api. We only read
//! the payload segment to learn the user id the api associates with the session.

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use serde_json::{Map, Value};
use thiserror::Error;

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

#[derive(Debug, Error)]
pub enum TokenDecodeError {
    #[error("bearer token has {0} segments, expected 3")]
    Segments(usize),
    #[error("bearer token payload is not base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("bearer token payload is not a JSON object: {0}")]
    Json(#[from] serde_json::Error),
    #[error("bearer token payload has no id")]
    MissingId,
}

/// Decoded middle segment of a bearer token.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenPayload {
    pub id: String,
    pub claims: Map<String, Value>,
}

pub fn decode_token_payload(token: &str) -> Result<TokenPayload, TokenDecodeError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(TokenDecodeError::Segments(segments.len()));
    }

    // padding is optional; some issuers use the standard alphabet
    let payload = segments[1];
    let engine = if payload.contains(|c: char| c == '+' || c == '/') {
        &STANDARD_LENIENT
    } else {
        &URL_SAFE_LENIENT
    };
    let bytes = engine.decode(payload)?;
    let claims: Map<String, Value> = serde_json::from_slice(&bytes)?;

    let id = match claims.get("id") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return Err(TokenDecodeError::MissingId),
    };

    Ok(TokenPayload { id, claims })
}
