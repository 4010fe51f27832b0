//! Payload validation for the avatar token exchange and the voice catalog.
//!
//! Shapes are checked with `validator` after deserialisation; a payload that
//! deserialises but breaks a rule is rejected, never coerced.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::error::{ExtrasError, Result};

/// Raw body of the access-token route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct AccessToken {
    #[validate(length(min = 1, message = "access token must not be empty"))]
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct HeygenTokenData {
    pub token: String,
}

/// Upstream `streaming.create_token` reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct HeygenCreateTokenResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[validate(nested)]
    pub data: HeygenTokenData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Voice {
    pub voice_id: String,
    pub language: String,
    pub gender: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub preview_audio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_pause: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion_support: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_locale: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct VoicesResponse {
    #[validate(nested)]
    pub voices: Vec<Voice>,
}

/// Deserialise `value` as `T` and run its validation rules.
pub fn parse<T>(value: &Value) -> Result<T>
where
    T: DeserializeOwned + Validate,
{
    let parsed: T = serde_json::from_value(value.clone())
        .map_err(|e| ExtrasError::SchemaValidation(format!("unexpected shape: {e}")))?;
    parsed
        .validate()
        .map_err(|e| ExtrasError::SchemaValidation(e.to_string()))?;
    Ok(parsed)
}

/// Like [`parse`], from a JSON string.
pub fn parse_str<T>(raw: &str) -> Result<T>
where
    T: DeserializeOwned + Validate,
{
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| ExtrasError::SchemaValidation(format!("invalid JSON: {e}")))?;
    parse(&value)
}

/// Validate the plain-text body returned by the access-token route.
pub fn parse_access_token(body: &str) -> Result<String> {
    let token = AccessToken {
        token: body.to_string(),
    };
    token
        .validate()
        .map_err(|e| ExtrasError::SchemaValidation(e.to_string()))?;
    Ok(token.token)
}
