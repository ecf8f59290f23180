//! Decoding of raw provider configuration embedded in orchestrator resources.

use crate::field::{BadValue, FieldError, FieldPath};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Why a provider config could not be decoded
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("{kind} must be a JSON object, found {found}")]
    NotAnObject {
        kind: &'static str,
        found: &'static str,
    },

    #[error("{kind} is malformed: {source}")]
    Malformed {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Decode a raw provider config into its typed form
///
/// `kind` names the config in error messages (e.g. "InfrastructureConfig").
///
/// # Errors
///
/// Returns a [`DecodeError`] (with context) when `raw` is not an object or
/// does not match the typed schema.
pub fn decode_provider_config<T: DeserializeOwned>(raw: &Value, kind: &'static str) -> Result<T> {
    if !raw.is_object() {
        return Err(DecodeError::NotAnObject {
            kind,
            found: json_type(raw),
        })
        .context(format!("could not decode {kind}"));
    }
    serde_json::from_value(raw.clone())
        .map_err(|source| DecodeError::Malformed { kind, source })
        .with_context(|| format!("could not decode {kind}"))
}

/// Decode a raw provider config, reporting failure as `Invalid` at `path`
///
/// # Errors
///
/// Returns an `Invalid` [`FieldError`] carrying the raw value and the decode
/// error chain.
pub fn decode_at<T: DeserializeOwned>(
    raw: &Value,
    kind: &'static str,
    path: &FieldPath,
) -> Result<T, FieldError> {
    decode_provider_config(raw, kind)
        .map_err(|e| FieldError::invalid(path, BadValue::Value(raw.clone()), format!("{e:#}")))
}
