//! Value parsers for command-line arguments.

use tradebot_core::error::InvalidInputError;
use tradebot_core::models::{Config, SecretFields};
use tradebot_http::Method;

/// Parse a `key=value` credential field.
pub fn key_value(s: &str) -> Result<(String, String), InvalidInputError> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(InvalidInputError::Other {
            message: format!("expected key=value, got '{}'", s),
        }),
    }
}

/// Parse a `Name: value` header.
pub fn header(s: &str) -> Result<(String, String), InvalidInputError> {
    match s.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(InvalidInputError::Header {
            name: s.to_string(),
            reason: "expected 'Name: value'".to_string(),
        }),
    }
}

/// Parse a JSON object used as a record's `config`.
pub fn config_object(s: &str) -> Result<Config, InvalidInputError> {
    match serde_json::from_str(s) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(_) => Err(InvalidInputError::Other {
            message: "config must be a JSON object".to_string(),
        }),
        Err(e) => Err(InvalidInputError::Other {
            message: format!("invalid config JSON: {}", e),
        }),
    }
}

/// Parse an HTTP method name, case-insensitively.
pub fn method(s: &str) -> Result<Method, InvalidInputError> {
    Method::from_bytes(s.to_ascii_uppercase().as_bytes()).map_err(|e| InvalidInputError::Other {
        message: format!("invalid HTTP method '{}': {}", s, e),
    })
}

pub fn secret_fields(pairs: Vec<(String, String)>) -> SecretFields {
    pairs.into_iter().collect()
}
