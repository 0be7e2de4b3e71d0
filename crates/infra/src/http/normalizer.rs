//! Response normalization
//!
//! Every HTTP response, whatever its shape, becomes one
//! `OperationResult<Value>`. Error messages are picked in a fixed order:
//! `detail`, then `message`, then the raw body, then the status reason
//! phrase, then `HTTP <status>`.

use paylink_domain::{ApiError, OperationResult};
use reqwest::StatusCode;
use serde_json::Value;

const MESSAGE_FIELDS: [&str; 2] = ["detail", "message"];

/// Turn a received status and body into a success value or an [`ApiError`].
///
/// A body that is empty or not JSON is not an error by itself: on success
/// it yields `Value::Null`, on failure its raw text is kept.
///
/// # Errors
/// Returns an `Api` error for any status outside 200..=299.
pub fn normalize(status: u16, body: &str) -> OperationResult<Value> {
    let parsed = parse_body(body);

    if (200..=299).contains(&status) {
        return Ok(parsed.unwrap_or(Value::Null));
    }

    let message = error_message(status, parsed.as_ref(), body);
    let raw_body = (!body.is_empty()).then(|| body.to_string());
    Err(ApiError::from_status(status, message, raw_body))
}

fn parse_body(body: &str) -> Option<Value> {
    if body.trim().is_empty() {
        return None;
    }
    serde_json::from_str(body).ok()
}

fn error_message(status: u16, parsed: Option<&Value>, raw: &str) -> String {
    if let Some(Value::Object(fields)) = parsed {
        for name in MESSAGE_FIELDS {
            match fields.get(name) {
                None | Some(Value::Null) => {}
                Some(Value::String(text)) if text.trim().is_empty() => {}
                Some(Value::String(text)) => return text.clone(),
                // Validation errors arrive as arrays/objects; keep them readable.
                Some(other) => return other.to_string(),
            }
        }
    }

    if !raw.trim().is_empty() {
        return raw.to_string();
    }

    StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .map_or_else(|| format!("HTTP {status}"), str::to_string)
}
