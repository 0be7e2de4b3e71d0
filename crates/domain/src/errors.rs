//! Error types used throughout the client
//!
//! Two families live here:
//! - [`ApiError`]: the normalized failure every session operation returns.
//!   It never escapes as a panic; callers match on it.
//! - [`PayLinkError`]: setup-time failures (configuration, client
//!   construction) raised before any session operation exists.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::NOT_AUTHENTICATED_MESSAGE;
use crate::impl_domain_label_conversions;

/// Main setup error type for PayLink
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum PayLinkError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Result type alias for PayLink setup operations
pub type Result<T> = std::result::Result<T, PayLinkError>;

/// Failure taxonomy carried by every [`ApiError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Missing or invalid input, rejected before any network call
    Validation,
    /// Auth-required operation attempted without a credential
    AuthRequired,
    /// Request never reached the server or no response came back
    Transport,
    /// Server answered with a non-2xx status
    Api,
    /// Credential could not be written to persistent storage
    Storage,
}

impl_domain_label_conversions!(ErrorKind {
    Validation => "validation",
    AuthRequired => "auth_required",
    Transport => "transport",
    Api => "api",
    Storage => "storage",
});

/// Normalized failure returned by every session operation
///
/// `status_code` is `None` whenever no HTTP response was received
/// (validation, missing credential, transport failure).
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub status_code: Option<u16>,
    pub message: String,
    pub raw_body: Option<String>,
}

/// Outcome of one session operation: `Ok` is Success, `Err` is Failure.
pub type OperationResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Local input rejected before a request was built.
    pub fn validation(message: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Validation, status_code: None, message: message.into(), raw_body: None }
    }

    /// Auth-required operation attempted with no stored credential.
    #[must_use]
    pub fn not_authenticated() -> Self {
        Self {
            kind: ErrorKind::AuthRequired,
            status_code: None,
            message: NOT_AUTHENTICATED_MESSAGE.to_string(),
            raw_body: None,
        }
    }

    /// The request never completed (DNS, refused connection, timeout).
    pub fn transport(message: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Transport, status_code: None, message: message.into(), raw_body: None }
    }

    /// The server answered with a non-success status.
    pub fn from_status(status: u16, message: impl Into<String>, raw_body: Option<String>) -> Self {
        Self { kind: ErrorKind::Api, status_code: Some(status), message: message.into(), raw_body }
    }

    /// The credential could not be persisted.
    pub fn storage(message: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Storage, status_code: None, message: message.into(), raw_body: None }
    }

    /// Whether the server ever produced a response for this failure.
    #[must_use]
    pub const fn has_response(&self) -> bool {
        self.status_code.is_some()
    }

    /// Whether the server rejected the credential (401/403).
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status_code, Some(401 | 403))
    }

    /// Hint for callers deciding whether to offer a retry.
    ///
    /// The client itself never retries.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self.kind {
            ErrorKind::Transport => true,
            ErrorKind::Api => matches!(self.status_code, Some(429 | 500..=599)),
            ErrorKind::Validation | ErrorKind::AuthRequired | ErrorKind::Storage => false,
        }
    }

    /// Stable label suitable for log fields.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.kind.as_str()
    }
}

impl From<PayLinkError> for ApiError {
    fn from(err: PayLinkError) -> Self {
        match err {
            PayLinkError::Network(message) => Self::transport(message),
            PayLinkError::Storage(message) => Self::storage(message),
            other @ PayLinkError::Config(_) => Self::validation(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_authenticated_has_no_status() {
        let err = ApiError::not_authenticated();
        assert_eq!(err.kind, ErrorKind::AuthRequired);
        assert_eq!(err.status_code, None);
        assert_eq!(err.message, "not authenticated");
        assert!(!err.has_response());
    }

    #[test]
    fn display_is_the_message() {
        let err = ApiError::from_status(401, "bad credentials", None);
        assert_eq!(err.to_string(), "bad credentials");
        assert!(err.is_unauthorized());
    }

    #[test]
    fn retry_hints() {
        assert!(ApiError::transport("connection refused").is_retryable());
        assert!(ApiError::from_status(503, "down", None).is_retryable());
        assert!(ApiError::from_status(429, "slow down", None).is_retryable());
        assert!(!ApiError::from_status(400, "Insufficient balance", None).is_retryable());
        assert!(!ApiError::validation("amount must be positive").is_retryable());
        assert!(!ApiError::not_authenticated().is_retryable());
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(ApiError::not_authenticated().label(), "auth_required");
        assert_eq!(ApiError::storage("disk full").label(), "storage");
        assert_eq!("AUTH_REQUIRED".parse::<ErrorKind>().unwrap(), ErrorKind::AuthRequired);
    }

    #[test]
    fn setup_errors_convert_to_operation_errors() {
        let err: ApiError = PayLinkError::Storage("locked".into()).into();
        assert_eq!(err.kind, ErrorKind::Storage);

        let err: ApiError = PayLinkError::Network("dns".into()).into();
        assert_eq!(err.kind, ErrorKind::Transport);
        assert_eq!(err.message, "dns");
    }

    #[test]
    fn config_errors_are_not_transport_failures() {
        let err: ApiError = PayLinkError::Config("Invalid base URL 'x'".into()).into();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.status_code, None);
        assert_eq!(err.message, "Configuration error: Invalid base URL 'x'");
        assert!(!err.is_retryable());
    }

    #[test]
    fn serializes_with_snake_case_kind() {
        let json = serde_json::to_value(ApiError::not_authenticated()).unwrap();
        assert_eq!(json["kind"], "auth_required");
        assert!(json["status_code"].is_null());
    }
}
