//! Payloads of the payments API operations
//!
//! Each request validates itself locally so that client-invalid input never
//! costs a network round trip.

use std::fmt;

use serde_json::Value;

use super::request::Payload;
use crate::errors::ApiError;

fn require(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        Err(ApiError::validation(format!("{field} is required")))
    } else {
        Ok(())
    }
}

/// Account creation fields
#[derive(Clone, PartialEq, Eq)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    /// Payment address to register, when the server expects one
    pub upi_id: Option<String>,
}

impl SignupRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into(), upi_id: None }
    }

    #[must_use]
    pub fn with_upi_id(mut self, upi_id: impl Into<String>) -> Self {
        self.upi_id = Some(upi_id.into());
        self
    }

    /// # Errors
    /// Returns a validation error when a required field is blank.
    pub fn validate(&self) -> Result<(), ApiError> {
        require("username", &self.username)?;
        require("password", &self.password)?;
        if let Some(upi_id) = &self.upi_id {
            require("upi_id", upi_id)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn to_payload(&self) -> Payload {
        let mut payload = Payload::new();
        payload.insert("username".into(), Value::String(self.username.clone()));
        payload.insert("password".into(), Value::String(self.password.clone()));
        if let Some(upi_id) = &self.upi_id {
            payload.insert("upi_id".into(), Value::String(upi_id.clone()));
        }
        payload
    }
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("upi_id", &self.upi_id)
            .finish()
    }
}

/// Login fields
#[derive(Clone, PartialEq, Eq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }

    /// # Errors
    /// Returns a validation error when a required field is blank.
    pub fn validate(&self) -> Result<(), ApiError> {
        require("username", &self.username)?;
        require("password", &self.password)
    }

    #[must_use]
    pub fn to_payload(&self) -> Payload {
        let mut payload = Payload::new();
        payload.insert("username".into(), Value::String(self.username.clone()));
        payload.insert("password".into(), Value::String(self.password.clone()));
        payload
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Transfer to another account
#[derive(Debug, Clone, PartialEq)]
pub struct SendMoneyRequest {
    pub to: String,
    pub amount: f64,
}

impl SendMoneyRequest {
    pub fn new(to: impl Into<String>, amount: f64) -> Self {
        Self { to: to.into(), amount }
    }

    /// # Errors
    /// Returns a validation error for a blank recipient or a non-positive,
    /// non-finite amount.
    pub fn validate(&self) -> Result<(), ApiError> {
        require("to", &self.to)?;
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(ApiError::validation("amount must be a positive number"));
        }
        Ok(())
    }

    #[must_use]
    pub fn to_payload(&self) -> Payload {
        let mut payload = Payload::new();
        payload.insert("to".into(), Value::String(self.to.clone()));
        payload.insert("amount".into(), Value::from(self.amount));
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn login_requires_both_fields() {
        let err = LoginRequest::new("", "pw").validate().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "username is required");

        let err = LoginRequest::new("alice", "  ").validate().unwrap_err();
        assert_eq!(err.message, "password is required");

        assert!(LoginRequest::new("alice", "pw").validate().is_ok());
    }

    #[test]
    fn signup_payload_includes_upi_id_only_when_set() {
        let plain = SignupRequest::new("alice", "pw").to_payload();
        assert!(!plain.contains_key("upi_id"));

        let with_upi = SignupRequest::new("alice", "pw").with_upi_id("alice@upi").to_payload();
        assert_eq!(with_upi["upi_id"], "alice@upi");
    }

    #[test]
    fn signup_rejects_blank_upi_id() {
        let err = SignupRequest::new("alice", "pw").with_upi_id(" ").validate().unwrap_err();
        assert_eq!(err.message, "upi_id is required");
    }

    #[test]
    fn send_money_rejects_bad_amounts() {
        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = SendMoneyRequest::new("bob", amount).validate().unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation);
        }
        assert!(SendMoneyRequest::new("bob", 10.0).validate().is_ok());
        assert!(SendMoneyRequest::new("", 10.0).validate().is_err());
    }

    #[test]
    fn debug_redacts_passwords() {
        let printed = format!("{:?}", LoginRequest::new("alice", "hunter2"));
        assert!(printed.contains("alice"));
        assert!(!printed.contains("hunter2"));
    }
}
