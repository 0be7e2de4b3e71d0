//! Conversions from external infrastructure errors into domain errors.

use paylink_domain::{ApiError, PayLinkError};
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain errors.
#[derive(Debug)]
pub struct InfraError(pub ApiError);

impl From<InfraError> for ApiError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<InfraError> for PayLinkError {
    fn from(value: InfraError) -> Self {
        PayLinkError::Network(value.0.message)
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ApiError */
/* -------------------------------------------------------------------------- */

impl From<HttpError> for InfraError {
    fn from(err: HttpError) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {err}")
        } else if err.is_connect() {
            format!("connection failed: {err}")
        } else if err.is_builder() {
            format!("invalid request: {err}")
        } else if err.is_body() || err.is_decode() {
            format!("failed to read response body: {err}")
        } else {
            format!("request failed: {err}")
        };

        InfraError(ApiError::transport(message))
    }
}
