//! Description of one outbound API call
//!
//! An [`OperationRequest`] is built by the session client, turned into a wire
//! request by the infra request builder, sent once and discarded.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::impl_domain_label_conversions;

/// Field name → value mapping sent as the request body
pub type Payload = Map<String, Value>;

/// HTTP methods used by the payments API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body encoding for an outbound request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Encoding {
    #[default]
    Json,
    FormUrlencoded,
    Multipart,
}

impl_domain_label_conversions!(Encoding {
    Json => "json",
    FormUrlencoded => "form-urlencoded",
    Multipart => "multipart",
});

/// One outbound call: where it goes, what it carries, whether it needs auth
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRequest {
    pub endpoint: String,
    pub method: HttpMethod,
    pub requires_auth: bool,
    pub payload: Payload,
    pub query: Vec<(String, String)>,
    pub encoding: Encoding,
}

impl OperationRequest {
    /// Start a request with an empty payload and JSON encoding.
    pub fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
            requires_auth: false,
            payload: Payload::new(),
            query: Vec::new(),
            encoding: Encoding::Json,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, endpoint)
    }

    /// Mark the request as requiring the bearer credential.
    #[must_use]
    pub fn authenticated(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    #[must_use]
    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(name.into(), value.into());
        self
    }

    /// Append a query parameter; the request builder percent-encodes it.
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn encoded_as(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Whether there is anything to put in the body.
    #[must_use]
    pub fn has_body(&self) -> bool {
        self.method != HttpMethod::Get && !self.payload.is_empty()
    }
}
