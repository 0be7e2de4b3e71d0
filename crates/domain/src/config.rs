//! Client configuration structures
//!
//! Loaded by `paylink_infra::config` from env vars or a JSON/TOML file. Every
//! section has defaults so a file only needs to name what differs from the
//! canonical contract.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    BALANCE_PATH, DEFAULT_API_BASE_URL, DEFAULT_KEYCHAIN_SERVICE, DEFAULT_SESSION_FILE,
    DEFAULT_TOKEN_KEY, LOGIN_PATH, SEND_PATH, SIGNUP_PATH, TRANSACTIONS_PATH,
};
use crate::errors::{PayLinkError, Result};
use crate::impl_domain_label_conversions;
use crate::types::Encoding;

/// Top-level client configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub endpoints: EndpointConfig,
    pub storage: StorageConfig,
}

/// Remote API location and transport settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Whole-request timeout; `None` waits indefinitely
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_API_BASE_URL.to_string(), timeout_secs: None, user_agent: None }
    }
}

impl ApiConfig {
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Endpoint paths and auth-call encodings of the canonical contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub signup: String,
    pub login: String,
    pub send: String,
    pub balance: String,
    pub transactions: String,
    pub signup_encoding: Encoding,
    pub login_encoding: Encoding,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            signup: SIGNUP_PATH.to_string(),
            login: LOGIN_PATH.to_string(),
            send: SEND_PATH.to_string(),
            balance: BALANCE_PATH.to_string(),
            transactions: TRANSACTIONS_PATH.to_string(),
            signup_encoding: Encoding::Json,
            login_encoding: Encoding::Json,
        }
    }
}

impl EndpointConfig {
    fn paths(&self) -> [(&'static str, &str); 5] {
        [
            ("signup", &self.signup),
            ("login", &self.login),
            ("send", &self.send),
            ("balance", &self.balance),
            ("transactions", &self.transactions),
        ]
    }
}

/// Where the credential is persisted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    #[default]
    File,
    Keychain,
}

impl_domain_label_conversions!(StorageBackend {
    Memory => "memory",
    File => "file",
    Keychain => "keychain",
});

/// Credential storage settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// File backend location
    pub path: PathBuf,
    /// The single key holding the credential
    pub key: String,
    /// Keychain backend service name
    pub keychain_service: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            path: PathBuf::from(DEFAULT_SESSION_FILE),
            key: DEFAULT_TOKEN_KEY.to_string(),
            keychain_service: DEFAULT_KEYCHAIN_SERVICE.to_string(),
        }
    }
}

impl ClientConfig {
    /// Reject configurations the client cannot run with.
    ///
    /// # Errors
    /// Returns `PayLinkError::Config` for an unparsable or non-http base URL,
    /// an endpoint not starting with `/`, or an empty storage key.
    pub fn validate(&self) -> Result<()> {
        let base = url::Url::parse(&self.api.base_url).map_err(|e| {
            PayLinkError::Config(format!("Invalid base URL '{}': {}", self.api.base_url, e))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(PayLinkError::Config(format!(
                "Unsupported base URL scheme: {}",
                base.scheme()
            )));
        }

        for (name, path) in self.endpoints.paths() {
            if !path.starts_with('/') {
                return Err(PayLinkError::Config(format!(
                    "Endpoint '{name}' must start with '/': {path}"
                )));
            }
        }

        if self.storage.key.trim().is_empty() {
            return Err(PayLinkError::Config("Storage key must not be empty".to_string()));
        }

        if self.api.timeout_secs == Some(0) {
            return Err(PayLinkError::Config("Timeout must be at least 1 second".to_string()));
        }

        Ok(())
    }
}
