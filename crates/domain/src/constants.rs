//! Application constants
//!
//! Defaults for the canonical payments API contract and the credential
//! storage boundary.

// API defaults
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_USER_AGENT: &str = concat!("paylink/", env!("CARGO_PKG_VERSION"));

// Canonical endpoint paths
pub const SIGNUP_PATH: &str = "/signup";
pub const LOGIN_PATH: &str = "/login";
pub const SEND_PATH: &str = "/send";
pub const BALANCE_PATH: &str = "/balance";
pub const TRANSACTIONS_PATH: &str = "/me/transactions";

// Credential storage
pub const DEFAULT_TOKEN_KEY: &str = "authToken";
pub const DEFAULT_SESSION_FILE: &str = "paylink-session.json";
pub const DEFAULT_KEYCHAIN_SERVICE: &str = "PayLink.session";

/// Token fields checked, in order, on a login/signup response body.
pub const TOKEN_FIELDS: [&str; 2] = ["access_token", "token"];

/// Message carried by the fail-fast error for unauthenticated calls.
pub const NOT_AUTHENTICATED_MESSAGE: &str = "not authenticated";

/// Balance lookup statuses that trigger the POST fallback.
pub const BALANCE_FALLBACK_STATUSES: [u16; 2] = [405, 400];
