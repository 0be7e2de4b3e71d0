//! # PayLink Infrastructure
//!
//! I/O side of the PayLink client.
//!
//! This crate contains:
//! - HTTP transport (reqwest), request building and response normalization
//! - The `SessionClient` orchestrating every payments API operation
//! - Configuration loading from env vars and JSON/TOML files
//! - Tracing subscriber setup
//!
//! ## Architecture
//! - Types come from `paylink-domain`
//! - Credential storage and `TokenStore` come from `paylink-common`
//! - Contains all network-facing code

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;

// Re-export commonly used items
pub use api::SessionClient;
pub use errors::InfraError;
pub use http::{HttpClient, HttpTransport, PreparedRequest, RawResponse, RequestBody, RequestBuilder};
pub use observability::init_tracing;
