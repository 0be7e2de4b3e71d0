//! Session-aware client for the PayLink payments API
//!
//! # Architecture
//!
//! - [`SessionClient`] is the only entry point a UI layer calls
//! - Requests go through `http::RequestBuilder` → `HttpTransport` →
//!   `http::normalize`, then successful login/signup bodies update the
//!   `TokenStore`
//! - No retries, no background work; each operation is one awaited call
//!   (two for the balance POST fallback)

pub mod session_client;

pub use session_client::SessionClient;
