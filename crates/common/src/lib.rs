//! Shared building blocks for PayLink crates.
//!
//! # Feature Tiers
//!
//! - default: credential storage boundary (memory, file) and `TokenStore`
//! - `platform`: platform keychain storage via `keyring`

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod auth;
pub mod storage;

// Re-export commonly used types and traits for convenience
pub use auth::TokenStore;
#[cfg(feature = "platform")]
pub use storage::KeychainStorage;
pub use storage::{CredentialStorage, FileStorage, MemoryStorage, StorageError, StorageResult};
