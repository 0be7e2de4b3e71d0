//! Persistent key-value storage for the session credential
//!
//! The session layer needs exactly three operations from its storage
//! boundary (`get`, `set`, `remove`) on string keys and values, and values
//! must survive process restarts for the durable backends.
//!
//! # Backends
//!
//! - [`MemoryStorage`]: process-local map, for tests and ephemeral sessions
//! - [`FileStorage`]: JSON object on disk, replaced atomically on write
//! - [`KeychainStorage`] (feature `platform`): platform keychain via `keyring`

pub mod error;
pub mod file;
#[cfg(feature = "platform")]
pub mod keychain;
pub mod memory;

pub use error::{StorageError, StorageResult};
pub use file::FileStorage;
#[cfg(feature = "platform")]
pub use keychain::KeychainStorage;
pub use memory::MemoryStorage;

/// String key-value store backing the credential
///
/// Implementations must treat `remove` of a missing key as success.
pub trait CredentialStorage: Send + Sync {
    /// Read the value stored under `key`, `None` when absent.
    ///
    /// # Errors
    /// Returns an error when the backend cannot be read.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns an error when the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete `key` (idempotent).
    ///
    /// # Errors
    /// Returns an error when the backend cannot be written.
    fn remove(&self, key: &str) -> StorageResult<()>;
}
