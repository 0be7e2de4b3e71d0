//! Platform keychain credential storage
//!
//! Thin wrapper over the platform keychain (macOS Keychain Access, Windows
//! Credential Manager, Linux kernel keyutils) via the `keyring` crate. The
//! storage key becomes the keychain account under a fixed service name.
//!
//! ```no_run
//! use paylink_common::storage::{CredentialStorage, KeychainStorage};
//!
//! let keychain = KeychainStorage::new("PayLink.session");
//! keychain.set("authToken", "tok123")?;
//! assert_eq!(keychain.get("authToken")?.as_deref(), Some("tok123"));
//! # Ok::<(), paylink_common::storage::StorageError>(())
//! ```

use keyring::Entry;
use tracing::debug;

use super::{CredentialStorage, StorageError, StorageResult};

/// Keychain-backed storage scoped to one service name
#[derive(Debug, Clone)]
pub struct KeychainStorage {
    service_name: String,
}

impl KeychainStorage {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { service_name: service_name.into() }
    }

    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    fn entry(&self, key: &str) -> StorageResult<Entry> {
        Entry::new(&self.service_name, key).map_err(|e| {
            StorageError::Keychain(format!("Failed to open keychain entry {key}: {e}"))
        })
    }
}

impl CredentialStorage for KeychainStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        debug!(service = %self.service_name, key = %key, "Reading secret from keychain");

        match self.entry(key)?.get_password() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => {
                Err(StorageError::Keychain(format!("Failed to retrieve secret for {key}: {e}")))
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        debug!(service = %self.service_name, key = %key, "Storing secret in keychain");

        self.entry(key)?
            .set_password(value)
            .map_err(|e| StorageError::Keychain(format!("Failed to store secret for {key}: {e}")))
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        debug!(service = %self.service_name, key = %key, "Deleting secret from keychain");

        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => {
                Err(StorageError::Keychain(format!("Failed to delete secret for {key}: {e}")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore = "needs a platform credential store (keychain, credential manager or keyutils)"]
    fn missing_entry_reads_as_absent_and_removes_cleanly() {
        let keychain = KeychainStorage::new("PayLinkTest.missing");
        assert_eq!(keychain.service_name(), "PayLinkTest.missing");
        assert_eq!(keychain.get("never-written").unwrap(), None);
        keychain.remove("never-written").unwrap();
    }

    #[test]
    #[ignore = "needs a platform credential store (keychain, credential manager or keyutils)"]
    fn value_is_readable_after_set() {
        let keychain = KeychainStorage::new("PayLinkTest.roundtrip");
        keychain.set("authToken", "tok123").unwrap();

        let reopened = KeychainStorage::new("PayLinkTest.roundtrip");
        assert_eq!(reopened.get("authToken").unwrap().as_deref(), Some("tok123"));

        reopened.remove("authToken").unwrap();
        assert_eq!(keychain.get("authToken").unwrap(), None);
    }
}
