//! In-memory credential storage

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::{CredentialStorage, StorageResult};

/// Process-local storage; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with one entry, e.g. a credential from a
    /// previous "run".
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage.entries.lock().insert(key.to_string(), value.to_string());
        storage
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl CredentialStorage for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("authToken").unwrap(), None);

        storage.set("authToken", "abc").unwrap();
        assert_eq!(storage.get("authToken").unwrap().as_deref(), Some("abc"));

        storage.remove("authToken").unwrap();
        storage.remove("authToken").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn clones_share_entries() {
        let storage = MemoryStorage::with_entry("authToken", "abc");
        let clone = storage.clone();
        clone.set("authToken", "def").unwrap();
        assert_eq!(storage.get("authToken").unwrap().as_deref(), Some("def"));
        assert_eq!(storage.len(), 1);
    }
}
