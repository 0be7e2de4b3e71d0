//! Credential store
//!
//! Owns the single bearer credential of the process:
//! - `load` once at startup from the storage boundary
//! - `save` after a login/signup that yields a token
//! - `clear` on logout
//! - `current` for a synchronous in-memory read before each request
//!
//! State changes (`Anonymous` ↔ `Authenticated`) are published on a watch
//! channel so a UI layer can react without polling.

use std::sync::Arc;

use paylink_domain::{Credential, SessionState};
use parking_lot::RwLock;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::storage::{CredentialStorage, StorageResult};

/// Single-credential store backed by a [`CredentialStorage`]
pub struct TokenStore {
    storage: Arc<dyn CredentialStorage>,
    key: String,
    current: RwLock<Option<Credential>>,
    state_tx: watch::Sender<SessionState>,
}

impl TokenStore {
    /// Create an empty store. Call [`TokenStore::load`] to pick up a
    /// credential persisted by a previous run.
    ///
    /// # Arguments
    /// * `storage` - Persistent key-value backend
    /// * `key` - The one storage key holding the credential
    pub fn new(storage: Arc<dyn CredentialStorage>, key: impl Into<String>) -> Self {
        let (state_tx, _) = watch::channel(SessionState::Anonymous);
        Self { storage, key: key.into(), current: RwLock::new(None), state_tx }
    }

    /// Read the persisted credential into memory.
    ///
    /// A blank stored value counts as absent.
    ///
    /// # Errors
    /// Returns an error if the storage backend cannot be read; the in-memory
    /// credential is left untouched in that case.
    pub fn load(&self) -> StorageResult<Option<Credential>> {
        let loaded = self.storage.get(&self.key)?.and_then(Credential::from_token);

        match &loaded {
            Some(_) => info!(key = %self.key, "Loaded persisted credential"),
            None => debug!(key = %self.key, "No persisted credential found"),
        }

        *self.current.write() = loaded.clone();
        self.publish();
        Ok(loaded)
    }

    /// Replace the credential in memory and in storage.
    ///
    /// Memory is updated even when persisting fails, so the session keeps
    /// working for this process.
    ///
    /// # Errors
    /// Returns an error if the storage backend cannot be written.
    pub fn save(&self, credential: Credential) -> StorageResult<()> {
        let persisted = self.storage.set(&self.key, credential.expose());
        *self.current.write() = Some(credential);
        self.publish();

        match &persisted {
            Ok(()) => info!(key = %self.key, "Credential stored"),
            Err(e) => warn!(key = %self.key, error = %e, "Credential kept in memory only"),
        }
        persisted
    }

    /// Forget the credential in memory and remove it from storage.
    ///
    /// # Errors
    /// Returns an error if the storage backend cannot be written; memory is
    /// cleared regardless.
    pub fn clear(&self) -> StorageResult<()> {
        *self.current.write() = None;
        self.publish();

        let removed = self.storage.remove(&self.key);
        match &removed {
            Ok(()) => info!(key = %self.key, "Credential cleared"),
            Err(e) => warn!(key = %self.key, error = %e, "Failed to remove persisted credential"),
        }
        removed
    }

    /// Latest credential from `load`/`save`/`clear`, without touching storage.
    #[must_use]
    pub fn current(&self) -> Option<Credential> {
        self.current.read().clone()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.current.read().is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state().is_authenticated()
    }

    /// Observe session state transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    /// Storage key holding the credential.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    fn publish(&self) {
        let next = self.state();
        self.state_tx.send_if_modified(|state| {
            if *state == next {
                false
            } else {
                *state = next;
                true
            }
        });
    }
}
