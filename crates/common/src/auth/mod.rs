//! Session credential management
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   TokenStore    │  in-memory credential + state notifications
//! └────────┬────────┘
//!          │
//!          └──► CredentialStorage   (memory / file / keychain)
//! ```
//!
//! # Usage Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use paylink_common::auth::TokenStore;
//! use paylink_common::storage::MemoryStorage;
//! use paylink_domain::Credential;
//!
//! let store = TokenStore::new(Arc::new(MemoryStorage::new()), "authToken");
//! store.load()?;
//!
//! if let Some(credential) = Credential::from_token("tok123") {
//!     store.save(credential)?;
//! }
//! assert!(store.is_authenticated());
//!
//! store.clear()?;
//! assert!(store.current().is_none());
//! # Ok::<(), paylink_common::storage::StorageError>(())
//! ```

pub mod token_store;

pub use token_store::TokenStore;
