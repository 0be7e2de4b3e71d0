//! # PayLink Domain
//!
//! Pure types shared by every PayLink crate.
//!
//! This crate contains:
//! - The normalized operation error (`ApiError`) and its taxonomy
//! - Infrastructure error type (`PayLinkError`) and Result alias
//! - Credential, session state and outbound request descriptions
//! - Client configuration structures and defaults
//!
//! ## Architecture
//! - No dependencies on other PayLink crates
//! - No I/O: storage and HTTP live in `paylink-common` / `paylink-infra`

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
