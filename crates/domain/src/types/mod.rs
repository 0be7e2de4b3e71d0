//! Domain types and models
//!
//! Credential and session state, the description of one outbound call, and
//! the payloads of the payments API operations.

pub mod credential;
pub mod payments;
pub mod request;
pub mod session;

pub use credential::Credential;
pub use payments::{LoginRequest, SendMoneyRequest, SignupRequest};
pub use request::{Encoding, HttpMethod, OperationRequest, Payload};
pub use session::SessionState;
