//! Session state derived from the credential lifecycle

use serde::{Deserialize, Serialize};

use crate::impl_domain_label_conversions;

/// Whether a credential is currently held
///
/// `Anonymous → Authenticated` on a login/signup that yields a token;
/// `Authenticated → Anonymous` on logout. There are no other transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated,
}

impl_domain_label_conversions!(SessionState {
    Anonymous => "anonymous",
    Authenticated => "authenticated",
});

impl SessionState {
    #[must_use]
    pub const fn is_authenticated(self) -> bool {
        matches!(self, Self::Authenticated)
    }
}
