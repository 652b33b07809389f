//! Authentication oracle boundary.
//!
//! The core never manages credentials. It only reads this triple to decide
//! whether remote persistence is allowed for the current user.

use serde::{Deserialize, Serialize};

/// Snapshot of the authentication state supplied by the auth subsystem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub is_authenticated: bool,
    #[serde(default)]
    pub is_guest: bool,
}

impl AuthContext {
    /// An authenticated, non-guest user.
    pub fn authenticated(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            is_authenticated: true,
            is_guest: false,
        }
    }

    /// A guest user: memory and local-cache persistence only.
    pub fn guest() -> Self {
        Self {
            user_id: None,
            is_authenticated: false,
            is_guest: true,
        }
    }

    /// Whether remote writes may be attempted for this user.
    ///
    /// Guests and unauthenticated users get no remote durability guarantee.
    pub fn can_persist_remotely(&self) -> bool {
        self.is_authenticated && !self.is_guest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guest_cannot_persist_remotely() {
        assert!(!AuthContext::guest().can_persist_remotely());
    }

    #[test]
    fn test_unauthenticated_default_cannot_persist_remotely() {
        assert!(!AuthContext::default().can_persist_remotely());
    }

    #[test]
    fn test_authenticated_user_can_persist_remotely() {
        assert!(AuthContext::authenticated("u1").can_persist_remotely());
    }
}
