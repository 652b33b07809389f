//! Session identity allocation.
//!
//! Identifiers are synthesized locally from a millisecond timestamp plus a
//! random suffix. They only need to be unique within the process: the
//! remote store is keyed by the session id itself, so the allocation scheme
//! never has to coordinate across devices.

use rand::Rng;
use serde::{Deserialize, Serialize};

const SESSION_PREFIX: &str = "session_";
const USER_PREFIX: &str = "user_";
const SUFFIX_LEN: usize = 8;

/// The stable `(user_id, session_id)` pair carried by a working session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub user_id: String,
    pub session_id: String,
}

impl SessionIdentity {
    /// Synthesizes a fresh identity pair.
    pub fn allocate() -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        Self {
            user_id: format!("{}{}_{}", USER_PREFIX, millis, random_suffix()),
            session_id: format!("{}{}_{}", SESSION_PREFIX, millis, random_suffix()),
        }
    }

    /// Allocates a fresh identity reusing an already-known user id.
    ///
    /// Used by reset, which discards the session but keeps the user.
    pub fn allocate_for_user(user_id: impl Into<String>) -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        Self {
            user_id: user_id.into(),
            session_id: format!("{}{}_{}", SESSION_PREFIX, millis, random_suffix()),
        }
    }
}

/// Whether a session id matches the local allocation scheme.
///
/// Restoration uses this at mount to decide whether a cached id might
/// already have a remote counterpart worth probing for.
pub fn is_locally_allocated(session_id: &str) -> bool {
    let Some(rest) = session_id.strip_prefix(SESSION_PREFIX) else {
        return false;
    };
    let mut parts = rest.splitn(2, '_');
    let millis_ok = parts
        .next()
        .is_some_and(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()));
    let suffix_ok = parts
        .next()
        .is_some_and(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_alphanumeric()));
    millis_ok && suffix_ok
}

fn random_suffix() -> String {
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();
    (0..SUFFIX_LEN)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}
