//! Session identity allocation against the local cache.
//!
//! On first load the app either resumes the cached session (reusing its
//! identity) or starts fresh with newly synthesized identifiers. A
//! malformed cache entry is discarded by the snapshot store, so corruption
//! degrades to a fresh session instead of a crash.

use crate::snapshot_store::SnapshotStore;
use scribe_core::session::{SessionIdentity, SessionState};

/// Restores the cached state if present, otherwise allocates fresh.
///
/// # Returns
///
/// The identity in effect and the state carrying it. The boolean is `true`
/// when the state was restored from the local cache.
pub async fn allocate_or_restore<S: SessionState>(
    snapshots: &SnapshotStore<S>,
) -> (SessionIdentity, S, bool) {
    if let Some(state) = snapshots.load().await {
        let identity = state.identity();
        tracing::debug!("Resuming cached session '{}'", identity.session_id);
        return (identity, state, true);
    }

    let identity = SessionIdentity::allocate();
    tracing::debug!("Allocated fresh session '{}'", identity.session_id);
    let state = S::with_identity(identity.clone());
    (identity, state, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_store::{FileLocalStore, LocalStore};
    use scribe_core::session::Session;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn file_store(dir: &TempDir) -> Arc<dyn LocalStore> {
        Arc::new(FileLocalStore::new(dir.path()).unwrap())
    }

    #[tokio::test]
    async fn test_fresh_allocation_without_cache() {
        let dir = TempDir::new().unwrap();
        let snapshots: SnapshotStore<Session> = SnapshotStore::new(file_store(&dir));

        let (identity, state, restored) = allocate_or_restore(&snapshots).await;
        assert!(!restored);
        assert_eq!(state.session_id, identity.session_id);
        assert!(scribe_core::session::is_locally_allocated(&identity.session_id));
    }

    #[tokio::test]
    async fn test_cached_identity_is_reused() {
        let dir = TempDir::new().unwrap();
        let raw_store = file_store(&dir);
        let snapshots: SnapshotStore<Session> = SnapshotStore::new(raw_store.clone());

        let (first_identity, state, _) = allocate_or_restore(&snapshots).await;
        snapshots.save(&state).await.unwrap();

        let snapshots_again: SnapshotStore<Session> = SnapshotStore::new(raw_store);
        let (second_identity, _, restored) = allocate_or_restore(&snapshots_again).await;

        assert!(restored);
        assert_eq!(second_identity, first_identity);
    }

    #[tokio::test]
    async fn test_corrupt_cache_falls_back_to_fresh_identity() {
        let dir = TempDir::new().unwrap();
        let raw_store = file_store(&dir);
        raw_store
            .set("scribe.session.v1", "\u{fffd}garbage")
            .await
            .unwrap();

        let snapshots: SnapshotStore<Session> = SnapshotStore::new(raw_store);
        let (_, _, restored) = allocate_or_restore(&snapshots).await;
        assert!(!restored);
    }
}
