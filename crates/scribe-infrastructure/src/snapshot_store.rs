//! Snapshot persistence over the local key/value store.
//!
//! Serializes the lossy snapshot projection of a session under a storage
//! key scoped by session kind (and optionally by class). Malformed stored
//! content is discarded silently: corruption must never crash the app, it
//! just costs the cached state.

use crate::local_store::LocalStore;
use scribe_core::error::Result;
use scribe_core::session::SessionState;
use std::marker::PhantomData;
use std::sync::Arc;

/// Reads and writes the local snapshot for one session kind.
pub struct SnapshotStore<S: SessionState> {
    store: Arc<dyn LocalStore>,
    key: String,
    _marker: PhantomData<fn() -> S>,
}

impl<S: SessionState> SnapshotStore<S> {
    /// Creates a snapshot store under the kind-scoped default key.
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self {
            store,
            key: S::snapshot_key().to_string(),
            _marker: PhantomData,
        }
    }

    /// Creates a snapshot store additionally scoped by a class identifier.
    ///
    /// Used for teacher per-class data so different classes never clobber
    /// each other's snapshots.
    pub fn scoped(store: Arc<dyn LocalStore>, class_id: &str) -> Self {
        Self {
            store,
            key: format!("{}.{}", S::snapshot_key(), class_id),
            _marker: PhantomData,
        }
    }

    /// The storage key this store writes under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Loads the cached state, if a well-formed snapshot is present.
    ///
    /// Missing and malformed content both yield `None`; parse failures are
    /// logged at debug and otherwise ignored.
    pub async fn load(&self) -> Option<S> {
        let raw = match self.store.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                tracing::debug!("Snapshot read failed for '{}': {}", self.key, err);
                return None;
            }
        };

        match serde_json::from_str::<S::Snapshot>(&raw) {
            Ok(snapshot) => Some(S::from_snapshot(snapshot)),
            Err(err) => {
                tracing::debug!("Discarding malformed snapshot '{}': {}", self.key, err);
                None
            }
        }
    }

    /// Serializes the state's snapshot projection and writes it.
    pub async fn save(&self, state: &S) -> Result<()> {
        let raw = serde_json::to_string(&state.to_snapshot())?;
        self.store.set(&self.key, &raw).await
    }

    /// Removes the cached snapshot.
    pub async fn clear(&self) -> Result<()> {
        self.store.remove(&self.key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_store::FileLocalStore;
    use scribe_core::session::{Session, SessionIdentity, TeacherSession};
    use tempfile::TempDir;

    fn file_store(dir: &TempDir) -> Arc<dyn LocalStore> {
        Arc::new(FileLocalStore::new(dir.path()).unwrap())
    }

    #[tokio::test]
    async fn test_load_without_snapshot_returns_none() {
        let dir = TempDir::new().unwrap();
        let store: SnapshotStore<Session> = SnapshotStore::new(file_store(&dir));
        assert!(store.load().await.is_none());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store: SnapshotStore<Session> = SnapshotStore::new(file_store(&dir));

        let session = Session::new(SessionIdentity::allocate());
        store.save(&session).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.session_id, session.session_id);
        assert_eq!(loaded.user_id, session.user_id);
    }

    #[tokio::test]
    async fn test_malformed_snapshot_is_discarded() {
        let dir = TempDir::new().unwrap();
        let raw_store = file_store(&dir);
        raw_store
            .set("scribe.session.v1", "{not json at all")
            .await
            .unwrap();

        let store: SnapshotStore<Session> = SnapshotStore::new(raw_store);
        assert!(store.load().await.is_none());
    }

    #[tokio::test]
    async fn test_clear_removes_snapshot() {
        let dir = TempDir::new().unwrap();
        let store: SnapshotStore<Session> = SnapshotStore::new(file_store(&dir));

        store.save(&Session::new(SessionIdentity::allocate())).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.load().await.is_none());
    }

    #[tokio::test]
    async fn test_session_kinds_use_distinct_keys() {
        let dir = TempDir::new().unwrap();
        let raw_store = file_store(&dir);
        let student: SnapshotStore<Session> = SnapshotStore::new(raw_store.clone());
        let teacher: SnapshotStore<TeacherSession> = SnapshotStore::new(raw_store);

        student
            .save(&Session::new(SessionIdentity::allocate()))
            .await
            .unwrap();
        assert!(teacher.load().await.is_none());
    }

    #[tokio::test]
    async fn test_class_scoped_keys_do_not_collide() {
        let dir = TempDir::new().unwrap();
        let raw_store = file_store(&dir);
        let class_a: SnapshotStore<TeacherSession> =
            SnapshotStore::scoped(raw_store.clone(), "class-3-1");
        let class_b: SnapshotStore<TeacherSession> =
            SnapshotStore::scoped(raw_store, "class-3-2");

        class_a
            .save(&TeacherSession::new(SessionIdentity::allocate()))
            .await
            .unwrap();
        assert!(class_b.load().await.is_none());
    }
}
