//! Debounced dual-write scheduler.
//!
//! Observes every state change and schedules two independent delayed
//! writes: a short-delay local snapshot write and a longer-delay remote
//! upsert. Rapid successive changes are coalesced per destination, so only
//! the final state of a burst is ever written.
//!
//! Background persistence is best-effort by design: a failed write is
//! logged and dropped, and the next state change retries naturally through
//! the next debounce cycle. Generated draft/final text never travel on
//! this path; they go through the engine's explicit save methods.

use crate::debounce::Debouncer;
use scribe_core::auth::AuthContext;
use scribe_core::session::{RemoteSessionRepository, RemoteUpsert, SessionState};
use scribe_infrastructure::SnapshotStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Debounce delays for the two write destinations.
#[derive(Debug, Clone, Copy)]
pub struct AutosaveConfig {
    /// Quiet period before the local snapshot write
    pub local_delay: Duration,
    /// Quiet period before the remote upsert
    pub remote_delay: Duration,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            local_delay: Duration::from_millis(500),
            remote_delay: Duration::from_millis(1000),
        }
    }
}

/// Lifecycle phase gating autosave.
///
/// Autosave stays disabled until restoration has completed or been
/// confirmed unnecessary, so a restore in progress can never race a
/// spurious autosave write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistencePhase {
    Uninitialized,
    Restoring,
    Ready,
}

/// Schedules the dual writes for one session kind.
pub struct AutosaveScheduler<S: SessionState> {
    local: Debouncer<S>,
    remote: Debouncer<S>,
    auth: Arc<RwLock<AuthContext>>,
    phase: Arc<RwLock<PersistencePhase>>,
}

impl<S: SessionState> AutosaveScheduler<S> {
    /// Creates a scheduler writing through the given stores.
    pub fn new(
        snapshots: Arc<SnapshotStore<S>>,
        repository: Arc<dyn RemoteSessionRepository>,
        auth: AuthContext,
        config: AutosaveConfig,
    ) -> Self {
        let local = Debouncer::new(config.local_delay, move |state: S| {
            let snapshots = snapshots.clone();
            async move {
                // Quota and disk failures only cost the cached copy; the
                // in-memory state stays authoritative for this tab.
                if let Err(err) = snapshots.save(&state).await {
                    tracing::debug!(
                        "Local snapshot write failed for '{}': {}",
                        state.session_id(),
                        err
                    );
                }
            }
        });

        let remote = Debouncer::new(config.remote_delay, move |state: S| {
            let repository = repository.clone();
            async move {
                let fields = RemoteUpsert {
                    title: state.derived_title(),
                    metadata: state.remote_metadata(),
                    draft_text: None,
                    final_text: None,
                    updated_at: state.updated_at().to_string(),
                };
                match repository
                    .upsert_by_session_id(state.session_id(), fields)
                    .await
                {
                    Ok(record) => {
                        tracing::debug!(
                            "Autosaved session '{}' to remote row '{}'",
                            state.session_id(),
                            record.id
                        );
                    }
                    Err(err) => {
                        // Dropped, not surfaced: the next change retries.
                        tracing::warn!(
                            "Remote autosave failed for '{}': {}",
                            state.session_id(),
                            err
                        );
                    }
                }
            }
        });

        Self {
            local,
            remote,
            auth: Arc::new(RwLock::new(auth)),
            phase: Arc::new(RwLock::new(PersistencePhase::Uninitialized)),
        }
    }

    /// Observes a new state and reschedules the delayed writes.
    pub async fn observe(&self, state: &S) {
        if *self.phase.read().await != PersistencePhase::Ready {
            tracing::debug!(
                "Skipping autosave for '{}': persistence not ready",
                state.session_id()
            );
            return;
        }

        self.local.trigger(state.clone());

        let auth = self.auth.read().await.clone();
        if auth.can_persist_remotely() && state.has_meaningful_content() {
            self.remote.trigger(state.clone());
        }
    }

    /// Cancels any pending unfired writes.
    pub fn cancel_pending(&self) {
        self.local.cancel();
        self.remote.cancel();
    }

    /// Reacts to a transition of the authentication triple.
    pub async fn set_auth(&self, auth: AuthContext) {
        *self.auth.write().await = auth;
    }

    /// The current authentication snapshot.
    pub async fn auth(&self) -> AuthContext {
        self.auth.read().await.clone()
    }

    /// Marks restoration as in progress; autosave stays disabled.
    pub async fn mark_restoring(&self) {
        *self.phase.write().await = PersistencePhase::Restoring;
    }

    /// Enables autosave once restoration completed or proved unnecessary.
    pub async fn mark_ready(&self) {
        *self.phase.write().await = PersistencePhase::Ready;
    }

    /// The current lifecycle phase.
    pub async fn phase(&self) -> PersistencePhase {
        *self.phase.read().await
    }
}
