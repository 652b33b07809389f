//! Session engine: the reducer store wired to its persistence observers.
//!
//! Owns the canonical in-memory state for one session. Actions are reduced
//! synchronously under the write lock (run-to-completion, one transition at
//! a time), then the new state is handed to the autosave scheduler.
//! Generated artifacts go through the explicit save methods, which pair the
//! write with a lookup of the current remote row and surface failures to
//! the caller.

use crate::autosave::{AutosaveConfig, AutosaveScheduler};
use crate::restoration::RestorationService;
use scribe_core::auth::AuthContext;
use scribe_core::error::Result;
use scribe_core::session::{
    is_locally_allocated, DraftResult, GeneratedRecord, RemoteRecord, RemoteSessionRepository,
    RemoteStudentRow, RemoteUpsert, Session, SessionAction, SessionIdentity, SessionState,
    TeacherSession, TeacherSessionAction,
};
use scribe_infrastructure::{allocate_or_restore, LocalStore, SnapshotStore};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Reducer-driven store for one session, generic over the session kind.
pub struct SessionEngine<S: SessionState> {
    state: Arc<RwLock<S>>,
    scheduler: Arc<AutosaveScheduler<S>>,
    snapshots: Arc<SnapshotStore<S>>,
    repository: Arc<dyn RemoteSessionRepository>,
}

impl<S: SessionState> SessionEngine<S> {
    /// Creates an engine around an already-initialized state.
    pub fn new(
        initial: S,
        snapshots: Arc<SnapshotStore<S>>,
        repository: Arc<dyn RemoteSessionRepository>,
        auth: AuthContext,
        config: AutosaveConfig,
    ) -> Self {
        let scheduler = Arc::new(AutosaveScheduler::new(
            snapshots.clone(),
            repository.clone(),
            auth,
            config,
        ));
        Self {
            state: Arc::new(RwLock::new(initial)),
            scheduler,
            snapshots,
            repository,
        }
    }

    /// Applies one action and schedules the dual writes.
    ///
    /// # Returns
    ///
    /// The state after the transition.
    pub async fn dispatch(&self, action: S::Action) -> S {
        let mut state = self.state.write().await;
        let next = state.apply(action);
        *state = next.clone();
        // Observed while still holding the write lock: concurrent
        // dispatches hand states to the scheduler in transition order, so
        // the debouncers can never persist an older state over a newer one.
        self.scheduler.observe(&next).await;
        drop(state);
        next
    }

    /// A clone of the current state.
    pub async fn state(&self) -> S {
        self.state.read().await.clone()
    }

    /// The identity currently carried by the state.
    pub async fn identity(&self) -> SessionIdentity {
        self.state.read().await.identity()
    }

    /// Replaces the in-memory state wholesale without scheduling writes.
    ///
    /// Used by restoration, which re-seeds the store from remote data.
    pub async fn adopt(&self, state: S) {
        *self.state.write().await = state;
    }

    /// Resets to a pristine state under a fresh session identity.
    ///
    /// Wipes the local snapshot and keeps the user id. User initiated, so
    /// a failed snapshot wipe is surfaced.
    pub async fn reset(&self) -> Result<SessionIdentity> {
        self.scheduler.cancel_pending();
        self.snapshots.clear().await?;

        let user_id = self.identity().await.user_id;
        let identity = SessionIdentity::allocate_for_user(user_id);
        self.dispatch(S::reset_action(identity.clone())).await;
        Ok(identity)
    }

    /// The autosave scheduler driving this engine's background writes.
    pub fn scheduler(&self) -> &AutosaveScheduler<S> {
        &self.scheduler
    }

    /// Explicit remote write carrying generated text fields.
    ///
    /// Looks up the current remote row first, then upserts title, metadata
    /// and the given artifacts. Returns `None` without touching the remote
    /// store when the user cannot persist remotely.
    async fn push_artifacts(
        &self,
        draft_text: Option<String>,
        final_text: Option<String>,
    ) -> Result<Option<RemoteRecord>> {
        if !self.scheduler.auth().await.can_persist_remotely() {
            return Ok(None);
        }

        let state = self.state().await;
        if let Some(existing) = self.repository.get_by_session_id(state.session_id()).await? {
            tracing::debug!(
                "Writing artifacts to existing remote row '{}' for '{}'",
                existing.id,
                state.session_id()
            );
        }

        let record = self
            .repository
            .upsert_by_session_id(
                state.session_id(),
                RemoteUpsert {
                    title: state.derived_title(),
                    metadata: state.remote_metadata(),
                    draft_text,
                    final_text,
                    updated_at: state.updated_at().to_string(),
                },
            )
            .await?;
        Ok(Some(record))
    }
}

impl SessionEngine<Session> {
    /// Builds the engine for a page load: resume the cached session if one
    /// exists, otherwise allocate fresh, then opportunistically check for a
    /// remote counterpart before enabling autosave.
    ///
    /// The mount-time probe is best effort: a failed probe or restore keeps
    /// the locally cached state and is only logged.
    pub async fn mount(
        local_store: Arc<dyn LocalStore>,
        repository: Arc<dyn RemoteSessionRepository>,
        auth: AuthContext,
        config: AutosaveConfig,
    ) -> Self {
        let snapshots = Arc::new(SnapshotStore::new(local_store));
        let (identity, state, from_cache) = allocate_or_restore(&snapshots).await;
        let engine = Self::new(state, snapshots, repository.clone(), auth, config);

        if from_cache && is_locally_allocated(&identity.session_id) {
            engine.scheduler.mark_restoring().await;
            let restoration = RestorationService::new(repository);
            match restoration.probe_exists(&identity.session_id).await {
                Ok(true) => {
                    match restoration
                        .restore_session(&identity.user_id, &identity.session_id)
                        .await
                    {
                        Ok(restored) => engine.adopt(restored).await,
                        Err(err) => {
                            tracing::warn!(
                                "Mount restore failed for '{}': {}",
                                identity.session_id,
                                err
                            );
                        }
                    }
                }
                Ok(false) => {}
                Err(err) => {
                    tracing::warn!(
                        "Existence probe failed for '{}': {}",
                        identity.session_id,
                        err
                    );
                }
            }
        }

        engine.scheduler.mark_ready().await;
        engine
    }

    /// Explicitly resumes an existing remote session.
    ///
    /// User initiated: not-found and read errors surface so the UI can
    /// report them. On failure the current in-memory state is untouched.
    pub async fn resume(&self, session_id: &str) -> Result<()> {
        self.scheduler.mark_restoring().await;
        let restoration = RestorationService::new(self.repository.clone());
        let user_id = self.identity().await.user_id;
        let result = restoration.restore_session(&user_id, session_id).await;
        match result {
            Ok(restored) => {
                self.adopt(restored).await;
                self.scheduler.mark_ready().await;
                Ok(())
            }
            Err(err) => {
                self.scheduler.mark_ready().await;
                Err(err)
            }
        }
    }

    /// Records a generated draft and writes it through the explicit path.
    pub async fn save_draft(&self, draft: DraftResult) -> Result<Option<RemoteRecord>> {
        let draft_text = draft.draft_text.clone();
        self.dispatch(SessionAction::SetDraftResult(draft)).await;
        self.push_artifacts(Some(draft_text), None).await
    }

    /// Records the edited final text and writes it through the explicit path.
    pub async fn save_final(&self, text: String) -> Result<Option<RemoteRecord>> {
        self.dispatch(SessionAction::SetFinalText(text.clone())).await;
        self.push_artifacts(None, Some(text)).await
    }
}

impl SessionEngine<TeacherSession> {
    /// Teacher-variant mount; same lifecycle as the single-subject mount.
    pub async fn mount(
        local_store: Arc<dyn LocalStore>,
        repository: Arc<dyn RemoteSessionRepository>,
        auth: AuthContext,
        config: AutosaveConfig,
    ) -> Self {
        let snapshots = Arc::new(SnapshotStore::new(local_store));
        let (identity, state, from_cache) = allocate_or_restore(&snapshots).await;
        let engine = Self::new(state, snapshots, repository.clone(), auth, config);

        if from_cache && is_locally_allocated(&identity.session_id) {
            engine.scheduler.mark_restoring().await;
            let restoration = RestorationService::new(repository);
            match restoration.probe_exists(&identity.session_id).await {
                Ok(true) => {
                    match restoration
                        .restore_teacher_session(&identity.user_id, &identity.session_id)
                        .await
                    {
                        Ok(restored) => engine.adopt(restored).await,
                        Err(err) => {
                            tracing::warn!(
                                "Mount restore failed for '{}': {}",
                                identity.session_id,
                                err
                            );
                        }
                    }
                }
                Ok(false) => {}
                Err(err) => {
                    tracing::warn!(
                        "Existence probe failed for '{}': {}",
                        identity.session_id,
                        err
                    );
                }
            }
        }

        engine.scheduler.mark_ready().await;
        engine
    }

    /// Explicitly resumes an existing remote teacher session.
    pub async fn resume(&self, session_id: &str) -> Result<()> {
        self.scheduler.mark_restoring().await;
        let restoration = RestorationService::new(self.repository.clone());
        let teacher_id = self.identity().await.user_id;
        let result = restoration
            .restore_teacher_session(&teacher_id, session_id)
            .await;
        match result {
            Ok(restored) => {
                self.adopt(restored).await;
                self.scheduler.mark_ready().await;
                Ok(())
            }
            Err(err) => {
                self.scheduler.mark_ready().await;
                Err(err)
            }
        }
    }

    /// Records a generated record for one student and writes the parent
    /// row and the per-student child row through the explicit path.
    pub async fn save_generated_record(&self, record: GeneratedRecord) -> Result<()> {
        let student_id = record.student_id.clone();
        let state = self
            .dispatch(TeacherSessionAction::UpsertGeneratedRecord(record.clone()))
            .await;

        if !self.scheduler.auth().await.can_persist_remotely() {
            return Ok(());
        }

        // Parent row first so the child always references an existing session row.
        self.push_artifacts(None, None).await?;

        let name = state
            .students
            .iter()
            .find(|s| s.id == student_id)
            .map(|s| s.name.clone())
            .unwrap_or_default();
        let activity = state
            .activity_for(&student_id)
            .map(|a| a.details.clone());

        self.repository
            .upsert_student_row(
                state.session_id(),
                RemoteStudentRow {
                    id: format!("srow_{}", uuid::Uuid::new_v4()),
                    session_id: state.session_id().to_string(),
                    student_id,
                    name,
                    activity,
                    generated_text: Some(record.text),
                    confidence: record.confidence,
                    updated_at: record.updated_at,
                },
            )
            .await
    }
}
