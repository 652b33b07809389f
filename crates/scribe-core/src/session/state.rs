//! Session state abstraction.
//!
//! The engine, autosave scheduler and snapshot store are generic over the
//! two session kinds (single-subject and teacher batch). This trait is the
//! seam: it exposes the reducer, the snapshot projection and the
//! remote-facing derivations without the callers knowing which kind they
//! hold.

use super::action::{SessionAction, TeacherSessionAction};
use super::identity::SessionIdentity;
use super::model::Session;
use super::reducer::{reduce, reduce_teacher};
use super::repository::RemoteMetadata;
use super::snapshot::{SessionSnapshot, TeacherSessionSnapshot};
use super::step::SessionStep;
use super::teacher::TeacherSession;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Canonical in-memory session state driven by a closed action set.
pub trait SessionState: Clone + Send + Sync + 'static {
    /// The action kind accepted by this state's reducer.
    type Action: Send + 'static;
    /// The lossy local-storage projection of this state.
    type Snapshot: Serialize + DeserializeOwned + Send;

    /// Creates a pristine state carrying the given identity.
    fn with_identity(identity: SessionIdentity) -> Self;

    /// The stable session identifier.
    fn session_id(&self) -> &str;

    /// The identity pair currently carried by the state.
    fn identity(&self) -> SessionIdentity;

    /// Applies one action, returning the new state.
    fn apply(&self, action: Self::Action) -> Self;

    /// The reset action adopting a fresh identity.
    fn reset_action(identity: SessionIdentity) -> Self::Action;

    /// Projects the state into its local snapshot.
    fn to_snapshot(&self) -> Self::Snapshot;

    /// Rebuilds a state from a loaded snapshot.
    fn from_snapshot(snapshot: Self::Snapshot) -> Self;

    /// Storage key scoping local snapshots by session kind.
    fn snapshot_key() -> &'static str;

    /// Human-readable title for the remote row.
    fn derived_title(&self) -> String;

    /// Whether there is content worth persisting remotely.
    fn has_meaningful_content(&self) -> bool;

    /// Structured metadata for the generic upsert path.
    fn remote_metadata(&self) -> RemoteMetadata;

    /// Timestamp of the last transition (ISO 8601 format).
    fn updated_at(&self) -> &str;

    /// The step a restored session jumps to.
    fn restored_step() -> SessionStep;
}

impl SessionState for Session {
    type Action = SessionAction;
    type Snapshot = SessionSnapshot;

    fn with_identity(identity: SessionIdentity) -> Self {
        Session::new(identity)
    }

    fn session_id(&self) -> &str {
        &self.session_id
    }

    fn identity(&self) -> SessionIdentity {
        Session::identity(self)
    }

    fn apply(&self, action: SessionAction) -> Self {
        reduce(self, action)
    }

    fn reset_action(identity: SessionIdentity) -> SessionAction {
        SessionAction::Reset { identity }
    }

    fn to_snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::from(self)
    }

    fn from_snapshot(snapshot: SessionSnapshot) -> Self {
        snapshot.into_session()
    }

    fn snapshot_key() -> &'static str {
        "scribe.session.v1"
    }

    fn derived_title(&self) -> String {
        Session::derived_title(self)
    }

    fn has_meaningful_content(&self) -> bool {
        Session::has_meaningful_content(self)
    }

    fn remote_metadata(&self) -> RemoteMetadata {
        RemoteMetadata {
            grade: self.basic_info.as_ref().map(|b| b.grade),
            semester: self.basic_info.as_ref().map(|b| b.semester),
            section_type: self.basic_info.as_ref().map(|b| b.section_type),
            subject: self.basic_info.as_ref().and_then(|b| b.subject.clone()),
            activity_summary: self.activity_details.as_ref().and_then(|d| d.summary()),
            keywords: self.emphasis_keywords.clone(),
        }
    }

    fn updated_at(&self) -> &str {
        &self.updated_at
    }

    fn restored_step() -> SessionStep {
        SessionStep::Draft
    }
}

impl SessionState for TeacherSession {
    type Action = TeacherSessionAction;
    type Snapshot = TeacherSessionSnapshot;

    fn with_identity(identity: SessionIdentity) -> Self {
        TeacherSession::new(identity)
    }

    fn session_id(&self) -> &str {
        &self.session_id
    }

    fn identity(&self) -> SessionIdentity {
        TeacherSession::identity(self)
    }

    fn apply(&self, action: TeacherSessionAction) -> Self {
        reduce_teacher(self, action)
    }

    fn reset_action(identity: SessionIdentity) -> TeacherSessionAction {
        TeacherSessionAction::Reset { identity }
    }

    fn to_snapshot(&self) -> TeacherSessionSnapshot {
        TeacherSessionSnapshot::from(self)
    }

    fn from_snapshot(snapshot: TeacherSessionSnapshot) -> Self {
        snapshot.into_session()
    }

    fn snapshot_key() -> &'static str {
        "scribe.teacher_session.v1"
    }

    fn derived_title(&self) -> String {
        TeacherSession::derived_title(self)
    }

    fn has_meaningful_content(&self) -> bool {
        TeacherSession::has_meaningful_content(self)
    }

    fn remote_metadata(&self) -> RemoteMetadata {
        RemoteMetadata {
            grade: self.basic_info.as_ref().map(|b| b.grade),
            semester: self.basic_info.as_ref().map(|b| b.semester),
            section_type: self.basic_info.as_ref().map(|b| b.section_type),
            subject: self.basic_info.as_ref().and_then(|b| b.subject.clone()),
            activity_summary: None,
            keywords: Vec::new(),
        }
    }

    fn updated_at(&self) -> &str {
        &self.updated_at
    }

    fn restored_step() -> SessionStep {
        SessionStep::Draft
    }
}
