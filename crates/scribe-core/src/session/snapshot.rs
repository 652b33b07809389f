//! Local snapshot projections.
//!
//! The on-device cache stores a lossy subset of the in-memory session:
//! every input field survives a reload, but generated artifacts (draft
//! text, final text, per-student generated records) are excluded. Once the
//! canonical remote copy exists, keeping a second local copy would only
//! create two independently-stale versions of the same generated output.

use super::activity::ActivityDetails;
use super::model::{BasicInfo, Session};
use super::step::SessionStep;
use super::teacher::{StudentActivity, StudentDescriptor, TeacherSession};
use serde::{Deserialize, Serialize};

/// Storage-shaped projection of a [`Session`] without generated artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub user_id: String,
    pub session_id: String,
    #[serde(default)]
    pub current_step: SessionStep,
    #[serde(default)]
    pub basic_info: Option<BasicInfo>,
    #[serde(default)]
    pub activity_details: Option<ActivityDetails>,
    #[serde(default)]
    pub emphasis_keywords: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Session> for SessionSnapshot {
    fn from(session: &Session) -> Self {
        Self {
            user_id: session.user_id.clone(),
            session_id: session.session_id.clone(),
            current_step: session.current_step,
            basic_info: session.basic_info.clone(),
            activity_details: session.activity_details.clone(),
            emphasis_keywords: session.emphasis_keywords.clone(),
            created_at: session.created_at.clone(),
            updated_at: session.updated_at.clone(),
        }
    }
}

impl SessionSnapshot {
    /// Rebuilds an in-memory session from the snapshot.
    ///
    /// Generated draft and final text are absent by construction.
    pub fn into_session(self) -> Session {
        Session {
            user_id: self.user_id,
            session_id: self.session_id,
            current_step: self.current_step,
            basic_info: self.basic_info,
            activity_details: self.activity_details,
            emphasis_keywords: self.emphasis_keywords,
            draft_result: None,
            final_text: None,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Storage-shaped projection of a [`TeacherSession`] without generated
/// records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherSessionSnapshot {
    pub teacher_id: String,
    pub session_id: String,
    #[serde(default)]
    pub current_step: SessionStep,
    #[serde(default)]
    pub basic_info: Option<BasicInfo>,
    #[serde(default)]
    pub students: Vec<StudentDescriptor>,
    #[serde(default)]
    pub student_activities: Vec<StudentActivity>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&TeacherSession> for TeacherSessionSnapshot {
    fn from(session: &TeacherSession) -> Self {
        Self {
            teacher_id: session.teacher_id.clone(),
            session_id: session.session_id.clone(),
            current_step: session.current_step,
            basic_info: session.basic_info.clone(),
            students: session.students.clone(),
            student_activities: session.student_activities.clone(),
            created_at: session.created_at.clone(),
            updated_at: session.updated_at.clone(),
        }
    }
}

impl TeacherSessionSnapshot {
    /// Rebuilds an in-memory teacher session from the snapshot.
    ///
    /// Generated records are absent by construction.
    pub fn into_session(self) -> TeacherSession {
        TeacherSession {
            teacher_id: self.teacher_id,
            session_id: self.session_id,
            current_step: self.current_step,
            basic_info: self.basic_info,
            students: self.students,
            student_activities: self.student_activities,
            generated_records: Vec::new(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
