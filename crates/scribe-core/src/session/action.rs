//! Typed actions accepted by the session reducers.

use super::activity::ActivityDetails;
use super::identity::SessionIdentity;
use super::model::{BasicInfo, DraftResult};
use super::step::SessionStep;
use super::teacher::{GeneratedRecord, StudentActivity, StudentDescriptor};

/// Actions over a single-subject [`super::model::Session`].
#[derive(Debug, Clone)]
pub enum SessionAction {
    SetBasicInfo(BasicInfo),
    SetActivityDetails(ActivityDetails),
    /// Replaces the whole keyword list
    SetKeywords(Vec<String>),
    /// Set-insert preserving order; a duplicate is a no-op
    AddKeyword(String),
    /// Removes by value; a missing keyword is a no-op
    RemoveKeyword(String),
    SetDraftResult(DraftResult),
    ClearDraft,
    SetFinalText(String),
    /// Forward-only step transition
    SetCurrentStep(SessionStep),
    /// Clears all fields and adopts the given fresh identity
    Reset { identity: SessionIdentity },
}

/// Actions over a batch [`super::teacher::TeacherSession`].
#[derive(Debug, Clone)]
pub enum TeacherSessionAction {
    SetBasicInfo(BasicInfo),
    /// Keyed upsert by student id
    AddStudent(StudentDescriptor),
    /// Removes the student and all per-student entries keyed by the id
    RemoveStudent { student_id: String },
    /// Keyed upsert by student id
    UpdateStudent(StudentDescriptor),
    /// Keyed upsert by student id; at most one activity per student
    UpsertStudentActivity(StudentActivity),
    /// Keyed upsert by student id; at most one record per student
    UpsertGeneratedRecord(GeneratedRecord),
    /// Forward-only step transition
    SetCurrentStep(SessionStep),
    /// Clears all fields and adopts the given fresh identity
    Reset { identity: SessionIdentity },
}
