//! Teacher session domain model.
//!
//! The batch variant of a session: one teacher authoring records for a
//! whole class. Per-student lists are keyed by the student's stable id,
//! with at most one entry per student per list.

use super::activity::ActivityDetails;
use super::identity::SessionIdentity;
use super::model::BasicInfo;
use super::step::SessionStep;
use serde::{Deserialize, Serialize};

/// A student within a teacher session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDescriptor {
    /// Stable student identifier, the natural key of all per-student lists
    pub id: String,
    pub name: String,
    /// Class roster number, when known
    #[serde(default)]
    pub number: Option<u32>,
}

/// Structured activity input for one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentActivity {
    pub student_id: String,
    pub details: ActivityDetails,
    /// Timestamp of the last edit (ISO 8601 format)
    pub updated_at: String,
}

/// A generated record for one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedRecord {
    pub student_id: String,
    /// Generated record text
    pub text: String,
    /// Confidence reported by the generation service, 0.0..=1.0
    #[serde(default)]
    pub confidence: Option<f32>,
    /// Timestamp when the record was first generated (ISO 8601 format)
    pub created_at: String,
    /// Timestamp of the last regeneration or edit (ISO 8601 format)
    pub updated_at: String,
}

/// A teacher's batch working session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherSession {
    /// Owning teacher identifier
    pub teacher_id: String,
    /// Stable session identifier, sole join key across all stores
    pub session_id: String,
    /// Current authoring step
    #[serde(default)]
    pub current_step: SessionStep,
    #[serde(default)]
    pub basic_info: Option<BasicInfo>,
    /// Class roster
    #[serde(default)]
    pub students: Vec<StudentDescriptor>,
    /// Activity input per student, keyed by `student_id`
    #[serde(default)]
    pub student_activities: Vec<StudentActivity>,
    /// Generated records per student, keyed by `student_id`
    #[serde(default)]
    pub generated_records: Vec<GeneratedRecord>,
    /// Timestamp when the session was created (ISO 8601 format)
    pub created_at: String,
    /// Timestamp when the session was last updated (ISO 8601 format)
    pub updated_at: String,
}

impl TeacherSession {
    /// Creates a pristine teacher session carrying the given identity.
    pub fn new(identity: SessionIdentity) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            teacher_id: identity.user_id,
            session_id: identity.session_id,
            current_step: SessionStep::Basic,
            basic_info: None,
            students: Vec::new(),
            student_activities: Vec::new(),
            generated_records: Vec::new(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Title derived from basic info, or a placeholder when none is set.
    pub fn derived_title(&self) -> String {
        self.basic_info
            .as_ref()
            .map(|info| info.derived_title())
            .unwrap_or_else(|| "새 학급 기록".to_string())
    }

    /// Whether there is content worth persisting remotely.
    pub fn has_meaningful_content(&self) -> bool {
        self.basic_info.is_some()
            || !self.students.is_empty()
            || self
                .student_activities
                .iter()
                .any(|a| !a.details.is_empty())
    }

    /// The identity pair currently carried by this session.
    pub fn identity(&self) -> SessionIdentity {
        SessionIdentity {
            user_id: self.teacher_id.clone(),
            session_id: self.session_id.clone(),
        }
    }

    /// The activity entry for a student, if any.
    pub fn activity_for(&self, student_id: &str) -> Option<&StudentActivity> {
        self.student_activities
            .iter()
            .find(|a| a.student_id == student_id)
    }

    /// The generated record for a student, if any.
    pub fn record_for(&self, student_id: &str) -> Option<&GeneratedRecord> {
        self.generated_records
            .iter()
            .find(|r| r.student_id == student_id)
    }
}

/// Replaces the entry with the same key in place, or appends.
///
/// Shared keyed-upsert rule for all per-student lists: at most one entry
/// per student.
pub(crate) fn upsert_by_key<T, K>(list: &mut Vec<T>, key_of: K, entry: T)
where
    K: Fn(&T) -> &str,
{
    let key = key_of(&entry).to_string();
    if let Some(existing) = list.iter_mut().find(|item| key_of(item) == key) {
        *existing = entry;
    } else {
        list.push(entry);
    }
}
