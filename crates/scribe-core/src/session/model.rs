//! Session domain model.
//!
//! This module contains the single-subject `Session` entity that holds one
//! student's in-progress activity-record authoring state.

use super::activity::ActivityDetails;
use super::identity::SessionIdentity;
use super::step::SessionStep;
use serde::{Deserialize, Serialize};

/// The record section a session is authoring, mirroring the
/// [`ActivityDetails`] discriminants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Subject,
    Autonomous,
    Club,
    Career,
    Behavior,
}

impl SectionType {
    /// Korean display label for the section, used in derived titles.
    pub fn label(&self) -> &'static str {
        match self {
            SectionType::Subject => "교과 세특",
            SectionType::Autonomous => "자율활동",
            SectionType::Club => "동아리활동",
            SectionType::Career => "진로활동",
            SectionType::Behavior => "행동특성",
        }
    }
}

/// Grade, semester and section selection made on the first step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicInfo {
    pub grade: u8,
    pub semester: u8,
    pub section_type: SectionType,
    /// Subject name, only meaningful for [`SectionType::Subject`]
    #[serde(default)]
    pub subject: Option<String>,
}

impl BasicInfo {
    /// Human-readable title derived from the basic info.
    ///
    /// For subject sections the subject name is used; other sections use
    /// their section label.
    pub fn derived_title(&self) -> String {
        let label = match (&self.section_type, &self.subject) {
            (SectionType::Subject, Some(subject)) if !subject.trim().is_empty() => {
                subject.clone()
            }
            _ => self.section_type.label().to_string(),
        };
        format!("{}학년 {}학기 {}", self.grade, self.semester, label)
    }
}

/// Output of one generation exchange: the draft text plus advisory data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftResult {
    /// Generated draft text
    pub draft_text: String,
    /// Quality score reported by the generation service, 0.0..=1.0
    #[serde(default)]
    pub quality_score: Option<f32>,
    /// Keywords the generation service recommends emphasizing
    #[serde(default)]
    pub recommended_keywords: Vec<String>,
}

/// A single student's working session.
///
/// A session is created in memory exactly once per page load (from the
/// local snapshot if present, otherwise fresh) and is only ever destroyed
/// by an explicit reset, which also allocates a new identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Owning user identifier
    pub user_id: String,
    /// Stable session identifier, sole join key across all stores
    pub session_id: String,
    /// Current authoring step
    #[serde(default)]
    pub current_step: SessionStep,
    #[serde(default)]
    pub basic_info: Option<BasicInfo>,
    #[serde(default)]
    pub activity_details: Option<ActivityDetails>,
    /// Ordered set of emphasis keywords
    #[serde(default)]
    pub emphasis_keywords: Vec<String>,
    /// Present once a draft has been generated
    #[serde(default)]
    pub draft_result: Option<DraftResult>,
    /// Present once the user has edited/saved a final text
    #[serde(default)]
    pub final_text: Option<String>,
    /// Timestamp when the session was created (ISO 8601 format)
    pub created_at: String,
    /// Timestamp when the session was last updated (ISO 8601 format)
    pub updated_at: String,
}

impl Session {
    /// Creates a pristine session carrying the given identity.
    pub fn new(identity: SessionIdentity) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            user_id: identity.user_id,
            session_id: identity.session_id,
            current_step: SessionStep::Basic,
            basic_info: None,
            activity_details: None,
            emphasis_keywords: Vec::new(),
            draft_result: None,
            final_text: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Title derived from basic info, or a placeholder when none is set.
    pub fn derived_title(&self) -> String {
        self.basic_info
            .as_ref()
            .map(|info| info.derived_title())
            .unwrap_or_else(|| "새 기록".to_string())
    }

    /// Whether there is content worth persisting remotely.
    pub fn has_meaningful_content(&self) -> bool {
        self.basic_info.is_some()
            || self
                .activity_details
                .as_ref()
                .is_some_and(|details| !details.is_empty())
    }

    /// The identity pair currently carried by this session.
    pub fn identity(&self) -> SessionIdentity {
        SessionIdentity {
            user_id: self.user_id.clone(),
            session_id: self.session_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject_info() -> BasicInfo {
        BasicInfo {
            grade: 2,
            semester: 1,
            section_type: SectionType::Subject,
            subject: Some("수학".to_string()),
        }
    }

    #[test]
    fn test_derived_title_uses_subject_name() {
        assert_eq!(subject_info().derived_title(), "2학년 1학기 수학");
    }

    #[test]
    fn test_derived_title_falls_back_to_section_label() {
        let info = BasicInfo {
            grade: 1,
            semester: 2,
            section_type: SectionType::Club,
            subject: None,
        };
        assert_eq!(info.derived_title(), "1학년 2학기 동아리활동");
    }

    #[test]
    fn test_fresh_session_has_no_meaningful_content() {
        let session = Session::new(SessionIdentity::allocate());
        assert!(!session.has_meaningful_content());
        assert_eq!(session.current_step, SessionStep::Basic);
    }

    #[test]
    fn test_basic_info_alone_is_meaningful() {
        let mut session = Session::new(SessionIdentity::allocate());
        session.basic_info = Some(subject_info());
        assert!(session.has_meaningful_content());
    }
}
