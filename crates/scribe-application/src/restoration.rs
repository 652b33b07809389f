//! Session restoration from the remote store.
//!
//! Rebuilds an in-memory session from its authoritative remote row (and,
//! for teacher sessions, the per-student child rows). Restored sessions
//! jump straight to the review step since their input data is already
//! committed. Read errors here are surfaced: a user asking to resume a
//! session needs "could not load" rather than silently empty data.

use scribe_core::error::{Result, ScribeError};
use scribe_core::session::{
    is_locally_allocated, BasicInfo, DraftResult, GeneratedRecord, RemoteMetadata, RemoteRecord,
    RemoteSessionRepository, Session, SessionState, StudentActivity, StudentDescriptor,
    TeacherSession,
};
use std::sync::Arc;

/// Restores sessions from the remote repository.
pub struct RestorationService {
    repository: Arc<dyn RemoteSessionRepository>,
}

impl RestorationService {
    pub fn new(repository: Arc<dyn RemoteSessionRepository>) -> Self {
        Self { repository }
    }

    /// Whether a remote row exists for this session.
    ///
    /// Read-only: probing never creates a row. Used opportunistically at
    /// mount when the cached session id matches the local allocation
    /// scheme and might already have a remote counterpart.
    pub async fn probe_exists(&self, session_id: &str) -> Result<bool> {
        if !is_locally_allocated(session_id) {
            return Ok(false);
        }
        Ok(self.repository.get_by_session_id(session_id).await?.is_some())
    }

    /// Restores a single-subject session from its remote row.
    ///
    /// # Errors
    ///
    /// [`ScribeError::NotFound`] when no row exists for the session id;
    /// transport errors pass through.
    pub async fn restore_session(&self, user_id: &str, session_id: &str) -> Result<Session> {
        let record = self.fetch_record(session_id).await?;

        let mut session = Session::new(scribe_core::session::SessionIdentity {
            user_id: user_id.to_string(),
            session_id: record.session_id.clone(),
        });
        session.basic_info = basic_info_from(&record.metadata);
        session.emphasis_keywords = record.metadata.keywords.clone();
        session.draft_result = record.draft_text.clone().map(|text| DraftResult {
            draft_text: text,
            quality_score: None,
            recommended_keywords: Vec::new(),
        });
        session.final_text = record.final_text.clone();
        session.current_step = Session::restored_step();
        session.updated_at = record.updated_at;
        Ok(session)
    }

    /// Restores a teacher session from its remote row and child rows.
    ///
    /// A session without child rows restores with empty lists; that is not
    /// an error.
    pub async fn restore_teacher_session(
        &self,
        teacher_id: &str,
        session_id: &str,
    ) -> Result<TeacherSession> {
        let record = self.fetch_record(session_id).await?;
        let rows = self.repository.list_student_rows(session_id).await?;

        let mut session = TeacherSession::new(scribe_core::session::SessionIdentity {
            user_id: teacher_id.to_string(),
            session_id: record.session_id.clone(),
        });
        session.basic_info = basic_info_from(&record.metadata);

        for row in rows {
            session.students.push(StudentDescriptor {
                id: row.student_id.clone(),
                name: row.name.clone(),
                number: None,
            });
            if let Some(details) = row.activity {
                session.student_activities.push(StudentActivity {
                    student_id: row.student_id.clone(),
                    details,
                    updated_at: row.updated_at.clone(),
                });
            }
            if let Some(text) = row.generated_text {
                session.generated_records.push(GeneratedRecord {
                    student_id: row.student_id,
                    text,
                    confidence: row.confidence,
                    created_at: row.updated_at.clone(),
                    updated_at: row.updated_at,
                });
            }
        }

        session.current_step = TeacherSession::restored_step();
        session.updated_at = record.updated_at;
        tracing::debug!(
            "Restored teacher session '{}' with {} students",
            session.session_id,
            session.students.len()
        );
        Ok(session)
    }

    async fn fetch_record(&self, session_id: &str) -> Result<RemoteRecord> {
        self.repository
            .get_by_session_id(session_id)
            .await?
            .ok_or_else(|| ScribeError::not_found("Session", session_id))
    }
}

fn basic_info_from(metadata: &RemoteMetadata) -> Option<BasicInfo> {
    match (metadata.grade, metadata.semester, metadata.section_type) {
        (Some(grade), Some(semester), Some(section_type)) => Some(BasicInfo {
            grade,
            semester,
            section_type,
            subject: metadata.subject.clone(),
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryRemoteRepository;
    use scribe_core::session::{
        ActivityDetails, RemoteStudentRow, RemoteUpsert, SectionType, SessionIdentity,
        SessionStep,
    };

    fn seeded_record(session_id: &str) -> RemoteRecord {
        RemoteRecord {
            id: "row_1".to_string(),
            session_id: session_id.to_string(),
            title: "2학년 1학기 수학".to_string(),
            metadata: RemoteMetadata {
                grade: Some(2),
                semester: Some(1),
                section_type: Some(SectionType::Subject),
                subject: Some("수학".to_string()),
                activity_summary: None,
                keywords: vec!["탐구".to_string()],
            },
            draft_text: Some("생성된 초안".to_string()),
            final_text: None,
            updated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    #[tokio::test]
    async fn test_restore_missing_session_signals_not_found() {
        let repository = Arc::new(InMemoryRemoteRepository::new());
        let service = RestorationService::new(repository);

        let err = service
            .restore_session("u1", "session_123_abcdefgh")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_restore_session_jumps_to_review_step() {
        let repository = Arc::new(InMemoryRemoteRepository::new());
        repository.seed_record(seeded_record("session_123_abcdefgh"));
        let service = RestorationService::new(repository);

        let session = service
            .restore_session("u1", "session_123_abcdefgh")
            .await
            .unwrap();

        assert_eq!(session.current_step, SessionStep::Draft);
        assert_eq!(session.session_id, "session_123_abcdefgh");
        assert_eq!(session.basic_info.as_ref().unwrap().grade, 2);
        assert_eq!(session.emphasis_keywords, vec!["탐구"]);
        assert_eq!(
            session.draft_result.as_ref().unwrap().draft_text,
            "생성된 초안"
        );
    }

    #[tokio::test]
    async fn test_restore_teacher_session_without_children_yields_empty_lists() {
        let repository = Arc::new(InMemoryRemoteRepository::new());
        repository.seed_record(seeded_record("session_9_abcdefgh"));
        let service = RestorationService::new(repository);

        let session = service
            .restore_teacher_session("t1", "session_9_abcdefgh")
            .await
            .unwrap();

        assert!(session.students.is_empty());
        assert!(session.student_activities.is_empty());
        assert!(session.generated_records.is_empty());
        assert_eq!(session.current_step, SessionStep::Draft);
    }

    #[tokio::test]
    async fn test_restore_teacher_session_rebuilds_child_rows() {
        let repository = Arc::new(InMemoryRemoteRepository::new());
        repository.seed_record(seeded_record("session_9_abcdefgh"));
        repository.seed_student_row(RemoteStudentRow {
            id: "child_1".to_string(),
            session_id: "session_9_abcdefgh".to_string(),
            student_id: "s1".to_string(),
            name: "김철수".to_string(),
            activity: Some(ActivityDetails::Behavior {
                strengths: "성실함".to_string(),
                improvements: String::new(),
                peer_relations: String::new(),
            }),
            generated_text: Some("생성된 기록".to_string()),
            confidence: Some(0.8),
            updated_at: chrono::Utc::now().to_rfc3339(),
        });
        let service = RestorationService::new(repository);

        let session = service
            .restore_teacher_session("t1", "session_9_abcdefgh")
            .await
            .unwrap();

        assert_eq!(session.students.len(), 1);
        assert_eq!(session.student_activities.len(), 1);
        assert_eq!(session.generated_records.len(), 1);
        assert_eq!(session.generated_records[0].text, "생성된 기록");
    }

    #[tokio::test]
    async fn test_probe_is_read_only_and_scheme_gated() {
        let repository = Arc::new(InMemoryRemoteRepository::new());
        let service = RestorationService::new(repository.clone());

        let identity = SessionIdentity::allocate();
        assert!(!service.probe_exists(&identity.session_id).await.unwrap());
        // Foreign id shapes are not probed at all.
        assert!(!service.probe_exists("not-a-local-id").await.unwrap());
        // The probe must never create a row.
        assert!(repository.record(&identity.session_id).is_none());

        repository
            .upsert_by_session_id(
                &identity.session_id,
                RemoteUpsert {
                    title: "t".to_string(),
                    updated_at: chrono::Utc::now().to_rfc3339(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(service.probe_exists(&identity.session_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_read_errors_surface_to_caller() {
        let repository = Arc::new(InMemoryRemoteRepository::new());
        repository.set_fail_reads(true);
        let service = RestorationService::new(repository);

        let err = service
            .restore_session("u1", "session_1_abcdefgh")
            .await
            .unwrap_err();
        assert!(!err.is_not_found());
    }
}
