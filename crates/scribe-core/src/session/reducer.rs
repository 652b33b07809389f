//! Pure state-transition functions for both session kinds.
//!
//! Every transition takes the current state by reference and returns a new
//! value; callers never observe in-place mutation. The session identity is
//! untouched by every action except `Reset`, which adopts the fresh
//! identity supplied by the caller.

use super::action::{SessionAction, TeacherSessionAction};
use super::model::Session;
use super::teacher::{upsert_by_key, TeacherSession};

/// Applies one action to a single-subject session.
pub fn reduce(state: &Session, action: SessionAction) -> Session {
    let mut next = state.clone();
    match action {
        SessionAction::SetBasicInfo(info) => {
            next.basic_info = Some(info);
        }
        SessionAction::SetActivityDetails(details) => {
            next.activity_details = Some(details);
        }
        SessionAction::SetKeywords(keywords) => {
            next.emphasis_keywords = dedup_preserving_order(keywords);
        }
        SessionAction::AddKeyword(keyword) => {
            if !next.emphasis_keywords.contains(&keyword) {
                next.emphasis_keywords.push(keyword);
            }
        }
        SessionAction::RemoveKeyword(keyword) => {
            next.emphasis_keywords.retain(|k| k != &keyword);
        }
        SessionAction::SetDraftResult(draft) => {
            next.draft_result = Some(draft);
        }
        SessionAction::ClearDraft => {
            next.draft_result = None;
        }
        SessionAction::SetFinalText(text) => {
            next.final_text = Some(text);
        }
        SessionAction::SetCurrentStep(step) => {
            next.current_step = next.current_step.advance_to(step);
        }
        SessionAction::Reset { identity } => {
            return Session::new(identity);
        }
    }
    next.updated_at = chrono::Utc::now().to_rfc3339();
    next
}

/// Applies one action to a teacher session.
pub fn reduce_teacher(state: &TeacherSession, action: TeacherSessionAction) -> TeacherSession {
    let mut next = state.clone();
    match action {
        TeacherSessionAction::SetBasicInfo(info) => {
            next.basic_info = Some(info);
        }
        TeacherSessionAction::AddStudent(student)
        | TeacherSessionAction::UpdateStudent(student) => {
            upsert_by_key(&mut next.students, |s| s.id.as_str(), student);
        }
        TeacherSessionAction::RemoveStudent { student_id } => {
            next.students.retain(|s| s.id != student_id);
            next.student_activities.retain(|a| a.student_id != student_id);
            next.generated_records.retain(|r| r.student_id != student_id);
        }
        TeacherSessionAction::UpsertStudentActivity(activity) => {
            upsert_by_key(
                &mut next.student_activities,
                |a| a.student_id.as_str(),
                activity,
            );
        }
        TeacherSessionAction::UpsertGeneratedRecord(record) => {
            upsert_by_key(
                &mut next.generated_records,
                |r| r.student_id.as_str(),
                record,
            );
        }
        TeacherSessionAction::SetCurrentStep(step) => {
            next.current_step = next.current_step.advance_to(step);
        }
        TeacherSessionAction::Reset { identity } => {
            return TeacherSession::new(identity);
        }
    }
    next.updated_at = chrono::Utc::now().to_rfc3339();
    next
}

fn dedup_preserving_order(keywords: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(keywords.len());
    for keyword in keywords {
        if !seen.contains(&keyword) {
            seen.push(keyword);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::activity::ActivityDetails;
    use crate::session::identity::SessionIdentity;
    use crate::session::model::{BasicInfo, DraftResult, SectionType};
    use crate::session::step::SessionStep;
    use crate::session::teacher::{GeneratedRecord, StudentActivity, StudentDescriptor};

    fn fresh_session() -> Session {
        Session::new(SessionIdentity::allocate())
    }

    fn behavior_details(strengths: &str) -> ActivityDetails {
        ActivityDetails::Behavior {
            strengths: strengths.to_string(),
            improvements: String::new(),
            peer_relations: String::new(),
        }
    }

    #[test]
    fn test_identity_is_stable_across_actions() {
        let session = fresh_session();
        let original = session.identity();

        let mut state = session;
        let actions = vec![
            SessionAction::SetBasicInfo(BasicInfo {
                grade: 2,
                semester: 1,
                section_type: SectionType::Subject,
                subject: Some("수학".to_string()),
            }),
            SessionAction::AddKeyword("끈기".to_string()),
            SessionAction::SetActivityDetails(behavior_details("성실함")),
            SessionAction::SetCurrentStep(SessionStep::Input),
            SessionAction::ClearDraft,
        ];
        for action in actions {
            state = reduce(&state, action);
            assert_eq!(state.identity(), original);
        }
    }

    #[test]
    fn test_reset_adopts_fresh_identity_and_clears_fields() {
        let mut state = fresh_session();
        state = reduce(&state, SessionAction::AddKeyword("성실".to_string()));
        state = reduce(
            &state,
            SessionAction::SetFinalText("최종 문구".to_string()),
        );

        let fresh = SessionIdentity::allocate();
        let after = reduce(
            &state,
            SessionAction::Reset {
                identity: fresh.clone(),
            },
        );

        assert_eq!(after.identity(), fresh);
        assert_ne!(after.session_id, state.session_id);
        assert!(after.emphasis_keywords.is_empty());
        assert!(after.final_text.is_none());
        assert_eq!(after.current_step, SessionStep::Basic);
    }

    #[test]
    fn test_reducer_does_not_mutate_input() {
        let state = fresh_session();
        let before = state.clone();
        let _ = reduce(&state, SessionAction::AddKeyword("배려".to_string()));
        assert_eq!(state, before);
    }

    #[test]
    fn test_add_keyword_is_a_set_insert() {
        let mut state = fresh_session();
        state = reduce(&state, SessionAction::AddKeyword("협동".to_string()));
        state = reduce(&state, SessionAction::AddKeyword("협동".to_string()));
        state = reduce(&state, SessionAction::AddKeyword("리더십".to_string()));
        assert_eq!(state.emphasis_keywords, vec!["협동", "리더십"]);
    }

    #[test]
    fn test_remove_missing_keyword_is_noop() {
        let state = fresh_session();
        let after = reduce(&state, SessionAction::RemoveKeyword("없음".to_string()));
        assert!(after.emphasis_keywords.is_empty());
    }

    #[test]
    fn test_set_keywords_dedups_preserving_order() {
        let state = fresh_session();
        let after = reduce(
            &state,
            SessionAction::SetKeywords(vec![
                "a".to_string(),
                "b".to_string(),
                "a".to_string(),
            ]),
        );
        assert_eq!(after.emphasis_keywords, vec!["a", "b"]);
    }

    #[test]
    fn test_step_never_moves_backward() {
        let mut state = fresh_session();
        state = reduce(&state, SessionAction::SetCurrentStep(SessionStep::Draft));
        state = reduce(&state, SessionAction::SetCurrentStep(SessionStep::Basic));
        assert_eq!(state.current_step, SessionStep::Draft);
    }

    #[test]
    fn test_clear_draft_removes_draft_result() {
        let mut state = fresh_session();
        state = reduce(
            &state,
            SessionAction::SetDraftResult(DraftResult {
                draft_text: "초안".to_string(),
                quality_score: None,
                recommended_keywords: vec![],
            }),
        );
        assert!(state.draft_result.is_some());
        state = reduce(&state, SessionAction::ClearDraft);
        assert!(state.draft_result.is_none());
    }

    fn activity(student_id: &str, strengths: &str) -> StudentActivity {
        StudentActivity {
            student_id: student_id.to_string(),
            details: behavior_details(strengths),
            updated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    #[test]
    fn test_upsert_activity_is_idempotent_on_key() {
        let mut state = TeacherSession::new(SessionIdentity::allocate());
        state = reduce_teacher(
            &state,
            TeacherSessionAction::UpsertStudentActivity(activity("s1", "첫 내용")),
        );
        state = reduce_teacher(
            &state,
            TeacherSessionAction::UpsertStudentActivity(activity("s1", "바뀐 내용")),
        );

        assert_eq!(state.student_activities.len(), 1);
        match &state.student_activities[0].details {
            ActivityDetails::Behavior { strengths, .. } => assert_eq!(strengths, "바뀐 내용"),
            other => panic!("unexpected details: {:?}", other),
        }
    }

    #[test]
    fn test_upsert_generated_record_replaces_in_place() {
        let now = chrono::Utc::now().to_rfc3339();
        let mut state = TeacherSession::new(SessionIdentity::allocate());
        for text in ["첫 생성", "재생성"] {
            state = reduce_teacher(
                &state,
                TeacherSessionAction::UpsertGeneratedRecord(GeneratedRecord {
                    student_id: "s1".to_string(),
                    text: text.to_string(),
                    confidence: None,
                    created_at: now.clone(),
                    updated_at: now.clone(),
                }),
            );
        }
        assert_eq!(state.generated_records.len(), 1);
        assert_eq!(state.generated_records[0].text, "재생성");
    }

    #[test]
    fn test_remove_student_drops_keyed_entries() {
        let mut state = TeacherSession::new(SessionIdentity::allocate());
        state = reduce_teacher(
            &state,
            TeacherSessionAction::AddStudent(StudentDescriptor {
                id: "s1".to_string(),
                name: "김철수".to_string(),
                number: None,
            }),
        );
        state = reduce_teacher(
            &state,
            TeacherSessionAction::UpsertStudentActivity(activity("s1", "내용")),
        );
        state = reduce_teacher(
            &state,
            TeacherSessionAction::RemoveStudent {
                student_id: "s1".to_string(),
            },
        );

        assert!(state.students.is_empty());
        assert!(state.student_activities.is_empty());
    }

    #[test]
    fn test_add_existing_student_replaces_descriptor() {
        let mut state = TeacherSession::new(SessionIdentity::allocate());
        for name in ["김철수", "김영희"] {
            state = reduce_teacher(
                &state,
                TeacherSessionAction::AddStudent(StudentDescriptor {
                    id: "s1".to_string(),
                    name: name.to_string(),
                    number: None,
                }),
            );
        }
        assert_eq!(state.students.len(), 1);
        assert_eq!(state.students[0].name, "김영희");
    }
}
