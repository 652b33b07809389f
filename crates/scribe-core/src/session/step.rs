//! Session step state machine.
//!
//! A session advances through four steps while authoring a record:
//! basic info entry, activity input, draft review, and final editing.

use serde::{Deserialize, Serialize};

/// The current step of a working session.
///
/// Steps are strictly ordered. Normal UI-driven transitions only move
/// forward; only a reset returns to [`SessionStep::Basic`]. Restoring a
/// session from the remote store may jump directly to a later step without
/// passing through the intermediate ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStep {
    /// Entering grade, semester and section type
    Basic,
    /// Entering section-specific activity details
    Input,
    /// Reviewing the generated draft
    Draft,
    /// Editing and saving the final text
    Final,
}

impl SessionStep {
    /// Returns the step to move to for a forward-only transition.
    ///
    /// Moving to an earlier step is ignored and the current step is kept.
    /// Resets do not go through this method.
    pub fn advance_to(self, target: SessionStep) -> SessionStep {
        if target >= self { target } else { self }
    }

    /// String label used in storage keys and log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStep::Basic => "basic",
            SessionStep::Input => "input",
            SessionStep::Draft => "draft",
            SessionStep::Final => "final",
        }
    }
}

impl Default for SessionStep {
    fn default() -> Self {
        SessionStep::Basic
    }
}

impl std::fmt::Display for SessionStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transition_is_accepted() {
        assert_eq!(
            SessionStep::Basic.advance_to(SessionStep::Input),
            SessionStep::Input
        );
        assert_eq!(
            SessionStep::Input.advance_to(SessionStep::Final),
            SessionStep::Final
        );
    }

    #[test]
    fn test_backward_transition_is_ignored() {
        assert_eq!(
            SessionStep::Draft.advance_to(SessionStep::Basic),
            SessionStep::Draft
        );
        assert_eq!(
            SessionStep::Final.advance_to(SessionStep::Draft),
            SessionStep::Final
        );
    }

    #[test]
    fn test_serialized_as_lowercase() {
        let json = serde_json::to_string(&SessionStep::Draft).unwrap();
        assert_eq!(json, "\"draft\"");
    }
}
