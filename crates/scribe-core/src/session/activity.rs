//! Section-specific activity details.
//!
//! Each record section collects a structurally different payload. The
//! payloads are modeled as one tagged variant per section type so that
//! summary extraction is an exhaustive match instead of a runtime shape
//! probe.

use serde::{Deserialize, Serialize};

/// A single named activity within the autonomous section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// Activity name (e.g., class president election, school festival)
    pub name: String,
    /// The student's role in the activity
    #[serde(default)]
    pub role: String,
    /// What the student actually did
    #[serde(default)]
    pub content: String,
}

/// Structured input for one record section, discriminated by section type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "section", rename_all = "snake_case")]
pub enum ActivityDetails {
    /// Subject-specific achievement record
    Subject {
        subject: String,
        #[serde(default)]
        achievement: String,
        #[serde(default)]
        learning_attitude: String,
        #[serde(default)]
        class_activities: String,
    },
    /// Autonomous activities (class and school events)
    Autonomous {
        #[serde(default)]
        activities: Vec<ActivityEntry>,
    },
    /// Club activities
    Club {
        club_name: String,
        #[serde(default)]
        activities: String,
        #[serde(default)]
        achievements: String,
    },
    /// Career activities and counseling
    Career {
        #[serde(default)]
        hope: String,
        #[serde(default)]
        activities: String,
        #[serde(default)]
        counseling: String,
    },
    /// Behavior and general opinion
    Behavior {
        #[serde(default)]
        strengths: String,
        #[serde(default)]
        improvements: String,
        #[serde(default)]
        peer_relations: String,
    },
}

impl ActivityDetails {
    /// Short human-readable summary persisted with the remote record.
    ///
    /// Returns `None` when the variant carries no content worth summarizing.
    pub fn summary(&self) -> Option<String> {
        match self {
            ActivityDetails::Subject {
                subject,
                achievement,
                learning_attitude,
                class_activities,
            } => {
                let parts: Vec<&str> = [achievement, learning_attitude, class_activities]
                    .into_iter()
                    .map(|s| s.as_str())
                    .filter(|s| !s.trim().is_empty())
                    .collect();
                if parts.is_empty() {
                    None
                } else {
                    Some(format!("{}: {}", subject, parts.join(" / ")))
                }
            }
            ActivityDetails::Autonomous { activities } => {
                let names: Vec<&str> = activities
                    .iter()
                    .map(|a| a.name.as_str())
                    .filter(|n| !n.trim().is_empty())
                    .collect();
                if names.is_empty() {
                    None
                } else {
                    Some(names.join(", "))
                }
            }
            ActivityDetails::Club {
                club_name,
                activities,
                achievements,
            } => {
                let parts: Vec<&str> = [activities, achievements]
                    .into_iter()
                    .map(|s| s.as_str())
                    .filter(|s| !s.trim().is_empty())
                    .collect();
                if club_name.trim().is_empty() && parts.is_empty() {
                    None
                } else if parts.is_empty() {
                    Some(club_name.clone())
                } else {
                    Some(format!("{}: {}", club_name, parts.join(" / ")))
                }
            }
            ActivityDetails::Career {
                hope,
                activities,
                counseling,
            } => {
                let parts: Vec<&str> = [hope, activities, counseling]
                    .into_iter()
                    .map(|s| s.as_str())
                    .filter(|s| !s.trim().is_empty())
                    .collect();
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join(" / "))
                }
            }
            ActivityDetails::Behavior {
                strengths,
                improvements,
                peer_relations,
            } => {
                let parts: Vec<&str> = [strengths, improvements, peer_relations]
                    .into_iter()
                    .map(|s| s.as_str())
                    .filter(|s| !s.trim().is_empty())
                    .collect();
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join(" / "))
                }
            }
        }
    }

    /// Whether the variant carries any meaningful content.
    pub fn is_empty(&self) -> bool {
        match self {
            ActivityDetails::Subject {
                subject,
                achievement,
                learning_attitude,
                class_activities,
            } => {
                subject.trim().is_empty()
                    && achievement.trim().is_empty()
                    && learning_attitude.trim().is_empty()
                    && class_activities.trim().is_empty()
            }
            ActivityDetails::Autonomous { activities } => {
                activities.iter().all(|a| {
                    a.name.trim().is_empty()
                        && a.role.trim().is_empty()
                        && a.content.trim().is_empty()
                })
            }
            ActivityDetails::Club {
                club_name,
                activities,
                achievements,
            } => {
                club_name.trim().is_empty()
                    && activities.trim().is_empty()
                    && achievements.trim().is_empty()
            }
            ActivityDetails::Career {
                hope,
                activities,
                counseling,
            } => {
                hope.trim().is_empty()
                    && activities.trim().is_empty()
                    && counseling.trim().is_empty()
            }
            ActivityDetails::Behavior {
                strengths,
                improvements,
                peer_relations,
            } => {
                strengths.trim().is_empty()
                    && improvements.trim().is_empty()
                    && peer_relations.trim().is_empty()
            }
        }
    }
}
