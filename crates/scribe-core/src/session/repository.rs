//! Remote session repository boundary.
//!
//! Defines the interface to the authoritative server-side store. The
//! transport behind it (HTTP, BaaS client, in-memory fake) is out of scope;
//! the core only relies on idempotent upsert-by-session-id semantics.

use super::activity::ActivityDetails;
use super::model::SectionType;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Structured, non-generated metadata carried on every upsert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteMetadata {
    #[serde(default)]
    pub grade: Option<u8>,
    #[serde(default)]
    pub semester: Option<u8>,
    #[serde(default)]
    pub section_type: Option<SectionType>,
    #[serde(default)]
    pub subject: Option<String>,
    /// Short summary extracted from the structured activity details
    #[serde(default)]
    pub activity_summary: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Partial fields for one upsert.
///
/// The generic autosave path sends title and metadata only. Generated
/// draft/final text travel exclusively on the explicit save path, so
/// `None` here means "leave the stored value untouched".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteUpsert {
    pub title: String,
    pub metadata: RemoteMetadata,
    #[serde(default)]
    pub draft_text: Option<String>,
    #[serde(default)]
    pub final_text: Option<String>,
    /// Last-write-wins conflict timestamp (ISO 8601 format)
    pub updated_at: String,
}

/// The authoritative server-side row for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteRecord {
    /// Server-assigned row id
    pub id: String,
    /// Session identifier, unique across all rows
    pub session_id: String,
    pub title: String,
    pub metadata: RemoteMetadata,
    #[serde(default)]
    pub draft_text: Option<String>,
    #[serde(default)]
    pub final_text: Option<String>,
    /// Timestamp of the last accepted write (ISO 8601 format)
    pub updated_at: String,
}

/// A per-student child row of a teacher session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteStudentRow {
    /// Server-assigned row id
    pub id: String,
    /// Foreign reference to the owning session
    pub session_id: String,
    pub student_id: String,
    pub name: String,
    /// Structured activity input, when the student has committed one
    #[serde(default)]
    pub activity: Option<ActivityDetails>,
    #[serde(default)]
    pub generated_text: Option<String>,
    #[serde(default)]
    pub confidence: Option<f32>,
    pub updated_at: String,
}

/// An abstract repository for the authoritative remote session store.
///
/// Implementations must make `upsert_by_session_id` idempotent: the first
/// call for a session id creates the row, every later call updates it.
/// There is never an insert-then-update race for the caller to manage.
#[async_trait]
pub trait RemoteSessionRepository: Send + Sync {
    /// Creates or updates the row for a session.
    ///
    /// # Returns
    ///
    /// The row as stored after the write, including the server-assigned id.
    async fn upsert_by_session_id(
        &self,
        session_id: &str,
        fields: RemoteUpsert,
    ) -> Result<RemoteRecord>;

    /// Finds the row for a session.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))`: row found
    /// - `Ok(None)`: no row for this session id
    /// - `Err(_)`: transport or server error
    async fn get_by_session_id(&self, session_id: &str) -> Result<Option<RemoteRecord>>;

    /// Deletes a row by its server-assigned id.
    async fn delete_by_id(&self, id: &str) -> Result<()>;

    /// Lists all per-student child rows for a session.
    ///
    /// A session without child rows yields an empty list, not an error.
    async fn list_student_rows(&self, session_id: &str) -> Result<Vec<RemoteStudentRow>>;

    /// Creates or updates a per-student child row, keyed by
    /// `(session_id, student_id)`.
    async fn upsert_student_row(&self, session_id: &str, row: RemoteStudentRow) -> Result<()>;
}
