//! Session domain module.
//!
//! Contains the two session kinds (single-subject and teacher batch), the
//! typed actions and pure reducers that drive them, the local snapshot
//! projections, and the remote repository boundary.

pub mod action;
pub mod activity;
pub mod identity;
pub mod model;
pub mod reducer;
pub mod repository;
pub mod snapshot;
pub mod state;
pub mod step;
pub mod teacher;

pub use action::{SessionAction, TeacherSessionAction};
pub use activity::{ActivityDetails, ActivityEntry};
pub use identity::{is_locally_allocated, SessionIdentity};
pub use model::{BasicInfo, DraftResult, SectionType, Session};
pub use reducer::{reduce, reduce_teacher};
pub use repository::{
    RemoteMetadata, RemoteRecord, RemoteSessionRepository, RemoteStudentRow, RemoteUpsert,
};
pub use snapshot::{SessionSnapshot, TeacherSessionSnapshot};
pub use state::SessionState;
pub use step::SessionStep;
pub use teacher::{GeneratedRecord, StudentActivity, StudentDescriptor, TeacherSession};
