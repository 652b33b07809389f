//! Infrastructure layer for Scribe.
//!
//! Provides the on-device persistence backing the session engine: a
//! file-backed key/value store, the kind-scoped snapshot store, and the
//! identity allocator that resumes or starts a session at mount.

pub mod identity;
pub mod local_store;
pub mod snapshot_store;

pub use identity::allocate_or_restore;
pub use local_store::{FileLocalStore, LocalStore};
pub use snapshot_store::SnapshotStore;
