//! Application layer for Scribe.
//!
//! Wires the domain reducers to their persistence observers: the debounced
//! dual-write scheduler, the session engine, and the restoration service
//! that re-seeds a session from the remote store.

pub mod autosave;
pub mod debounce;
pub mod engine;
pub mod restoration;
pub mod testing;

pub use autosave::{AutosaveConfig, AutosaveScheduler, PersistencePhase};
pub use debounce::Debouncer;
pub use engine::SessionEngine;
pub use restoration::RestorationService;
