//! Core domain layer for Scribe.
//!
//! This crate holds the session domain models, the pure reducers that
//! drive them, and the trait boundaries to external collaborators (remote
//! store, generation service, authentication oracle). It performs no I/O.

pub mod auth;
pub mod error;
pub mod generation;
pub mod session;

pub use auth::AuthContext;
pub use error::{Result, ScribeError};
