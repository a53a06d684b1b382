//! Error types for the Fitcoach application
//!
//! Nothing in the domain core is fatal: every operation either succeeds, is
//! a safe no-op signalled through these types, or leaves local state ahead
//! of the remote copy.

use thiserror::Error;

/// Domain store error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Referenced client/exercise/program id does not exist; the operation
    /// had no effect
    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate plan-slot insert; the operation had no effect
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl StoreError {
    pub fn not_found(what: &str, id: &str) -> Self {
        StoreError::NotFound(format!("{what} {id}"))
    }
}

/// Result alias used by the domain store
pub type StoreResult<T> = Result<T, StoreError>;
