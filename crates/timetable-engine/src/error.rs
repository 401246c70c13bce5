//! Error types for scheduling operations.
//!
//! Conflicts are not errors: a conflicting placement comes back as a
//! [`crate::conflict::ConflictReport`] for the caller to act on. The variants
//! here cover malformed input and store failures only.

use thiserror::Error;

use crate::types::OccurrenceId;

#[derive(Error, Debug)]
pub enum ScheduleError {
    /// Malformed input, rejected before any store access.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// The identified occurrence does not exist.
    #[error("Occurrence {0} not found")]
    NotFound(OccurrenceId),

    /// Unexpected failure reading or writing the backing store.
    #[error("Store error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
