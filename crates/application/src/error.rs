//! Application error types

use postcheck_domain::DomainError;
use thiserror::Error;

/// Application-level errors.
///
/// These abort a run before any case executes. Failures of individual cases
/// are reported as outcomes instead.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// A selected case name does not exist in the suite.
    #[error("unknown case '{name}', expected one of: {known}")]
    UnknownCase {
        /// The requested name.
        name: String,
        /// Comma-separated list of valid names.
        known: String,
    },

    /// The selection left nothing to run.
    #[error("no cases selected")]
    EmptySelection,
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
