//! Domain error types

use thiserror::Error;

use crate::case::TokenSlot;

/// Domain-level errors that can occur while building requests.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A case needs a bearer token that is not configured.
    #[error("case '{case}' needs the {slot} bearer token, which is not configured")]
    MissingToken {
        /// Name of the case.
        case: String,
        /// Token slot the case refers to.
        slot: TokenSlot,
    },

    /// The request body could not be encoded.
    #[error("invalid body: {0}")]
    InvalidBody(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
