//! postcheck application - use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for the HTTP client and the clock)
//! - The suite runner use case
//! - Application-level error handling

pub mod error;
pub mod ports;
pub mod run_suite;

pub use error::{ApplicationError, ApplicationResult};
pub use ports::{Clock, HttpClient, HttpClientError};
pub use run_suite::{RunOptions, RunSuite};
