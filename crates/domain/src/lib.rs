//! postcheck domain - core types
//!
//! Requests, responses, test cases, the fixture and the standard suite.
//! All types here are pure Rust with no I/O dependencies.

pub mod case;
pub mod error;
pub mod fixture;
pub mod request;
pub mod response;
pub mod suite;
pub mod testing;

pub use case::{Expectation, TestCase, TokenSlot};
pub use error::{DomainError, DomainResult};
pub use fixture::{
    BearerTokens, DEFAULT_BASE_URL, Fixture, FixtureIds, LoginAccount, NewAccount, SamplePost,
};
pub use suite::{CASE_NAMES, standard_suite};
pub use testing::{CaseOutcome, CaseResult, RunReport};
