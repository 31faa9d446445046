//! Test case definitions.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DomainError, DomainResult};
use crate::fixture::Fixture;
use crate::request::{HttpMethod, RequestSpec};
use crate::response::StatusCode;

/// Which configured bearer token a case authenticates with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenSlot {
    /// First token.
    Primary,
    /// Second token.
    Secondary,
    /// Third token.
    Tertiary,
}

impl TokenSlot {
    /// Returns the slot name as used in configuration keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Tertiary => "tertiary",
        }
    }
}

impl fmt::Display for TokenSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a case asserts once its request has been built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expectation {
    /// The response status must equal this code.
    Status {
        /// Expected status code.
        expected: StatusCode,
    },
    /// The request is built but never sent, and nothing is asserted.
    NotImplemented {
        /// Why the case is not implemented.
        reason: String,
    },
}

/// One request/assert unit of the suite.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    /// Unique case name, e.g. `register`.
    pub name: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Path relative to the base URL, e.g. `/api/user/login`.
    pub path: String,
    /// JSON object body, if any.
    pub body: Option<Map<String, Value>>,
    /// Bearer token slot, if the endpoint is authenticated.
    pub token: Option<TokenSlot>,
    /// What is asserted.
    pub expectation: Expectation,
}

impl TestCase {
    /// Creates a case expecting an exact status code.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        method: HttpMethod,
        path: impl Into<String>,
        expected: u16,
    ) -> Self {
        Self {
            name: name.into(),
            method,
            path: path.into(),
            body: None,
            token: None,
            expectation: Expectation::Status {
                expected: StatusCode::new(expected),
            },
        }
    }

    /// Creates a case that builds its request but is not run.
    #[must_use]
    pub fn not_implemented(
        name: impl Into<String>,
        method: HttpMethod,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            method,
            path: path.into(),
            body: None,
            token: None,
            expectation: Expectation::NotImplemented {
                reason: reason.into(),
            },
        }
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Map<String, Value>) -> Self {
        self.body = Some(body);
        self
    }

    /// Authenticates the case with the given token slot.
    #[must_use]
    pub const fn with_token(mut self, slot: TokenSlot) -> Self {
        self.token = Some(slot);
        self
    }

    /// Returns the expected status, or `None` for a not-implemented case.
    #[must_use]
    pub const fn expected_status(&self) -> Option<StatusCode> {
        match &self.expectation {
            Expectation::Status { expected } => Some(*expected),
            Expectation::NotImplemented { .. } => None,
        }
    }

    /// Checks that the fixture carries the token this case needs.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingToken` if the slot is empty.
    pub fn check_token(&self, fixture: &Fixture) -> DomainResult<()> {
        match self.token {
            Some(slot) if fixture.tokens.get(slot).is_none() => Err(DomainError::MissingToken {
                case: self.name.clone(),
                slot,
            }),
            _ => Ok(()),
        }
    }

    /// Builds the HTTP request for this case.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be resolved or a required token is
    /// missing.
    pub fn to_request(
        &self,
        fixture: &Fixture,
        timeout: Option<Duration>,
    ) -> DomainResult<RequestSpec> {
        let url = fixture.endpoint(&self.path)?;
        let mut request = RequestSpec::new(&self.name, self.method, url).with_timeout(timeout);

        if let Some(slot) = self.token {
            let token = fixture.tokens.get(slot).ok_or_else(|| DomainError::MissingToken {
                case: self.name.clone(),
                slot,
            })?;
            request = request.with_bearer(token);
        }

        if let Some(body) = &self.body {
            request = request.with_json(body.clone());
        }

        Ok(request)
    }
}

/// Builds a JSON object from field/value pairs.
#[must_use]
pub fn object<const N: usize>(fields: [(&str, Value); N]) -> Map<String, Value> {
    fields
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}
