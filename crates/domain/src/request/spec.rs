//! Request specification type

use std::time::Duration;

use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;

use super::{Header, Headers, HttpMethod, RequestBody};

/// Complete specification for an HTTP request, ready to hand to a client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestSpec {
    /// Name of the case that produced this request
    pub name: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute target URL
    pub url: Url,
    /// HTTP headers, in send order
    pub headers: Headers,
    /// Request body
    pub body: RequestBody,
    /// Per-request timeout; `None` leaves it to the client
    #[serde(skip)]
    pub timeout: Option<Duration>,
}

impl RequestSpec {
    /// Creates a request without headers or body.
    #[must_use]
    pub fn new(name: impl Into<String>, method: HttpMethod, url: Url) -> Self {
        Self {
            name: name.into(),
            method,
            url,
            headers: Headers::new(),
            body: RequestBody::none(),
            timeout: None,
        }
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, header: Header) -> Self {
        self.headers.add(header);
        self
    }

    /// Adds an `Authorization: Bearer` header.
    #[must_use]
    pub fn with_bearer(self, token: &str) -> Self {
        self.with_header(Header::bearer(token))
    }

    /// Sets a JSON object body and its `Content-Type` header.
    #[must_use]
    pub fn with_json(mut self, fields: Map<String, Value>) -> Self {
        self.body = RequestBody::json(fields);
        if let Some(content_type) = self.body.content_type() {
            self.headers.add(Header::new("Content-Type", content_type));
        }
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the URL path, e.g. `/api/posts`.
    #[must_use]
    pub fn path(&self) -> &str {
        self.url.path()
    }
}
