//! HTTP Request body types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DomainError, DomainResult};

/// HTTP request body.
///
/// The suite only ever sends JSON objects, so the body is either absent or a
/// field-name to value mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "fields", rename_all = "snake_case")]
pub enum RequestBody {
    /// No body
    #[default]
    None,
    /// JSON object body
    Json(Map<String, Value>),
}

impl RequestBody {
    /// Creates an empty body.
    #[must_use]
    pub const fn none() -> Self {
        Self::None
    }

    /// Creates a JSON object body from its fields.
    #[must_use]
    pub const fn json(fields: Map<String, Value>) -> Self {
        Self::Json(fields)
    }

    /// Returns whether there is no body to send.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the JSON fields, if any.
    #[must_use]
    pub const fn fields(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::None => None,
            Self::Json(fields) => Some(fields),
        }
    }

    /// Returns the content type if applicable.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Json(_) => Some("application/json"),
        }
    }

    /// Encodes the body for the wire.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBody` if the fields cannot be serialized.
    pub fn to_bytes(&self) -> DomainResult<Vec<u8>> {
        match self {
            Self::None => Ok(Vec::new()),
            Self::Json(fields) => {
                serde_json::to_vec(fields).map_err(|e| DomainError::InvalidBody(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_body() {
        let Value::Object(fields) = json!({"key": "value"}) else {
            unreachable!()
        };
        let body = RequestBody::json(fields);
        assert_eq!(body.content_type(), Some("application/json"));
        assert!(!body.is_empty());

        let decoded: Value = serde_json::from_slice(&body.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded, json!({"key": "value"}));
    }

    #[test]
    fn test_empty_body() {
        let body = RequestBody::none();
        assert!(body.is_empty());
        assert_eq!(body.content_type(), None);
        assert!(body.fields().is_none());
        assert!(body.to_bytes().unwrap().is_empty());
    }
}
