use attrcheck_core::Schema;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{RequestError, Result};

const SUPPORTED_KEYS: [&str; 3] = ["path", "query", "body"];

/// Schemas for the three request sub-records.
///
/// A missing sub-schema means that sub-record is not validated.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct RequestSchema {
    pub path: Option<Schema>,
    pub query: Option<Schema>,
    pub body: Option<Schema>,
}

impl RequestSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(mut self, schema: Schema) -> Self {
        self.path = Some(schema);
        self
    }

    pub fn query(mut self, schema: Schema) -> Self {
        self.query = Some(schema);
        self
    }

    pub fn body(mut self, schema: Schema) -> Self {
        self.body = Some(schema);
        self
    }

    /// True when none of the three sub-schemas is set.
    pub fn is_empty(&self) -> bool {
        self.path.is_none() && self.query.is_none() && self.body.is_none()
    }

    /// Build from an untyped document, checking its shape.
    ///
    /// The document must be a non-empty object whose keys are a subset of
    /// `path`, `query` and `body`; a misspelt key such as `paths` is an
    /// error rather than a silently skipped section.
    pub fn from_value(value: &Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(RequestError::NotAnObject);
        };
        if map.is_empty() {
            return Err(RequestError::Empty);
        }

        let unsupported: Vec<String> = map
            .keys()
            .filter(|key| !SUPPORTED_KEYS.contains(&key.as_str()))
            .cloned()
            .collect();
        if !unsupported.is_empty() {
            return Err(RequestError::UnsupportedKeys(unsupported));
        }

        let section = |key: &str| -> Result<Option<Schema>> {
            match map.get(key) {
                None | Some(Value::Null) => Ok(None),
                Some(schema) => Ok(Some(Schema::from_value(schema)?)),
            }
        };
        Ok(Self {
            path: section("path")?,
            query: section("query")?,
            body: section("body")?,
        })
    }

    /// Parse from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(attrcheck_core::ConstraintError::from)?;
        Self::from_value(&value)
    }
}

impl TryFrom<Value> for RequestSchema {
    type Error = RequestError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(&value)
    }
}
