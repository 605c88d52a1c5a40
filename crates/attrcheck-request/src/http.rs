//! The request/response surface the handler needs from a web framework.

use attrcheck_core::Record;
use serde_json::Value;

/// HTTP 400.
pub const BAD_REQUEST: u16 = 400;

/// Read access to the three validated sub-records of a request.
pub trait Request {
    /// Path parameters.
    fn params(&self) -> Option<&Record>;

    fn query(&self) -> Option<&Record>;

    fn body(&self) -> Option<&Record>;
}

/// Chainable status + JSON response writer.
pub trait Response {
    fn status(&mut self, code: u16) -> &mut Self;

    fn json(&mut self, payload: Value);
}

/// Owned request parts, for callers that have already extracted them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestParts {
    pub params: Option<Record>,
    pub query: Option<Record>,
    pub body: Option<Record>,
}

impl RequestParts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(mut self, params: Record) -> Self {
        self.params = Some(params);
        self
    }

    pub fn with_query(mut self, query: Record) -> Self {
        self.query = Some(query);
        self
    }

    pub fn with_body(mut self, body: Record) -> Self {
        self.body = Some(body);
        self
    }
}

impl Request for RequestParts {
    fn params(&self) -> Option<&Record> {
        self.params.as_ref()
    }

    fn query(&self) -> Option<&Record> {
        self.query.as_ref()
    }

    fn body(&self) -> Option<&Record> {
        self.body.as_ref()
    }
}

/// A response that just remembers what was written to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordedResponse {
    pub status: Option<u16>,
    pub body: Option<Value>,
}

impl Response for RecordedResponse {
    fn status(&mut self, code: u16) -> &mut Self {
        self.status = Some(code);
        self
    }

    fn json(&mut self, payload: Value) {
        self.body = Some(payload);
    }
}
