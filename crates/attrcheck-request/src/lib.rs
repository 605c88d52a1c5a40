//! Request validation over the path / query / body triple.
//!
//! Build a [`Handler`] once per route from a [`RequestSchema`]; each call
//! validates the three sub-records independently, merges the results and
//! invokes either the success continuation or a 400 JSON response.
//!
//! A handler keeps the error formatter that was registered when it was
//! built. Register the formatter before building any handler.

pub mod error;
pub mod formatter;
pub mod handler;
pub mod http;
pub mod schema;

pub use error::{RequestError, Result};
pub use formatter::{default_payload, error_formatter, ErrorFormatter};
pub use handler::{Handler, Middleware, Verdict};
pub use http::{RecordedResponse, Request, RequestParts, Response, BAD_REQUEST};
pub use schema::RequestSchema;
