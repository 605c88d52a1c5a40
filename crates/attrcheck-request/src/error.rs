use attrcheck_core::ConstraintError;

/// Errors raised while configuring request validation.
///
/// All of these happen when a handler is built, never per request.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// The request schema is absent or not a key/value object.
    #[error("validation schema must be an object")]
    NotAnObject,

    /// The request schema has none of `path`, `query` or `body`.
    #[error("validation schema cannot be empty/undefined")]
    Empty,

    /// The request schema has keys other than `path`, `query` and `body`.
    #[error("validation schema had unsupported keys: {}", .0.join(", "))]
    UnsupportedKeys(Vec<String>),

    /// A sub-schema is malformed or references an unknown validator.
    #[error(transparent)]
    Constraint(#[from] ConstraintError),
}

pub type Result<T> = std::result::Result<T, RequestError>;
