use std::fmt;
use std::io;
use std::path::Path;

use attrcheck_core::ConstraintError;
use attrcheck_request::RequestError;

pub const SUCCESS: i32 = 0;
/// Schema or validator configuration is unusable.
pub const FAILURE: i32 = 1;
/// The input was checked and has field errors.
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(path: &Path, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::NotFound
        | io::ErrorKind::PermissionDenied
        | io::ErrorKind::InvalidData
        | io::ErrorKind::IsADirectory => USAGE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{}: {err}", path.display()))
}

pub fn constraint_error(context: &str, err: ConstraintError) -> CliError {
    match err {
        // A record or schema file that is not JSON is a bad argument.
        ConstraintError::Json(_) => CliError::new(USAGE, format!("{context}: {err}")),
        other => CliError::new(FAILURE, format!("{context}: {other}")),
    }
}

pub fn request_error(context: &str, err: RequestError) -> CliError {
    match err {
        RequestError::Constraint(err) => constraint_error(context, err),
        other => CliError::new(FAILURE, format!("{context}: {other}")),
    }
}

pub fn json_error(path: &Path, err: serde_json::Error) -> CliError {
    CliError::new(USAGE, format!("{}: {err}", path.display()))
}
