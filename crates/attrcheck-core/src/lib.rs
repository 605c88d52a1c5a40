//! Declarative, extensible constraint validation for key/value records.
//!
//! A [`Schema`] maps attribute names to named constraints. A frozen
//! [`ValidatorRegistry`] resolves each name to a [`Validator`] and the
//! record validator collects per-attribute error messages into
//! [`ValidationErrors`].
//!
//! Configuration mistakes (unknown validator names, unusable options) are
//! returned as [`ConstraintError`]; failed fields are plain data.

pub mod builtin;
pub mod config;
pub mod error;
pub mod messages;
pub mod outcome;
pub mod registry;
pub mod result;
pub mod schema;
pub mod validator;

pub use builtin::{DatetimeConfig, DatetimeOptions};
pub use config::ValidateOptions;
pub use error::{ConstraintError, Result};
pub use outcome::Outcome;
pub use registry::{FnValidator, RegistryBuilder, Validator, ValidatorRegistry};
pub use result::ValidationErrors;
pub use schema::{ConstraintSet, Record, Schema};
pub use validator::{evaluate_constraint, validate_attribute, validate_record};
