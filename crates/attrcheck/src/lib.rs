//! Declarative constraint validation for records and HTTP requests.
//!
//! # Crate Structure
//!
//! - [`core`] - Validator registry, constraint evaluation and the built-in catalog
//! - [`request`] - Path/query/body request validation (behind `request` feature)

/// Re-export core types.
pub mod core {
    pub use attrcheck_core::*;
}

/// Re-export request adapter types (requires `request` feature).
#[cfg(feature = "request")]
pub mod request {
    pub use attrcheck_request::*;
}

pub use attrcheck_core::{
    ConstraintError, ConstraintSet, Outcome, Record, RegistryBuilder, Schema, ValidateOptions,
    ValidationErrors, Validator, ValidatorRegistry,
};
