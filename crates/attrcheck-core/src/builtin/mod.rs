//! Built-in validator catalog.

pub mod coordinate;
pub mod datetime;
pub mod equality;
pub mod format;
pub mod kind;
pub mod length;
pub mod membership;
pub mod numericality;
pub mod presence;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ConstraintError, Result};
use crate::registry::RegistryBuilder;

pub use coordinate::CoordinateValidator;
pub use datetime::{DatetimeConfig, DatetimeOptions, DatetimeValidator};
pub use equality::EqualityValidator;
pub use format::{EmailValidator, FormatValidator};
pub use kind::TypeValidator;
pub use length::LengthValidator;
pub use membership::MembershipValidator;
pub use numericality::NumericalityValidator;
pub use presence::PresenceValidator;

pub(crate) fn register_all(builder: &mut RegistryBuilder) {
    builder
        .register("presence", PresenceValidator)
        .register("length", LengthValidator)
        .register("numericality", NumericalityValidator)
        .register("inclusion", MembershipValidator::inclusion())
        .register("exclusion", MembershipValidator::exclusion())
        .register("format", FormatValidator::new())
        .register("email", EmailValidator)
        .register("equality", EqualityValidator)
        .register("type", TypeValidator)
        .register("latitude", CoordinateValidator::latitude())
        .register("longitude", CoordinateValidator::longitude())
        .datetime(DatetimeConfig::default());
}

/// Decode validator options. `true` selects the defaults.
pub(crate) fn decode_options<T>(validator: &str, attribute: &str, options: &Value) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    match options {
        Value::Bool(true) => Ok(T::default()),
        Value::Object(_) => serde_json::from_value(options.clone())
            .map_err(|err| ConstraintError::invalid_options(validator, attribute, err.to_string())),
        other => Err(ConstraintError::invalid_options(
            validator,
            attribute,
            format!("expected true or an object, got {other}"),
        )),
    }
}

/// Loose numeric coercion: numbers as-is, numeric strings parsed, booleans
/// as 0/1. Blank strings coerce to 0.
pub(crate) fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => parse_numeric_str(text),
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        _ => None,
    }
}

pub(crate) fn parse_numeric_str(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0.0);
    }
    text.parse::<f64>().ok().filter(|number| number.is_finite())
}
