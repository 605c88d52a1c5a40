use serde_json::Value;

use crate::error::{ConstraintError, Result};
use crate::messages::{interpolate, prettify};
use crate::outcome::Outcome;
use crate::registry::Validator;
use crate::schema::{lookup, Record};

/// Cross-field check: the value must equal another attribute of the same
/// record (`"password"` or `{attribute: "password", message}`).
#[derive(Debug, Default, Clone, Copy)]
pub struct EqualityValidator;

/// The other attribute's name and the message override.
fn target<'a>(options: &'a Value, attribute: &str) -> Result<(&'a str, Option<&'a str>)> {
    let (other, message) = match options {
        Value::String(other) => (other.as_str(), None),
        Value::Object(map) => (
            map.get("attribute").and_then(Value::as_str).unwrap_or(""),
            map.get("message").and_then(Value::as_str),
        ),
        _ => ("", None),
    };
    if other.is_empty() {
        return Err(ConstraintError::invalid_options(
            "equality",
            attribute,
            "the attribute must be a non empty string",
        ));
    }
    Ok((other, message))
}

impl Validator for EqualityValidator {
    fn validate(
        &self,
        value: Option<&Value>,
        options: &Value,
        attribute: &str,
        record: &Record,
    ) -> Result<Outcome> {
        let (other, message) = target(options, attribute)?;
        if value == lookup(record, other) {
            return Ok(Outcome::Valid);
        }
        let other = prettify(other);
        Ok(Outcome::invalid(interpolate(
            message.unwrap_or("is not equal to %{attribute}"),
            &[("attribute", other.as_str())],
        )))
    }

    fn check_options(&self, options: &Value, attribute: &str) -> Result<()> {
        target(options, attribute).map(|_| ())
    }
}
