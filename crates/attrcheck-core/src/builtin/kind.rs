use serde_json::Value;

use crate::error::{ConstraintError, Result};
use crate::messages::interpolate;
use crate::outcome::Outcome;
use crate::registry::Validator;
use crate::schema::Record;

/// JSON type check: `string`, `number`, `integer`, `boolean`, `array` or
/// `object`, given directly or as `{type, message}`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TypeValidator;

const KINDS: [&str; 6] = ["string", "number", "integer", "boolean", "array", "object"];

/// The required type name and the message override.
fn expected<'a>(options: &'a Value, attribute: &str) -> Result<(&'a str, Option<&'a str>)> {
    let (kind, message) = match options {
        Value::String(kind) => (kind.as_str(), None),
        Value::Object(map) => (
            map.get("type").and_then(Value::as_str).unwrap_or(""),
            map.get("message").and_then(Value::as_str),
        ),
        _ => ("", None),
    };
    if !KINDS.contains(&kind) {
        return Err(ConstraintError::invalid_options(
            "type",
            attribute,
            format!("unsupported type \"{kind}\""),
        ));
    }
    Ok((kind, message))
}

fn is_kind(value: &Value, kind: &str) -> bool {
    match kind {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        _ => false,
    }
}

impl Validator for TypeValidator {
    fn validate(
        &self,
        value: Option<&Value>,
        options: &Value,
        attribute: &str,
        _record: &Record,
    ) -> Result<Outcome> {
        let (kind, message) = expected(options, attribute)?;
        let Some(value) = value else {
            return Ok(Outcome::Valid);
        };

        if is_kind(value, kind) {
            return Ok(Outcome::Valid);
        }
        Ok(Outcome::invalid(interpolate(
            message.unwrap_or("must be of type %{type}"),
            &[("type", kind)],
        )))
    }

    fn check_options(&self, options: &Value, attribute: &str) -> Result<()> {
        expected(options, attribute).map(|_| ())
    }
}
