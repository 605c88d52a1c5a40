use serde_json::Value;

use crate::error::{ConstraintError, Result};
use crate::messages::{display_value, interpolate};
use crate::outcome::Outcome;
use crate::registry::Validator;
use crate::schema::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Inclusion,
    Exclusion,
}

/// `inclusion` and `exclusion`: membership in a list (or the keys of an
/// object) given directly or under `within`.
#[derive(Debug, Clone, Copy)]
pub struct MembershipValidator {
    mode: Mode,
}

impl MembershipValidator {
    pub fn inclusion() -> Self {
        Self {
            mode: Mode::Inclusion,
        }
    }

    pub fn exclusion() -> Self {
        Self {
            mode: Mode::Exclusion,
        }
    }

    fn name(&self) -> &'static str {
        match self.mode {
            Mode::Inclusion => "inclusion",
            Mode::Exclusion => "exclusion",
        }
    }
}

impl MembershipValidator {
    /// Split options into the collection to search and the message override.
    fn parse<'a>(
        &self,
        options: &'a Value,
        attribute: &str,
    ) -> Result<(&'a Value, Option<&'a str>)> {
        let (within, message) = match options {
            Value::Array(_) => (options, None),
            Value::Object(map) => match map.get("within") {
                Some(within) => (within, map.get("message").and_then(Value::as_str)),
                None => {
                    return Err(ConstraintError::invalid_options(
                        self.name(),
                        attribute,
                        "missing \"within\"",
                    ))
                }
            },
            other => {
                return Err(ConstraintError::invalid_options(
                    self.name(),
                    attribute,
                    format!("expected a list or an object with \"within\", got {other}"),
                ))
            }
        };
        if !(within.is_array() || within.is_object()) {
            return Err(ConstraintError::invalid_options(
                self.name(),
                attribute,
                format!("\"within\" must be a list or an object, got {within}"),
            ));
        }
        Ok((within, message))
    }
}

impl Validator for MembershipValidator {
    fn validate(
        &self,
        value: Option<&Value>,
        options: &Value,
        attribute: &str,
        _record: &Record,
    ) -> Result<Outcome> {
        let (within, message) = self.parse(options, attribute)?;
        let Some(value) = value else {
            return Ok(Outcome::Valid);
        };

        let found = match within {
            Value::Array(items) => items.contains(value),
            Value::Object(map) => value.as_str().is_some_and(|key| map.contains_key(key)),
            _ => false,
        };

        let (failed, default) = match self.mode {
            Mode::Inclusion => (!found, "^%{value} is not included in the list"),
            Mode::Exclusion => (found, "^%{value} is restricted"),
        };
        if !failed {
            return Ok(Outcome::Valid);
        }

        let rendered = display_value(value);
        Ok(Outcome::invalid(interpolate(
            message.unwrap_or(default),
            &[("value", rendered.as_str())],
        )))
    }

    fn check_options(&self, options: &Value, attribute: &str) -> Result<()> {
        self.parse(options, attribute).map(|_| ())
    }
}
