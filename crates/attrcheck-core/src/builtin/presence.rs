use serde::Deserialize;
use serde_json::Value;

use crate::builtin::decode_options;
use crate::error::Result;
use crate::outcome::Outcome;
use crate::registry::Validator;
use crate::schema::Record;

const BLANK: &str = "can't be blank";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PresenceOptions {
    allow_empty: Option<bool>,
    message: Option<String>,
}

/// Reports missing attributes. With `allowEmpty: false`, blank strings and
/// empty collections count as missing too.
#[derive(Debug, Default, Clone, Copy)]
pub struct PresenceValidator;

impl Validator for PresenceValidator {
    fn validate(
        &self,
        value: Option<&Value>,
        options: &Value,
        attribute: &str,
        _record: &Record,
    ) -> Result<Outcome> {
        let options: PresenceOptions = decode_options("presence", attribute, options)?;
        let missing = match (value, options.allow_empty) {
            (None, _) => true,
            (Some(value), Some(false)) => is_empty(value),
            (Some(_), _) => false,
        };

        if missing {
            return Ok(Outcome::invalid(options.message.unwrap_or_else(|| BLANK.to_string())));
        }
        Ok(Outcome::Valid)
    }

    fn validates_absent(&self) -> bool {
        true
    }

    fn check_options(&self, options: &Value, attribute: &str) -> Result<()> {
        decode_options::<PresenceOptions>("presence", attribute, options).map(|_| ())
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
