use serde::Deserialize;
use serde_json::Value;

use crate::builtin::decode_options;
use crate::error::Result;
use crate::messages::interpolate;
use crate::outcome::Outcome;
use crate::registry::Validator;
use crate::schema::Record;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LengthOptions {
    is: Option<usize>,
    minimum: Option<usize>,
    maximum: Option<usize>,
    message: Option<String>,
    not_valid: Option<String>,
    wrong_length: Option<String>,
    too_short: Option<String>,
    too_long: Option<String>,
}

/// Length bounds for strings (in characters) and arrays (in elements).
#[derive(Debug, Default, Clone, Copy)]
pub struct LengthValidator;

impl Validator for LengthValidator {
    fn validate(
        &self,
        value: Option<&Value>,
        options: &Value,
        attribute: &str,
        _record: &Record,
    ) -> Result<Outcome> {
        let options: LengthOptions = decode_options("length", attribute, options)?;

        let length = match value {
            Some(Value::String(text)) => text.chars().count(),
            Some(Value::Array(items)) => items.len(),
            _ => {
                return Ok(Outcome::invalid(
                    options
                        .message
                        .or(options.not_valid)
                        .unwrap_or_else(|| "has an incorrect length".to_string()),
                ))
            }
        };

        let mut errors = Vec::new();
        let mut check = |bound: Option<usize>,
                         fails: fn(usize, usize) -> bool,
                         custom: &Option<String>,
                         default: &str| {
            if let Some(count) = bound.filter(|count| fails(length, *count)) {
                let template = custom.as_deref().unwrap_or(default);
                let count = count.to_string();
                errors.push(interpolate(template, &[("count", count.as_str())]));
            }
        };

        check(
            options.is,
            |len, count| len != count,
            &options.wrong_length,
            "is the wrong length (should be %{count} characters)",
        );
        check(
            options.minimum,
            |len, count| len < count,
            &options.too_short,
            "is too short (minimum is %{count} characters)",
        );
        check(
            options.maximum,
            |len, count| len > count,
            &options.too_long,
            "is too long (maximum is %{count} characters)",
        );

        if errors.is_empty() {
            return Ok(Outcome::Valid);
        }
        Ok(match options.message {
            Some(message) => Outcome::invalid(message),
            None => Outcome::Invalid(errors),
        })
    }

    fn check_options(&self, options: &Value, attribute: &str) -> Result<()> {
        decode_options::<LengthOptions>("length", attribute, options).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn check(value: Value, options: Value) -> Vec<String> {
        LengthValidator
            .validate(Some(&value), &options, "name", &Record::new())
            .unwrap()
            .into_messages()
    }

    #[test]
    fn exact_length() {
        assert!(check(json!("abc"), json!({"is": 3})).is_empty());
        assert_eq!(
            check(json!("ab"), json!({"is": 3})),
            vec!["is the wrong length (should be 3 characters)".to_string()]
        );
    }

    #[test]
    fn minimum_and_maximum() {
        let options = json!({"minimum": 2, "maximum": 4});
        assert!(check(json!("abc"), options.clone()).is_empty());
        assert_eq!(
            check(json!("a"), options.clone()),
            vec!["is too short (minimum is 2 characters)".to_string()]
        );
        assert_eq!(
            check(json!("abcde"), options),
            vec!["is too long (maximum is 4 characters)".to_string()]
        );
    }

    #[test]
    fn counts_characters_and_array_elements() {
        assert!(check(json!("ééé"), json!({"is": 3})).is_empty());
        assert!(check(json!([1, 2]), json!({"maximum": 2})).is_empty());
    }

    #[test]
    fn values_without_length_are_rejected() {
        assert_eq!(
            check(json!(42), json!({"is": 2})),
            vec!["has an incorrect length".to_string()]
        );
    }

    #[test]
    fn message_replaces_all_errors() {
        assert_eq!(
            check(json!("a"), json!({"is": 3, "minimum": 2, "message": "bad size"})),
            vec!["bad size".to_string()]
        );
    }
}
