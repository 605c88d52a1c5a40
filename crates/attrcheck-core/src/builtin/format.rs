use std::collections::HashMap;
use std::sync::{LazyLock, Mutex, PoisonError};

use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use serde_json::Value;

use crate::builtin::decode_options;
use crate::error::{ConstraintError, Result};
use crate::outcome::Outcome;
use crate::registry::Validator;
use crate::schema::Record;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(
        r"^[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$",
    )
    .case_insensitive(true)
    .build()
    .expect("email pattern compiles")
});

#[derive(Debug, Default, Deserialize)]
struct FormatOptions {
    pattern: Option<String>,
    flags: Option<String>,
    message: Option<String>,
}

/// Whole-value regular expression match. Options are a pattern string or
/// `{pattern, flags, message}`; flags `i`, `m` and `s` are honoured.
///
/// Compiled expressions are cached by pattern and flags, so a schema's
/// patterns are built once (at [`Validator::check_options`] time when the
/// schema is checked up front).
#[derive(Debug, Default)]
pub struct FormatValidator {
    compiled: Mutex<HashMap<(String, String), Regex>>,
}

impl FormatValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve options into the compiled expression and the message override.
    fn parse(&self, options: &Value, attribute: &str) -> Result<(Regex, Option<String>)> {
        let options = match options {
            Value::String(pattern) => FormatOptions {
                pattern: Some(pattern.clone()),
                ..FormatOptions::default()
            },
            other => decode_options("format", attribute, other)?,
        };
        let Some(pattern) = options.pattern else {
            return Err(ConstraintError::invalid_options(
                "format",
                attribute,
                "missing \"pattern\"",
            ));
        };
        let key = (pattern, options.flags.unwrap_or_default());

        let mut compiled = self.compiled.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(regex) = compiled.get(&key) {
            return Ok((regex.clone(), options.message));
        }
        let regex = compile(&key.0, &key.1)
            .map_err(|err| ConstraintError::invalid_options("format", attribute, err.to_string()))?;
        compiled.insert(key, regex.clone());
        Ok((regex, options.message))
    }

    #[cfg(test)]
    fn cached(&self) -> usize {
        self.compiled.lock().map_or(0, |compiled| compiled.len())
    }
}

impl Validator for FormatValidator {
    fn validate(
        &self,
        value: Option<&Value>,
        options: &Value,
        attribute: &str,
        _record: &Record,
    ) -> Result<Outcome> {
        let (regex, message) = self.parse(options, attribute)?;
        match value {
            Some(Value::String(text)) if regex.is_match(text) => Ok(Outcome::Valid),
            _ => Ok(Outcome::invalid(
                message.unwrap_or_else(|| "is invalid".to_string()),
            )),
        }
    }

    fn check_options(&self, options: &Value, attribute: &str) -> Result<()> {
        self.parse(options, attribute).map(|_| ())
    }
}

fn compile(pattern: &str, flags: &str) -> std::result::Result<Regex, regex::Error> {
    RegexBuilder::new(&format!("^(?:{pattern})$"))
        .case_insensitive(flags.contains('i'))
        .multi_line(flags.contains('m'))
        .dot_matches_new_line(flags.contains('s'))
        .build()
}

#[derive(Debug, Default, Deserialize)]
struct EmailOptions {
    message: Option<String>,
}

/// Address syntax check for e-mail values.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmailValidator;

impl Validator for EmailValidator {
    fn validate(
        &self,
        value: Option<&Value>,
        options: &Value,
        attribute: &str,
        _record: &Record,
    ) -> Result<Outcome> {
        let options: EmailOptions = decode_options("email", attribute, options)?;
        match value {
            Some(Value::String(text)) if EMAIL.is_match(text) => Ok(Outcome::Valid),
            _ => Ok(Outcome::invalid(
                options
                    .message
                    .unwrap_or_else(|| "is not a valid email".to_string()),
            )),
        }
    }

    fn check_options(&self, options: &Value, attribute: &str) -> Result<()> {
        decode_options::<EmailOptions>("email", attribute, options).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn format(value: Value, options: Value) -> Result<Outcome> {
        FormatValidator::new().validate(Some(&value), &options, "code", &Record::new())
    }

    #[test]
    fn pattern_must_match_whole_value() {
        assert!(format(json!("abc"), json!("[a-z]+")).unwrap().is_valid());
        assert_eq!(
            format(json!("abc1"), json!("[a-z]+")).unwrap(),
            Outcome::invalid("is invalid")
        );
        assert_eq!(
            format(json!("abc"), json!("a|abc")).unwrap(),
            Outcome::Valid
        );
    }

    #[test]
    fn flags_and_message() {
        let options = json!({"pattern": "[a-z]+", "flags": "i", "message": "letters only"});
        assert!(format(json!("ABC"), options.clone()).unwrap().is_valid());
        assert_eq!(
            format(json!("123"), options).unwrap(),
            Outcome::invalid("letters only")
        );
    }

    #[test]
    fn non_strings_are_invalid() {
        assert_eq!(
            format(json!(42), json!("\\d+")).unwrap(),
            Outcome::invalid("is invalid")
        );
    }

    #[test]
    fn bad_pattern_is_configuration_error() {
        assert!(matches!(
            format(json!("x"), json!("(")),
            Err(ConstraintError::InvalidOptions { .. })
        ));
        assert!(matches!(
            format(json!("x"), json!({"flags": "i"})),
            Err(ConstraintError::InvalidOptions { .. })
        ));
    }

    #[test]
    fn compiled_patterns_are_reused() {
        let validator = FormatValidator::new();
        validator.check_options(&json!("[a-z]+"), "code").unwrap();
        for text in ["abc", "xyz", "123"] {
            let _ = validator
                .validate(Some(&json!(text)), &json!("[a-z]+"), "code", &Record::new())
                .unwrap();
        }
        assert_eq!(validator.cached(), 1);

        let flagged = json!({"pattern": "[a-z]+", "flags": "i"});
        assert!(validator
            .validate(Some(&json!("ABC")), &flagged, "code", &Record::new())
            .unwrap()
            .is_valid());
        assert_eq!(validator.cached(), 2);
    }

    #[test]
    fn bad_pattern_fails_option_check() {
        assert!(matches!(
            FormatValidator::new().check_options(&json!("("), "code"),
            Err(ConstraintError::InvalidOptions { .. })
        ));
    }

    #[test]
    fn email_addresses() {
        let check = |value: Value| {
            EmailValidator
                .validate(Some(&value), &json!(true), "email", &Record::new())
                .unwrap()
        };
        assert!(check(json!("nick@example.com")).is_valid());
        assert!(check(json!("First.Last+tag@Sub.Example.org")).is_valid());
        assert_eq!(
            check(json!("not-an-email")),
            Outcome::invalid("is not a valid email")
        );
        assert!(!check(json!(7)).is_valid());
    }
}
