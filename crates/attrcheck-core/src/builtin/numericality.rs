use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::builtin::{decode_options, parse_numeric_str};
use crate::error::Result;
use crate::messages::{display_number, interpolate};
use crate::outcome::Outcome;
use crate::registry::Validator;
use crate::schema::Record;

static STRICT_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?(0|[1-9]\d*)$").expect("strict integer pattern compiles"));
static STRICT_DECIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?(0|[1-9]\d*)(\.\d+)?$").expect("strict decimal pattern compiles")
});

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct NumericalityOptions {
    only_integer: bool,
    strict: bool,
    no_strings: bool,
    greater_than: Option<f64>,
    greater_than_or_equal_to: Option<f64>,
    equal_to: Option<f64>,
    less_than_or_equal_to: Option<f64>,
    less_than: Option<f64>,
    divisible_by: Option<f64>,
    odd: bool,
    even: bool,
    message: Option<String>,
    not_valid: Option<String>,
    not_integer: Option<String>,
}

/// Numeric comparisons. Numeric strings are coerced unless `noStrings` is
/// set; `strict` additionally requires canonical decimal notation.
#[derive(Debug, Default, Clone, Copy)]
pub struct NumericalityValidator;

impl Validator for NumericalityValidator {
    fn validate(
        &self,
        value: Option<&Value>,
        options: &Value,
        attribute: &str,
        _record: &Record,
    ) -> Result<Outcome> {
        let options: NumericalityOptions = decode_options("numericality", attribute, options)?;
        let not_valid = || {
            options
                .message
                .clone()
                .or_else(|| options.not_valid.clone())
                .unwrap_or_else(|| "is not a number".to_string())
        };

        let number = match value {
            Some(Value::Number(number)) => number.as_f64(),
            Some(Value::String(text)) if options.strict => {
                let pattern = if options.only_integer {
                    &*STRICT_INTEGER
                } else {
                    &*STRICT_DECIMAL
                };
                if !pattern.is_match(text) {
                    return Ok(Outcome::invalid(
                        options
                            .message
                            .clone()
                            .or_else(|| options.not_valid.clone())
                            .unwrap_or_else(|| "must be a valid number".to_string()),
                    ));
                }
                text.parse::<f64>().ok()
            }
            Some(Value::String(text)) if !options.no_strings && !text.trim().is_empty() => {
                parse_numeric_str(text)
            }
            _ => None,
        };
        let Some(number) = number else {
            return Ok(Outcome::invalid(not_valid()));
        };

        if options.only_integer && number.fract() != 0.0 {
            return Ok(Outcome::invalid(
                options
                    .message
                    .clone()
                    .or_else(|| options.not_integer.clone())
                    .unwrap_or_else(|| "must be an integer".to_string()),
            ));
        }

        let checks: [(Option<f64>, &str, fn(f64, f64) -> bool); 6] = [
            (options.greater_than, "greater than", |v, c| v > c),
            (
                options.greater_than_or_equal_to,
                "greater than or equal to",
                |v, c| v >= c,
            ),
            (options.equal_to, "equal to", |v, c| v == c),
            (options.less_than, "less than", |v, c| v < c),
            (
                options.less_than_or_equal_to,
                "less than or equal to",
                |v, c| v <= c,
            ),
            (options.divisible_by, "divisible by", |v, c| v % c == 0.0),
        ];

        let mut errors: Vec<String> = checks
            .iter()
            .filter_map(|(bound, kind, passes)| {
                let count = (*bound)?;
                (!passes(number, count)).then(|| {
                    let count = display_number(count);
                    interpolate(
                        "must be %{type} %{count}",
                        &[("type", *kind), ("count", count.as_str())],
                    )
                })
            })
            .collect();

        if options.odd && number % 2.0 != 1.0 && number % 2.0 != -1.0 {
            errors.push("must be odd".to_string());
        }
        if options.even && number % 2.0 != 0.0 {
            errors.push("must be even".to_string());
        }

        if errors.is_empty() {
            return Ok(Outcome::Valid);
        }
        Ok(match options.message {
            Some(message) => Outcome::invalid(message),
            None => Outcome::Invalid(errors),
        })
    }

    fn check_options(&self, options: &Value, attribute: &str) -> Result<()> {
        decode_options::<NumericalityOptions>("numericality", attribute, options).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn check(value: Value, options: Value) -> Vec<String> {
        NumericalityValidator
            .validate(Some(&value), &options, "count", &Record::new())
            .unwrap()
            .into_messages()
    }

    #[test]
    fn numbers_and_numeric_strings_pass() {
        assert!(check(json!(3), json!(true)).is_empty());
        assert!(check(json!("3.5"), json!(true)).is_empty());
    }

    #[test]
    fn non_numbers_fail() {
        assert_eq!(check(json!("abc"), json!(true)), vec!["is not a number"]);
        assert_eq!(check(json!(""), json!(true)), vec!["is not a number"]);
        assert_eq!(
            check(json!("3"), json!({"noStrings": true})),
            vec!["is not a number"]
        );
    }

    #[test]
    fn strict_requires_canonical_notation() {
        assert_eq!(
            check(json!("03"), json!({"strict": true})),
            vec!["must be a valid number"]
        );
        assert!(check(json!("-3.25"), json!({"strict": true})).is_empty());
        assert_eq!(
            check(json!("3.5"), json!({"strict": true, "onlyInteger": true})),
            vec!["must be a valid number"]
        );
    }

    #[test]
    fn only_integer() {
        assert_eq!(
            check(json!(2.5), json!({"onlyInteger": true})),
            vec!["must be an integer"]
        );
    }

    #[test]
    fn comparison_messages_accumulate() {
        assert_eq!(
            check(json!(5), json!({"greaterThan": 10, "divisibleBy": 2, "even": true})),
            vec![
                "must be greater than 10".to_string(),
                "must be divisible by 2".to_string(),
                "must be even".to_string(),
            ]
        );
        assert_eq!(
            check(json!(4), json!({"lessThanOrEqualTo": 3.5, "odd": true})),
            vec![
                "must be less than or equal to 3.5".to_string(),
                "must be odd".to_string(),
            ]
        );
    }
}
