use serde::Deserialize;
use serde_json::Value;

use crate::builtin::{coerce_number, decode_options};
use crate::error::Result;
use crate::messages::display_number;
use crate::outcome::Outcome;
use crate::registry::Validator;
use crate::schema::Record;

const NOT_NUMERIC: &str = "is not a number or numeric string";

#[derive(Debug, Default, Deserialize)]
struct CoordinateOptions {
    message: Option<String>,
}

/// Inclusive numeric range for geographic coordinates. Numeric strings are
/// accepted.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateValidator {
    name: &'static str,
    min: f64,
    max: f64,
}

impl CoordinateValidator {
    /// Latitude: [-90, 90].
    pub fn latitude() -> Self {
        Self::new("latitude", -90.0, 90.0)
    }

    /// Longitude: [-180, 180].
    pub fn longitude() -> Self {
        Self::new("longitude", -180.0, 180.0)
    }

    /// `name` is the registered name used in configuration errors.
    pub fn new(name: &'static str, min: f64, max: f64) -> Self {
        Self { name, min, max }
    }
}

impl Validator for CoordinateValidator {
    fn validate(
        &self,
        value: Option<&Value>,
        options: &Value,
        attribute: &str,
        _record: &Record,
    ) -> Result<Outcome> {
        let options: CoordinateOptions = decode_options(self.name, attribute, options)?;
        let Some(number) = value.and_then(coerce_number) else {
            return Ok(Outcome::invalid(
                options.message.unwrap_or_else(|| NOT_NUMERIC.to_string()),
            ));
        };

        if number < self.min || number > self.max {
            return Ok(Outcome::invalid(options.message.unwrap_or_else(|| {
                format!(
                    "must be between (inclusive) {} to {}",
                    display_number(self.min),
                    display_number(self.max)
                )
            })));
        }
        Ok(Outcome::Valid)
    }

    fn check_options(&self, options: &Value, attribute: &str) -> Result<()> {
        decode_options::<CoordinateOptions>(self.name, attribute, options).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn check(validator: CoordinateValidator, value: Value) -> Outcome {
        validator
            .validate(Some(&value), &json!(true), "lat", &Record::new())
            .unwrap()
    }

    #[test]
    fn latitude_bounds() {
        let latitude = CoordinateValidator::latitude();
        assert_eq!(
            check(latitude, json!(91)),
            Outcome::invalid("must be between (inclusive) -90 to 90")
        );
        assert!(check(latitude, json!(-90)).is_valid());
        assert!(check(latitude, json!(90)).is_valid());
    }

    #[test]
    fn latitude_accepts_numeric_strings() {
        let latitude = CoordinateValidator::latitude();
        assert!(check(latitude, json!("45.5")).is_valid());
        assert_eq!(
            check(latitude, json!("abc")),
            Outcome::invalid("is not a number or numeric string")
        );
        assert_eq!(
            check(latitude, json!({"deg": 1})),
            Outcome::invalid("is not a number or numeric string")
        );
    }

    #[test]
    fn longitude_bounds() {
        let longitude = CoordinateValidator::longitude();
        assert_eq!(
            check(longitude, json!(-180.5)),
            Outcome::invalid("must be between (inclusive) -180 to 180")
        );
        assert!(check(longitude, json!("179.99")).is_valid());
        assert!(check(longitude, json!(91)).is_valid());
    }

    #[test]
    fn message_override_replaces_both_failures() {
        let latitude = CoordinateValidator::latitude();
        let options = json!({"message": "^bad latitude"});
        for value in [json!(91), json!("north")] {
            let outcome = latitude
                .validate(Some(&value), &options, "lat", &Record::new())
                .unwrap();
            assert_eq!(outcome, Outcome::invalid("^bad latitude"));
        }
    }

    #[test]
    fn non_object_options_are_configuration_errors() {
        let latitude = CoordinateValidator::latitude();
        let result = latitude.validate(
            Some(&json!(91)),
            &json!("garbage options"),
            "lat",
            &Record::new(),
        );
        assert!(matches!(
            result,
            Err(crate::error::ConstraintError::InvalidOptions { validator, .. })
                if validator == "latitude"
        ));
        assert!(CoordinateValidator::longitude()
            .check_options(&json!(3), "lng")
            .is_err());
    }
}
