use serde_json::Value;
use tracing::trace;

use crate::config::ValidateOptions;
use crate::error::{ConstraintError, Result};
use crate::messages::full_message;
use crate::outcome::Outcome;
use crate::registry::ValidatorRegistry;
use crate::result::ValidationErrors;
use crate::schema::{lookup, ConstraintSet, Record, Schema};

/// Apply one named constraint to one attribute value.
///
/// Unknown validator names fail the whole run. Disabled constraints
/// (`false` or `null` options) and absent values for validators that do not
/// handle absence produce no errors.
pub fn evaluate_constraint(
    registry: &ValidatorRegistry,
    validator_name: &str,
    options: &Value,
    attribute: &str,
    value: Option<&Value>,
    record: &Record,
) -> Result<Outcome> {
    let validator =
        registry
            .resolve(validator_name)
            .ok_or_else(|| ConstraintError::UnknownValidator {
                name: validator_name.to_string(),
                attribute: attribute.to_string(),
            })?;

    if matches!(options, Value::Null | Value::Bool(false)) {
        return Ok(Outcome::Valid);
    }
    if value.is_none() && !validator.validates_absent() {
        return Ok(Outcome::Valid);
    }

    let outcome = validator.validate(value, options, attribute, record)?;
    trace!(
        attribute,
        validator = validator_name,
        valid = outcome.is_valid(),
        "constraint evaluated"
    );
    Ok(outcome)
}

/// Apply every constraint declared for one attribute.
///
/// Messages are concatenated in constraint declaration order; a failing
/// constraint does not stop the ones after it.
pub fn validate_attribute(
    registry: &ValidatorRegistry,
    attribute: &str,
    value: Option<&Value>,
    constraints: &ConstraintSet,
    record: &Record,
) -> Result<Vec<String>> {
    let mut messages = Vec::new();
    for (validator_name, options) in constraints.iter() {
        let outcome =
            evaluate_constraint(registry, validator_name, options, attribute, value, record)?;
        messages.extend(outcome.into_messages());
    }
    Ok(messages)
}

/// Apply a schema to a whole record.
///
/// Driven by the schema, so attributes missing from the record are still
/// evaluated. The returned map is empty when the record is valid.
pub fn validate_record(
    registry: &ValidatorRegistry,
    record: &Record,
    schema: &Schema,
    options: &ValidateOptions,
) -> Result<ValidationErrors> {
    let mut errors = ValidationErrors::new();
    for (attribute, constraints) in schema.iter() {
        let value = lookup(record, attribute);
        let messages = validate_attribute(registry, attribute, value, constraints, record)?;
        errors.add(
            attribute,
            messages
                .iter()
                .map(|message| full_message(attribute, message, options))
                .collect(),
        );
    }
    Ok(errors)
}
