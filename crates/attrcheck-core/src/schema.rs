use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ConstraintError, Result};

/// Already-parsed key/value input validated against a [`Schema`].
pub type Record = Map<String, Value>;

/// Validator name to options, in declaration order.
///
/// Options are `true` for defaults, an object for validator-specific
/// configuration, or `false`/`null` to disable the constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstraintSet {
    constraints: Map<String, Value>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a constraint, keeping the original position on replace.
    pub fn with(mut self, validator: impl Into<String>, options: impl Into<Value>) -> Self {
        self.constraints.insert(validator.into(), options.into());
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.constraints.iter().map(|(name, options)| (name.as_str(), options))
    }

    pub fn get(&self, validator: &str) -> Option<&Value> {
        self.constraints.get(validator)
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}

/// Attribute name to [`ConstraintSet`].
///
/// Attributes listed here are evaluated whether or not the record carries
/// them; record keys without an entry are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct Schema {
    attributes: Vec<(String, ConstraintSet)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the constraints for one attribute.
    pub fn attribute(mut self, name: impl Into<String>, constraints: ConstraintSet) -> Self {
        let name = name.into();
        match self.attributes.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = constraints,
            None => self.attributes.push((name, constraints)),
        }
        self
    }

    /// Build a schema from an untyped JSON document.
    pub fn from_value(value: &Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(ConstraintError::InvalidSchema(
                "schema must be an object".to_string(),
            ));
        };

        let mut schema = Self::new();
        for (name, constraints) in map {
            let Value::Object(constraints) = constraints else {
                return Err(ConstraintError::InvalidSchema(format!(
                    "constraints for attribute \"{name}\" must be an object"
                )));
            };
            schema.attributes.push((
                name.clone(),
                ConstraintSet {
                    constraints: constraints.clone(),
                },
            ));
        }
        Ok(schema)
    }

    /// Parse a schema from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConstraintSet)> {
        self.attributes
            .iter()
            .map(|(name, constraints)| (name.as_str(), constraints))
    }

    pub fn get(&self, attribute: &str) -> Option<&ConstraintSet> {
        self.attributes
            .iter()
            .find(|(name, _)| name == attribute)
            .map(|(_, constraints)| constraints)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl TryFrom<Value> for Schema {
    type Error = ConstraintError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(&value)
    }
}

impl From<Schema> for Value {
    fn from(schema: Schema) -> Self {
        let map = schema
            .attributes
            .into_iter()
            .map(|(name, constraints)| (name, Value::Object(constraints.constraints)))
            .collect::<Map<String, Value>>();
        Value::Object(map)
    }
}

/// Look up an attribute, following `.`-separated paths into nested objects.
///
/// `null` is reported as absent.
pub fn lookup<'a>(record: &'a Record, attribute: &str) -> Option<&'a Value> {
    if let Some(value) = record.get(attribute) {
        return present(value);
    }

    let mut segments = attribute.split('.');
    let mut current = record.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    present(current)
}

fn present(value: &Value) -> Option<&Value> {
    (!value.is_null()).then_some(value)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn schema_keeps_declaration_order() {
        let schema = Schema::from_json(
            r#"{"zeta":{"presence":true},"alpha":{"length":{"maximum":3}}}"#,
        )
        .unwrap();
        let names: Vec<&str> = schema.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn constraint_order_is_declaration_order() {
        let constraints = ConstraintSet::new()
            .with("presence", true)
            .with("length", json!({"minimum": 2}))
            .with("format", "[a-z]+");
        let names: Vec<&str> = constraints.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["presence", "length", "format"]);
    }

    #[test]
    fn non_object_schema_is_rejected() {
        assert!(matches!(
            Schema::from_value(&json!([1, 2])),
            Err(ConstraintError::InvalidSchema(_))
        ));
        assert!(matches!(
            Schema::from_value(&json!({"foo": true})),
            Err(ConstraintError::InvalidSchema(_))
        ));
    }

    #[test]
    fn schema_deserializes_through_serde() {
        let schema: Schema =
            serde_json::from_value(json!({"foo": {"presence": true}})).unwrap();
        assert_eq!(schema.len(), 1);
        assert_eq!(
            schema.get("foo").and_then(|c| c.get("presence")),
            Some(&json!(true))
        );
    }

    #[test]
    fn replacing_an_attribute_keeps_one_entry() {
        let schema = Schema::new()
            .attribute("foo", ConstraintSet::new().with("presence", true))
            .attribute("foo", ConstraintSet::new().with("email", true));
        assert_eq!(schema.len(), 1);
        assert!(schema.get("foo").unwrap().get("email").is_some());
    }

    #[test]
    fn lookup_follows_nested_paths_and_hides_null() {
        let record = json!({"address": {"city": "Oslo"}, "gone": null})
            .as_object()
            .cloned()
            .unwrap();
        assert_eq!(lookup(&record, "address.city"), Some(&json!("Oslo")));
        assert_eq!(lookup(&record, "address.zip"), None);
        assert_eq!(lookup(&record, "gone"), None);
        assert_eq!(lookup(&record, "missing"), None);
    }
}
