use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Attribute name to error messages for one validated record.
///
/// Attributes without errors never appear. An empty value is the same
/// success signal as no value at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append messages for an attribute. Empty message lists are dropped.
    pub fn add(&mut self, attribute: impl Into<String>, messages: Vec<String>) {
        if messages.is_empty() {
            return;
        }
        self.errors
            .entry(attribute.into())
            .or_default()
            .extend(messages);
    }

    /// Fold another result into this one.
    ///
    /// Messages for an attribute present in both are appended after the
    /// existing ones.
    pub fn merge(&mut self, other: ValidationErrors) {
        for (attribute, messages) in other.errors {
            self.add(attribute, messages);
        }
    }

    pub fn get(&self, attribute: &str) -> Option<&[String]> {
        self.errors.get(attribute).map(Vec::as_slice)
    }

    pub fn contains(&self, attribute: &str) -> bool {
        self.errors.contains_key(attribute)
    }

    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.errors
            .iter()
            .map(|(attribute, messages)| (attribute.as_str(), messages.as_slice()))
    }

    /// Number of attributes with at least one error.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// `None` when empty, so callers can use the result as-is.
    pub fn into_option(self) -> Option<Self> {
        (!self.is_empty()).then_some(self)
    }

    pub fn to_value(&self) -> Value {
        Value::Object(
            self.errors
                .iter()
                .map(|(attribute, messages)| {
                    (
                        attribute.clone(),
                        Value::Array(messages.iter().cloned().map(Value::String).collect()),
                    )
                })
                .collect(),
        )
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.errors
    }
}

impl IntoIterator for ValidationErrors {
    type Item = (String, Vec<String>);
    type IntoIter = std::collections::btree_map::IntoIter<String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_messages_do_not_create_entries() {
        let mut errors = ValidationErrors::new();
        errors.add("foo", Vec::new());
        assert!(errors.is_empty());
        assert!(errors.into_option().is_none());
    }

    #[test]
    fn merge_appends_on_collision() {
        let mut path = ValidationErrors::new();
        path.add("id", vec!["Id can't be blank".to_string()]);

        let mut body = ValidationErrors::new();
        body.add("id", vec!["Id is invalid".to_string()]);
        body.add("name", vec!["Name can't be blank".to_string()]);

        path.merge(body);
        assert_eq!(path.len(), 2);
        assert_eq!(
            path.get("id").unwrap(),
            ["Id can't be blank".to_string(), "Id is invalid".to_string()]
        );
    }

    #[test]
    fn serializes_as_plain_object() {
        let mut errors = ValidationErrors::new();
        errors.add("foo", vec!["Foo can't be blank".to_string()]);
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({"foo": ["Foo can't be blank"]})
        );
        assert_eq!(errors.to_value(), json!({"foo": ["Foo can't be blank"]}));
    }
}
