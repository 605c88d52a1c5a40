use std::sync::Arc;

use attrcheck_core::ValidationErrors;
use serde_json::Value;

/// Turns the combined validation errors into the rejection payload.
///
/// The payload may take any JSON shape, including a bare string. A
/// formatter that panics propagates to the caller unchanged.
pub type ErrorFormatter = Arc<dyn Fn(&ValidationErrors) -> Value + Send + Sync>;

/// Wrap a closure as an [`ErrorFormatter`].
pub fn error_formatter<F>(format: F) -> ErrorFormatter
where
    F: Fn(&ValidationErrors) -> Value + Send + Sync + 'static,
{
    Arc::new(format)
}

/// Payload sent when no formatter is registered: the error map as-is.
pub fn default_payload(errors: &ValidationErrors) -> Value {
    errors.to_value()
}

pub(crate) fn render(formatter: Option<&ErrorFormatter>, errors: &ValidationErrors) -> Value {
    match formatter {
        Some(format) => format(errors),
        None => default_payload(errors),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn errors() -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.add("foo", vec!["Foo can't be blank".to_string()]);
        errors
    }

    #[test]
    fn default_payload_is_the_error_map() {
        assert_eq!(render(None, &errors()), json!({"foo": ["Foo can't be blank"]}));
    }

    #[test]
    fn formatter_may_return_any_shape() {
        let formatter = error_formatter(|_| json!("custom error format"));
        assert_eq!(render(Some(&formatter), &errors()), json!("custom error format"));

        let flatten = error_formatter(|errors| {
            Value::Array(
                errors
                    .iter()
                    .flat_map(|(_, messages)| messages.iter().cloned().map(Value::String))
                    .collect(),
            )
        });
        assert_eq!(render(Some(&flatten), &errors()), json!(["Foo can't be blank"]));
    }
}
