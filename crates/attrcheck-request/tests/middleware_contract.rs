use std::sync::Arc;

use attrcheck_core::{ConstraintError, Record, RegistryBuilder, ValidatorRegistry};
use attrcheck_request::{
    error_formatter, Middleware, RequestError, RequestParts, Response, BAD_REQUEST,
};
use serde_json::{json, Value};

#[derive(Default)]
struct SpyResponse {
    status_calls: Vec<u16>,
    json_calls: Vec<Value>,
}

impl Response for SpyResponse {
    fn status(&mut self, code: u16) -> &mut Self {
        self.status_calls.push(code);
        self
    }

    fn json(&mut self, payload: Value) {
        self.json_calls.push(payload);
    }
}

fn record(value: Value) -> Record {
    value.as_object().cloned().unwrap_or_default()
}

fn middleware() -> Middleware {
    Middleware::new(Arc::new(ValidatorRegistry::with_builtins()))
}

#[test]
fn missing_schema_requires_an_object() {
    let err = middleware()
        .build_handler_from_value(&Value::Null)
        .unwrap_err();
    assert!(matches!(err, RequestError::NotAnObject));
    assert!(err.to_string().contains("must be an object"));
}

#[test]
fn array_and_number_schemas_require_an_object() {
    for schema in [json!([]), json!(42)] {
        let err = middleware().build_handler_from_value(&schema).unwrap_err();
        assert!(err.to_string().contains("must be an object"));
    }
}

#[test]
fn empty_schema_is_rejected() {
    let err = middleware().build_handler_from_value(&json!({})).unwrap_err();
    assert!(err.to_string().contains("empty/undefined"));
}

#[test]
fn unsupported_keys_are_rejected() {
    let err = middleware()
        .build_handler_from_value(&json!({"foo": {"bar": {"presence": true}}}))
        .unwrap_err();
    assert!(err.to_string().contains("unsupported keys"));
}

#[test]
fn unusable_constraint_options_fail_at_build_time() {
    for schema in [
        json!({"body": {"name": {"format": "("}}}),
        json!({"body": {"when": {"datetime": {"earliest": "someday"}}}}),
        json!({"query": {"size": {"inclusion": true}}}),
        json!({"path": {"lat": {"latitude": "garbage"}}}),
    ] {
        let err = middleware().build_handler_from_value(&schema).unwrap_err();
        assert!(
            matches!(
                err,
                RequestError::Constraint(ConstraintError::InvalidOptions { .. })
            ),
            "{schema} should be rejected, got {err}"
        );
    }
}

#[test]
fn built_handlers_always_run_one_continuation() {
    let handler = middleware()
        .build_handler_from_value(&json!({
            "body": {
                "name": {"format": "[a-z]+"},
                "when": {"datetime": {"earliest": "2020-01-01"}}
            }
        }))
        .unwrap();

    for body in [json!({}), json!({"when": "2019-06-01"}), json!({"name": "ok", "when": "2021-01-01"})] {
        let request = RequestParts::new().with_body(record(body));
        let mut response = SpyResponse::default();
        let mut next_calls = 0;

        handler
            .handle(&request, &mut response, || next_calls += 1)
            .unwrap();
        assert_eq!(next_calls + response.json_calls.len(), 1);
    }
}

#[test]
fn valid_request_calls_next_once() {
    let handler = middleware()
        .build_handler_from_value(&json!({"path": {"foo": {"presence": true}}}))
        .unwrap();
    let request = RequestParts::new().with_params(record(json!({"foo": "bar"})));
    let mut response = SpyResponse::default();
    let mut next_calls = 0;

    handler
        .handle(&request, &mut response, || next_calls += 1)
        .unwrap();

    assert_eq!(next_calls, 1);
    assert!(response.status_calls.is_empty());
    assert!(response.json_calls.is_empty());
}

#[test]
fn invalid_request_sends_400_once() {
    let handler = middleware()
        .build_handler_from_value(&json!({"path": {"foo": {"presence": true}}}))
        .unwrap();
    let request = RequestParts::new().with_params(record(json!({"bar": "foo"})));
    let mut response = SpyResponse::default();
    let mut next_calls = 0;

    handler
        .handle(&request, &mut response, || next_calls += 1)
        .unwrap();

    assert_eq!(next_calls, 0);
    assert_eq!(response.status_calls, vec![BAD_REQUEST]);
    assert_eq!(
        response.json_calls,
        vec![json!({"foo": ["Foo can't be blank"]})]
    );
}

#[test]
fn custom_error_formatter_is_used() {
    let mut middleware = middleware();
    middleware.register_error_formatter(Some(error_formatter(|_| json!("custom error format"))));
    let handler = middleware
        .build_handler_from_value(&json!({"path": {"foo": {"presence": true}}}))
        .unwrap();
    let request = RequestParts::new().with_params(record(json!({"bar": "foo"})));
    let mut response = SpyResponse::default();
    let mut next_calls = 0;

    handler
        .handle(&request, &mut response, || next_calls += 1)
        .unwrap();

    assert_eq!(next_calls, 0);
    assert_eq!(response.status_calls, vec![BAD_REQUEST]);
    assert_eq!(response.json_calls, vec![json!("custom error format")]);
}

#[test]
fn formatter_registered_after_build_does_not_reach_existing_handlers() {
    let mut middleware = middleware();
    let early = middleware
        .build_handler_from_value(&json!({"path": {"foo": {"presence": true}}}))
        .unwrap();
    middleware.register_error_formatter(Some(error_formatter(|_| json!("late format"))));
    let late = middleware
        .build_handler_from_value(&json!({"path": {"foo": {"presence": true}}}))
        .unwrap();

    let request = RequestParts::new();
    let mut early_response = SpyResponse::default();
    let mut late_response = SpyResponse::default();
    early.handle(&request, &mut early_response, || {}).unwrap();
    late.handle(&request, &mut late_response, || {}).unwrap();

    assert_eq!(
        early_response.json_calls,
        vec![json!({"foo": ["Foo can't be blank"]})]
    );
    assert_eq!(late_response.json_calls, vec![json!("late format")]);
}

#[test]
fn formatter_is_not_consulted_for_valid_requests() {
    let mut middleware = middleware();
    middleware.register_error_formatter(Some(error_formatter(|_| {
        panic!("formatter must not run for valid requests")
    })));
    let handler = middleware
        .build_handler_from_value(&json!({"query": {"q": {"length": {"minimum": 1}}}}))
        .unwrap();
    let request = RequestParts::new().with_query(record(json!({"q": "rust"})));
    let mut response = SpyResponse::default();
    let mut next_calls = 0;

    handler
        .handle(&request, &mut response, || next_calls += 1)
        .unwrap();
    assert_eq!(next_calls, 1);
}

#[test]
fn custom_validators_flow_through_the_handler() {
    let mut builder = RegistryBuilder::new();
    builder.register_fn("even_id", |value: Option<&Value>, _: &Value, _: &str, _: &Record| {
        match value.and_then(Value::as_u64) {
            Some(id) if id % 2 == 0 => None,
            _ => Some("^id must be even"),
        }
    });
    let middleware = Middleware::new(Arc::new(builder.build()));
    let handler = middleware
        .build_handler_from_value(&json!({"body": {"id": {"even_id": true}}}))
        .unwrap();

    let request = RequestParts::new().with_body(record(json!({"id": 3})));
    let mut response = SpyResponse::default();
    handler.handle(&request, &mut response, || {}).unwrap();
    assert_eq!(response.json_calls, vec![json!({"id": ["id must be even"]})]);
}

#[test]
fn handlers_hold_no_state_between_calls() {
    let handler = middleware()
        .build_handler_from_value(&json!({"body": {"email": {"presence": true, "email": true}}}))
        .unwrap();
    let bad = RequestParts::new().with_body(record(json!({"email": "nope"})));
    let good = RequestParts::new().with_body(record(json!({"email": "a@b.io"})));

    let first = handler.evaluate(&bad).unwrap();
    let _ = handler.evaluate(&good).unwrap();
    let again = handler.evaluate(&bad).unwrap();
    assert_eq!(first, again);
}
