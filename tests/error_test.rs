//! Tests for failure reporting and fatal errors.

use formguard::{
    Engine, EngineError, Field, FieldError, FieldErrors, FieldPath, Fields, Map, RuleError, Value,
};
use serde_json::json;
use std::error::Error;
use stillwater::prelude::*;

fn error(path: &str, field: &str, rule: &str) -> FieldError {
    FieldError::new(path.parse().unwrap(), field, rule)
}

#[test]
fn test_field_errors_combine_in_order() {
    let a = FieldErrors::single(error("name", "name", "required"));
    let b = FieldErrors::single(error("age", "age", "min"));
    let combined = a.combine(b);

    let rules: Vec<_> = combined.iter().map(|e| e.rule.as_str()).collect();
    assert_eq!(rules, vec!["required", "min"]);
    assert_eq!(combined.first().path, FieldPath::from_field("name"));
}

#[test]
fn test_from_vec() {
    assert!(FieldErrors::from_vec(Vec::new()).is_none());
    let errors = FieldErrors::from_vec(vec![
        error("tags[0]", "tags.*", "string"),
        error("tags[1]", "tags.*", "string"),
        error("tags[1]", "tags.*", "max"),
    ])
    .unwrap();
    assert_eq!(errors.len(), 3);
    assert_eq!(errors.at_path(&"tags[1]".parse().unwrap()).len(), 2);
    assert_eq!(errors.by_field()["tags[1]"], vec!["string", "max"]);
}

#[test]
fn test_display() {
    let err = error("items[0].qty", "items.*.qty", "min")
        .with_message_key("min.numeric")
        .with_placeholder(":min", "1");
    assert_eq!(err.to_string(), "items[0].qty: min.numeric :min=1");

    let errors = FieldErrors::single(err);
    let rendered = errors.to_string();
    assert!(rendered.starts_with("Validation failed with 1 error(s):"));
    assert!(rendered.contains("1. items[0].qty: min.numeric"));
}

#[test]
fn test_engine_error_sources() {
    let engine = Engine::new();
    let fields = Fields::new().field(Field::new("n").unwrap().with_rules("between:1"));
    let mut data: Map = Value::from(json!({"n": 3})).into_object().unwrap();

    let err = engine.validate(&mut data, &fields).unwrap_err();
    assert_eq!(err.to_string(), "field 'n', rule 'between'");
    let source = err.source().unwrap();
    assert_eq!(
        source.to_string(),
        "rule 'between' expects at least 2 parameter(s), got 1"
    );
}

#[test]
fn test_invalid_pattern_reports_source() {
    let engine = Engine::new();
    let fields = Fields::new().field(Field::new("s").unwrap().with_rules("regex:[a-"));
    let mut data: Map = Value::from(json!({"s": "abc"})).into_object().unwrap();

    match engine.validate(&mut data, &fields) {
        Err(EngineError::Rule {
            source: RuleError::InvalidPattern { pattern, .. },
            ..
        }) => assert_eq!(pattern, "[a-"),
        other => panic!("expected InvalidPattern, got {:?}", other.map(|v| v.is_success())),
    }
}

#[test]
fn test_validation_failures_are_not_errors() {
    let engine = Engine::new();
    let fields = Fields::new().field(Field::new("email").unwrap().with_rules("required"));
    let mut data = Map::new();
    let result = engine.validate(&mut data, &fields);
    assert!(result.is_ok());
    assert!(result.unwrap().is_failure());
}
