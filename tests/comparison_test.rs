//! Tests for the cross-field comparison rules.

use formguard::validator::{Comparison, Different, Same};
use formguard::{
    Context, EngineConfig, Field, FieldPath, File, Map, Rule, RuleError, Validator, Value,
};
use serde_json::json;

fn run(validator: &dyn Validator, rule: &str, value: Value, data: &Map) -> Result<bool, RuleError> {
    let field = Field::new("field").unwrap();
    let rule = Rule::parse(rule);
    let path = FieldPath::from_field("field");
    let config = EngineConfig::default();
    let mut ctx = Context::new(value, data, &field, &rule, &path, &config);
    validator.validate(&mut ctx)
}

fn data(json: serde_json::Value) -> Map {
    Value::from(json).into_object().unwrap()
}

fn all_comparisons() -> Vec<(&'static str, Comparison)> {
    vec![
        ("greater_than", Comparison::greater_than()),
        ("greater_than_equal", Comparison::greater_than_equal()),
        ("lower_than", Comparison::lower_than()),
        ("lower_than_equal", Comparison::lower_than_equal()),
    ]
}

#[test]
fn test_string_against_number_always_fails() {
    let tree = data(json!({"n": 5}));
    for (name, validator) in all_comparisons() {
        for value in ["", "a", "abcdefghij"] {
            let rule = format!("{}:n", name);
            assert!(!run(&validator, &rule, Value::from(value), &tree).unwrap(), "{}", rule);
        }
    }
}

#[test]
fn test_absent_other_field_fails() {
    let tree = data(json!({}));
    for (name, validator) in all_comparisons() {
        let rule = format!("{}:missing", name);
        assert!(!run(&validator, &rule, Value::from(1), &tree).unwrap());
    }
}

#[test]
fn test_numeric_ordering() {
    let tree = data(json!({"ten": 10}));
    let expectations = [
        ("greater_than", [false, false, true]),
        ("greater_than_equal", [false, true, true]),
        ("lower_than", [true, false, false]),
        ("lower_than_equal", [true, true, false]),
    ];
    for ((name, validator), (expected_name, outcomes)) in
        all_comparisons().into_iter().zip(expectations)
    {
        assert_eq!(name, expected_name);
        for (value, expected) in [9.5, 10.0, 10.5].into_iter().zip(outcomes) {
            let rule = format!("{}:ten", name);
            assert_eq!(run(&validator, &rule, Value::from(value), &tree).unwrap(), expected);
        }
    }
}

#[test]
fn test_nested_other_path() {
    let tree = data(json!({"range": {"start": 3}}));
    let rule = "greater_than:range.start";
    assert!(run(&Comparison::greater_than(), rule, Value::from(4), &tree).unwrap());
}

#[test]
fn test_files_compare_all_pairs() {
    let mut tree = Map::new();
    tree.insert(
        "thumbnail".to_string(),
        Value::Files(vec![File::new("t1.png", 500), File::new("t2.png", 900)]),
    );
    let rule = "greater_than:thumbnail";
    let bigger = Value::Files(vec![File::new("a.png", 1000), File::new("b.png", 901)]);
    let overlapping = Value::Files(vec![File::new("a.png", 1000), File::new("b.png", 800)]);

    assert!(run(&Comparison::greater_than(), rule, bigger, &tree).unwrap());
    assert!(!run(&Comparison::greater_than(), rule, overlapping, &tree).unwrap());
}

#[test]
fn test_same_and_different_are_complements() {
    let tree = data(json!({
        "password": "hunter2",
        "count": 4,
        "flags": [true, false],
        "profile": {"name": "a", "tags": ["x"]}
    }));
    let values = [
        ("password", json!("hunter2")),
        ("password", json!("hunter3")),
        ("count", json!(4.0)),
        ("count", json!(5)),
        ("flags", json!([true, false])),
        ("flags", json!([false, true])),
        ("profile", json!({"name": "a", "tags": ["x"]})),
        ("profile", json!({"name": "a", "tags": []})),
    ];
    for (other, value) in values {
        let same = run(&Same, &format!("same:{}", other), Value::from(value.clone()), &tree).unwrap();
        let different =
            run(&Different, &format!("different:{}", other), Value::from(value), &tree).unwrap();
        assert_ne!(same, different, "same/different on {}", other);
    }
}

#[test]
fn test_same_ignores_number_representation_in_collections() {
    let tree = data(json!({"ids": [1.0, 2.0], "limits": {"low": 1.0, "high": 10}}));
    assert!(run(&Same, "same:ids", Value::from(json!([1, 2])), &tree).unwrap());
    assert!(run(&Same, "same:limits", Value::from(json!({"high": 10.0, "low": 1})), &tree).unwrap());
    assert!(!run(&Different, "different:ids", Value::from(json!([1, 2])), &tree).unwrap());
}

#[test]
fn test_absent_field_for_same_and_different() {
    let tree = data(json!({"email": "a@b.c"}));
    assert!(!run(&Same, "same:confirmation", Value::from("x"), &tree).unwrap());
    assert!(run(&Different, "different:confirmation", Value::from("x"), &tree).unwrap());
}

#[test]
fn test_same_across_types_fails() {
    let tree = data(json!({"n": 1}));
    assert!(!run(&Same, "same:n", Value::from("1"), &tree).unwrap());
    assert!(run(&Different, "different:n", Value::from("1"), &tree).unwrap());
}

#[test]
fn test_wildcard_in_other_path_is_fatal() {
    let tree = data(json!({"items": [1, 2]}));
    let err = run(&Same, "same:items.*", Value::from(1), &tree).unwrap_err();
    assert!(matches!(err, RuleError::InvalidPath { .. }));
}
