//! Tests for sharing an engine and its registry across threads.

use formguard::{Context, Engine, Field, Fields, RuleError, Validator, ValidatorRegistry, Value};
use serde_json::json;
use std::sync::Arc;
use std::thread;

fn signup_fields() -> Fields {
    Fields::new()
        .field(Field::new("name").unwrap().with_rules("required|string|between:2,20"))
        .field(Field::new("age").unwrap().with_rules("required|integer|min:18"))
        .field(Field::new("terms").unwrap().with_rules("required|bool"))
}

struct Noop;

impl Validator for Noop {
    fn validate(&self, _ctx: &mut Context<'_>) -> Result<bool, RuleError> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "noop"
    }
}

#[test]
fn test_concurrent_validation() {
    let engine = Arc::new(Engine::new());
    let fields = Arc::new(signup_fields());

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let engine = Arc::clone(&engine);
            let fields = Arc::clone(&fields);
            thread::spawn(move || {
                let mut data = Value::from(json!({
                    "name": format!("User{}", i),
                    "age": (15 + i).to_string(),
                    "terms": "yes"
                }))
                .into_object()
                .unwrap();

                let result = engine.validate(&mut data, &fields).unwrap();
                assert_eq!(result.is_success(), 15 + i >= 18);
                assert_eq!(data["terms"], Value::Bool(true));
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_registration_while_validating() {
    let registry = ValidatorRegistry::with_builtins();
    let engine = Arc::new(Engine::new().with_registry(registry.clone()));
    let fields = Arc::new(signup_fields());

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let fields = Arc::clone(&fields);
            thread::spawn(move || {
                for _ in 0..50 {
                    let mut data = Value::from(json!({"name": "Al", "age": 30, "terms": true}))
                        .into_object()
                        .unwrap();
                    assert!(engine.validate(&mut data, &fields).unwrap().is_success());
                }
            })
        })
        .collect();

    registry.register(Noop).unwrap();
    assert!(engine.registry().contains("noop"));

    for handle in readers {
        handle.join().unwrap();
    }
}

#[test]
fn test_engine_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Engine>();
    assert_send_sync::<ValidatorRegistry>();
    assert_send_sync::<Fields>();
}
