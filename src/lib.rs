//! # Formguard
//!
//! A rule-based validation engine for untyped request data that collects
//! every failure instead of stopping at the first one.
//!
//! ## Overview
//!
//! Request bodies arrive as loosely typed trees: numbers that are really
//! strings, booleans spelled `"on"`, uploaded files next to plain values.
//! Formguard validates such a tree against declared [`Fields`], each carrying
//! an ordered list of [`Rule`]s such as `required|numeric|min:18`. Rules may
//! coerce the values they check, and the coerced values are written back into
//! the tree.
//!
//! Failures are reported as data: a [`FieldErrors`] collection inside a
//! `stillwater::Validation`, with one [`FieldError`] per failed rule carrying a
//! message key and placeholders for the localization layer. Schema authoring
//! bugs (unknown rules, unparsable parameters) are a separate class,
//! [`EngineError`], returned through the outer `Result`.
//!
//! ## Core Types
//!
//! - [`Engine`]: runs a schema against data trees
//! - [`Field`] / [`Fields`] / [`Rule`]: the declared schema
//! - [`Value`]: a node of the data tree, classified by [`FieldType`]
//! - [`FieldPath`]: a dotted path such as `items.*.id`
//! - [`Validator`] / [`ValidatorRegistry`]: the rule contract and its catalog
//!
//! ## Example
//!
//! ```rust
//! use formguard::{Engine, Field, Fields, Value};
//! use serde_json::json;
//!
//! let engine = Engine::new();
//! let fields = Fields::new()
//!     .field(Field::new("email").unwrap().with_rules("required|string|max:255"))
//!     .field(Field::new("items").unwrap().with_rules("required|array|min:1")
//!         .elements([Field::new("id").unwrap().with_rules("required|integer")]));
//!
//! let mut tree = Value::from(json!({
//!     "email": "a@example.com",
//!     "items": [{"id": "1"}, {"id": 2}, {"name": "no id"}]
//! }))
//! .into_object()
//! .unwrap();
//!
//! let errors = engine.validate(&mut tree, &fields).unwrap().into_result().unwrap_err();
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors.first().path.to_string(), "items[2].id");
//! assert_eq!(errors.first().rule, "required");
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod field_type;
pub mod locator;
pub mod numeric;
pub mod path;
pub mod registry;
pub mod schema;
pub mod validation;
pub mod validator;
pub mod value;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{EngineError, FieldError, FieldErrors, RuleError};
pub use field_type::FieldType;
pub use path::{FieldPath, PathError, PathSegment};
pub use registry::{RegistryError, ValidatorRegistry};
pub use schema::{Field, Fields, Rule};
pub use validation::Context;
pub use validator::{Placeholders, Validator};
pub use value::{File, Map, Number, Value};

/// Type alias for validation results using FieldErrors
pub type ValidationResult<T> = stillwater::Validation<T, FieldErrors>;
