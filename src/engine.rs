//! The validation engine.
//!
//! [`Engine::validate`] runs a [`Fields`] schema against one data tree:
//!
//! 1. Every rule name is resolved against the [`ValidatorRegistry`] before any
//!    value is inspected. An unknown name aborts the pass.
//! 2. Fields run in declaration order. Each field's path is expanded into its
//!    concrete occurrences, and each occurrence runs the field's rules in
//!    declaration order. Every failure is collected.
//! 3. Coerced values are written back into the tree once the pass is over.

use rayon::prelude::*;
use std::sync::Arc;
use stillwater::Validation;

use crate::config::EngineConfig;
use crate::error::{EngineError, FieldError, FieldErrors};
use crate::field_type::FieldType;
use crate::locator::{self, Located};
use crate::path::FieldPath;
use crate::registry::{RegistryError, ValidatorRegistry};
use crate::schema::{Field, Fields, Rule, REQUIRED};
use crate::validation::Context;
use crate::validator::{Placeholders, Validator};
use crate::value::{Map, Value};
use crate::ValidationResult;

/// A field with its rules resolved to validators.
struct Plan<'f> {
    declared: &'f str,
    field: &'f Field,
    rules: Vec<(&'f Rule, Arc<dyn Validator>)>,
}

/// Runs rule-based validation over data trees.
///
/// The engine is cheap to clone and safe to share between threads: the
/// registry is shared storage and validators keep no per-call state.
///
/// # Example
///
/// ```rust
/// use formguard::{Engine, Field, Fields, Value};
/// use serde_json::json;
///
/// let engine = Engine::new();
/// let fields = Fields::new()
///     .field(Field::new("name").unwrap().with_rules("required|string|min:2"))
///     .field(Field::new("newsletter").unwrap().with_rules("bool"))
///     .field(Field::new("age").unwrap().with_rules("required|numeric|min:18"));
///
/// let mut tree = Value::from(json!({
///     "name": "A",
///     "newsletter": "yes",
///     "age": "17"
/// }))
/// .into_object()
/// .unwrap();
///
/// let result = engine.validate(&mut tree, &fields).unwrap();
/// let errors = result.into_result().unwrap_err();
///
/// assert_eq!(errors.by_field()["name"], vec!["min"]);
/// assert_eq!(errors.by_field()["age"], vec!["min"]);
///
/// // Coercions are applied even though the pass failed.
/// assert_eq!(tree["newsletter"], Value::Bool(true));
/// assert_eq!(tree["age"], Value::from(17));
/// ```
#[derive(Clone, Default)]
pub struct Engine {
    registry: ValidatorRegistry,
    config: EngineConfig,
}

impl Engine {
    /// Creates an engine with every built-in validator and the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the registry, e.g. with one shared by several engines.
    pub fn with_registry(mut self, registry: ValidatorRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Registers a custom validator.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is taken.
    pub fn register_validator<V>(&self, validator: V) -> Result<(), RegistryError>
    where
        V: Validator + 'static,
    {
        self.registry.register(validator)
    }

    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validates `tree` against `fields`, coercing values in place.
    ///
    /// Returns `Ok(Validation::Success(()))` when every rule passed and
    /// `Ok(Validation::Failure(errors))` with every failed rule otherwise.
    /// Coerced values are written back in both cases.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] when the schema itself is broken: an unknown
    /// rule name, or a rule whose parameters its validator cannot interpret.
    /// The tree is left untouched in that case.
    pub fn validate(
        &self,
        tree: &mut Map,
        fields: &Fields,
    ) -> Result<ValidationResult<()>, EngineError> {
        let plans = self.resolve(fields)?;
        let mut errors = Vec::new();
        let mut writes = Vec::new();

        for plan in &plans {
            for located in locator::locate_all(plan.field.path(), tree) {
                if let Some(write) = self.run_occurrence(plan, located, tree, &mut errors)? {
                    writes.push(write);
                }
            }
        }

        for (path, value) in writes {
            if !locator::replace(tree, &path, value) {
                tracing::warn!(path = %path, "could not write back coerced value");
            }
        }

        tracing::debug!(
            fields = fields.len(),
            failures = errors.len(),
            "validation pass complete"
        );

        Ok(match FieldErrors::from_vec(errors) {
            Some(errors) => Validation::Failure(errors),
            None => Validation::Success(()),
        })
    }

    /// Validates independent trees in parallel with the same schema.
    ///
    /// Results come back in the order of `trees`.
    pub fn validate_many(
        &self,
        trees: &mut [Map],
        fields: &Fields,
    ) -> Vec<Result<ValidationResult<()>, EngineError>> {
        trees
            .par_iter_mut()
            .map(|tree| self.validate(tree, fields))
            .collect()
    }

    fn resolve<'f>(&self, fields: &'f Fields) -> Result<Vec<Plan<'f>>, EngineError> {
        fields
            .iter()
            .map(|(declared, field)| {
                let rules = field
                    .rules()
                    .iter()
                    .map(|rule| {
                        self.registry
                            .get(rule.name())
                            .map(|validator| (rule, validator))
                            .ok_or_else(|| EngineError::UnknownRule {
                                field: declared.clone(),
                                rule: rule.name().to_string(),
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Plan {
                    declared,
                    field,
                    rules,
                })
            })
            .collect()
    }

    /// Runs a field's rules on one occurrence.
    ///
    /// Returns the coerced value to write back, if a rule changed it.
    fn run_occurrence(
        &self,
        plan: &Plan<'_>,
        located: Located<'_>,
        data: &Map,
        errors: &mut Vec<FieldError>,
    ) -> Result<Option<(FieldPath, Value)>, EngineError> {
        let original = located.value_or_null();
        let empty = original.is_null();
        if empty && !plan.field.is_required() {
            return Ok(None);
        }

        let path = located.path;
        let mut current = original.clone();
        for (rule, validator) in &plan.rules {
            if empty && rule.name() != REQUIRED {
                continue;
            }

            let mut ctx = Context::new(current, data, plan.field, rule, &path, &self.config);
            if !located.found {
                ctx = ctx.missing();
            }

            let passed = validator
                .validate(&mut ctx)
                .map_err(|source| rule_error(plan, rule, source))?;
            if !passed {
                let error = self.failure(plan, validator.as_ref(), &ctx)?;
                tracing::debug!(
                    field = %error.path,
                    rule = %error.rule,
                    key = %error.message_key,
                    "rule failed"
                );
                errors.push(error);
            }
            current = ctx.value;
        }

        Ok((located.found && current != *original).then_some((path, current)))
    }

    fn failure(
        &self,
        plan: &Plan<'_>,
        validator: &dyn Validator,
        ctx: &Context<'_>,
    ) -> Result<FieldError, EngineError> {
        let rule = ctx.rule();
        let message_key = if validator.is_type_dependent() {
            format!("{}.{}", rule.name(), FieldType::of(&ctx.value))
        } else {
            rule.name().to_string()
        };

        let mut placeholders = Placeholders::new();
        placeholders.insert(":field".to_string(), ctx.path().to_string());
        placeholders.extend(
            validator
                .message_placeholders(ctx)
                .map_err(|source| rule_error(plan, rule, source))?,
        );

        Ok(FieldError::new(ctx.path().clone(), plan.declared, rule.name())
            .with_message_key(message_key)
            .with_placeholders(placeholders))
    }
}

fn rule_error(plan: &Plan<'_>, rule: &Rule, source: crate::error::RuleError) -> EngineError {
    EngineError::Rule {
        field: plan.declared.to_string(),
        rule: rule.name().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree(json: serde_json::Value) -> Map {
        Value::from(json).into_object().unwrap()
    }

    fn field(path: &str, rules: &str) -> Field {
        Field::new(path).unwrap().with_rules(rules)
    }

    #[test]
    fn test_success() {
        let engine = Engine::new();
        let fields = Fields::new().field(field("name", "required|string"));
        let mut data = tree(json!({"name": "Alice"}));
        assert!(engine.validate(&mut data, &fields).unwrap().is_success());
    }

    #[test]
    fn test_unknown_rule_is_fatal_and_leaves_tree_untouched() {
        let engine = Engine::new();
        let fields = Fields::new()
            .field(field("flag", "bool"))
            .field(field("name", "required|slug"));
        let mut data = tree(json!({"flag": "yes"}));

        let err = engine.validate(&mut data, &fields).unwrap_err();
        assert!(matches!(err, EngineError::UnknownRule { ref rule, .. } if rule == "slug"));
        assert_eq!(data["flag"], Value::from("yes"));
    }

    #[test]
    fn test_coercion_chains_across_rules() {
        let engine = Engine::new();
        let fields = Fields::new().field(field("age", "numeric|min:18"));
        let mut data = tree(json!({"age": "21"}));
        assert!(engine.validate(&mut data, &fields).unwrap().is_success());
        assert_eq!(data["age"], Value::from(21));
    }

    #[test]
    fn test_type_dependent_message_key() {
        let engine = Engine::new();
        let fields = Fields::new().field(field("name", "min:3"));
        let mut data = tree(json!({"name": "ab"}));

        let errors = engine
            .validate(&mut data, &fields)
            .unwrap()
            .into_result()
            .unwrap_err();
        let error = errors.first();
        assert_eq!(error.message_key, "min.string");
        assert_eq!(error.placeholders[":field"], "name");
        assert_eq!(error.placeholders[":min"], "3");
    }

    #[test]
    fn test_malformed_parameter_is_fatal() {
        let engine = Engine::new();
        let fields = Fields::new().field(field("n", "min:lots"));
        let mut data = tree(json!({"n": 1}));
        assert!(matches!(
            engine.validate(&mut data, &fields),
            Err(EngineError::Rule { .. })
        ));
    }
}
