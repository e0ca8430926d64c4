//! Per-invocation validation context.
//!
//! This module provides the [`Context`] handed to every [`Validator`](crate::Validator)
//! call. One context exists per (field, rule, occurrence): a wildcard field
//! expanding to three array elements produces three contexts per rule.
//!
//! All per-call state lives here so that validators themselves stay stateless
//! and can be shared across threads.

use crate::config::EngineConfig;
use crate::error::RuleError;
use crate::path::FieldPath;
use crate::schema::{Field, Rule};
use crate::value::{Map, Value};

/// The record a validator inspects and may coerce.
///
/// `value` is the candidate value. Validators may replace it (e.g. `"yes"`
/// becomes `true`); the replacement is seen by the following rules of the same
/// field and written back into the data tree once the pass completes.
///
/// `data` is the tree as it was when the pass began, so cross-field lookups
/// never observe another field's in-progress coercion.
pub struct Context<'a> {
    /// The candidate value, read-write.
    pub value: Value,
    data: &'a Map,
    field: &'a Field,
    rule: &'a Rule,
    path: &'a FieldPath,
    config: &'a EngineConfig,
    exists: bool,
}

impl<'a> Context<'a> {
    /// Creates a context for one rule invocation on a value present in the tree.
    pub fn new(
        value: Value,
        data: &'a Map,
        field: &'a Field,
        rule: &'a Rule,
        path: &'a FieldPath,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            value,
            data,
            field,
            rule,
            path,
            config,
            exists: true,
        }
    }

    /// Marks the value as absent from the tree (as opposed to an explicit null).
    pub fn missing(mut self) -> Self {
        self.exists = false;
        self
    }

    /// Returns false when the field is absent from the data tree.
    pub fn exists(&self) -> bool {
        self.exists
    }

    /// Returns the whole data tree.
    pub fn data(&self) -> &'a Map {
        self.data
    }

    /// Returns the field being validated.
    pub fn field(&self) -> &'a Field {
        self.field
    }

    /// Returns the rule being applied.
    pub fn rule(&self) -> &'a Rule {
        self.rule
    }

    /// Returns the rule's raw parameters.
    pub fn params(&self) -> &'a [String] {
        self.rule.params()
    }

    /// Returns the concrete path of the value.
    pub fn path(&self) -> &'a FieldPath {
        self.path
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &'a EngineConfig {
        self.config
    }

    /// Returns the parameter at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::MissingParameter`] if the rule has fewer parameters.
    pub fn param(&self, index: usize) -> Result<&'a str, RuleError> {
        self.params()
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| RuleError::MissingParameter {
                rule: self.rule.name().to_string(),
                expected: index + 1,
                got: self.params().len(),
            })
    }

    /// Parses the parameter at `index` as a finite number.
    pub fn number_param(&self, index: usize) -> Result<f64, RuleError> {
        let raw = self.param(index)?;
        match raw.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(n),
            _ => Err(RuleError::InvalidNumber {
                rule: self.rule.name().to_string(),
                param: raw.to_string(),
            }),
        }
    }

    /// Parses the parameter at `index` as an integer.
    pub fn integer_param(&self, index: usize) -> Result<i64, RuleError> {
        let raw = self.param(index)?;
        raw.trim()
            .parse::<i64>()
            .map_err(|_| RuleError::InvalidInteger {
                rule: self.rule.name().to_string(),
                param: raw.to_string(),
            })
    }

    /// Parses the parameter at `index` as a concrete field path.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidPath`] for malformed paths and for paths
    /// containing wildcards.
    pub fn path_param(&self, index: usize) -> Result<FieldPath, RuleError> {
        let raw = self.param(index)?;
        let invalid = |source| RuleError::InvalidPath {
            rule: self.rule.name().to_string(),
            source,
        };
        let path = FieldPath::parse(raw).map_err(invalid)?;
        if path.has_wildcard() {
            return Err(invalid(crate::path::PathError::UnexpectedWildcard(
                raw.to_string(),
            )));
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_rule<T>(rule: &str, f: impl FnOnce(&Context<'_>) -> T) -> T {
        let data = Map::new();
        let field = Field::new("x").unwrap();
        let rule = Rule::parse(rule);
        let path = FieldPath::from_field("x");
        let config = EngineConfig::default();
        let ctx = Context::new(Value::Null, &data, &field, &rule, &path, &config);
        f(&ctx)
    }

    #[test]
    fn test_missing_parameter() {
        let err = with_rule("between:1", |ctx| ctx.param(1).unwrap_err());
        assert!(matches!(
            err,
            RuleError::MissingParameter {
                expected: 2,
                got: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_number_param() {
        assert_eq!(with_rule("min: 2.5", |ctx| ctx.number_param(0).unwrap()), 2.5);
        assert!(with_rule("min:abc", |ctx| ctx.number_param(0)).is_err());
        assert!(with_rule("min:NaN", |ctx| ctx.number_param(0)).is_err());
    }

    #[test]
    fn test_integer_param() {
        assert_eq!(with_rule("size:4", |ctx| ctx.integer_param(0).unwrap()), 4);
        assert!(matches!(
            with_rule("size:4.5", |ctx| ctx.integer_param(0)),
            Err(RuleError::InvalidInteger { .. })
        ));
    }

    #[test]
    fn test_path_param() {
        let path = with_rule("same:user.password", |ctx| ctx.path_param(0).unwrap());
        assert_eq!(path.to_string(), "user.password");

        assert!(matches!(
            with_rule("same:a..b", |ctx| ctx.path_param(0)),
            Err(RuleError::InvalidPath { .. })
        ));
        assert!(matches!(
            with_rule("same:items.*", |ctx| ctx.path_param(0)),
            Err(RuleError::InvalidPath { .. })
        ));
    }
}
