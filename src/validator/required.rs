use crate::error::RuleError;
use crate::schema::REQUIRED;
use crate::validation::Context;
use crate::value::Value;

use super::Validator;

/// The field must be present and non-empty.
///
/// Fails for an absent field, for an explicit null unless the field is
/// nullable, and for the empty string. Every other value passes, including
/// `false`, `0` and empty arrays.
pub struct Required;

impl Validator for Required {
    fn validate(&self, ctx: &mut Context<'_>) -> Result<bool, RuleError> {
        Ok(match &ctx.value {
            Value::Null => ctx.exists() && ctx.field().is_nullable(),
            Value::String(s) => !s.is_empty(),
            _ => true,
        })
    }

    fn name(&self) -> &str {
        REQUIRED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::path::FieldPath;
    use crate::schema::{Field, Rule};
    use crate::validator::test_support::check;
    use crate::value::Map;

    fn null_outcome(nullable: bool, exists: bool) -> bool {
        let data = Map::new();
        let mut field = Field::new("bio").unwrap().with_rules("required");
        if nullable {
            field = field.nullable();
        }
        let rule = Rule::named("required");
        let path = FieldPath::from_field("bio");
        let config = EngineConfig::default();
        let mut ctx = Context::new(Value::Null, &data, &field, &rule, &path, &config);
        if !exists {
            ctx = ctx.missing();
        }
        Required.validate(&mut ctx).unwrap()
    }

    #[test]
    fn test_present_values_pass() {
        assert!(check(&Required, "required", "x"));
        assert!(check(&Required, "required", 0));
        assert!(check(&Required, "required", false));
        assert!(check(&Required, "required", Value::Array(Vec::new())));
    }

    #[test]
    fn test_empty_string_fails() {
        assert!(!check(&Required, "required", ""));
    }

    #[test]
    fn test_null_handling() {
        assert!(!null_outcome(false, true));
        assert!(null_outcome(true, true));
        assert!(!null_outcome(true, false));
        assert!(!null_outcome(false, false));
    }
}
