//! Fatal configuration errors.

use crate::field_type::FieldType;
use crate::path::PathError;

/// An error raised by a validator that cannot interpret its own rule.
///
/// These are never validation failures: they mean the rule declaration itself
/// is wrong and must be fixed by the schema author.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("rule '{rule}' expects at least {expected} parameter(s), got {got}")]
    MissingParameter {
        rule: String,
        expected: usize,
        got: usize,
    },

    #[error("rule '{rule}': parameter '{param}' is not a valid number")]
    InvalidNumber { rule: String, param: String },

    #[error("rule '{rule}': parameter '{param}' is not a valid integer")]
    InvalidInteger { rule: String, param: String },

    #[error("rule '{rule}': invalid pattern '{pattern}'")]
    InvalidPattern {
        rule: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("rule '{rule}': invalid field path")]
    InvalidPath {
        rule: String,
        #[source]
        source: PathError,
    },

    #[error("expected a numeric value, got {0}")]
    NotNumeric(FieldType),
}

/// An error that aborts a whole validation pass.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("unknown validation rule '{rule}' on field '{field}'")]
    UnknownRule { field: String, rule: String },

    #[error("field '{field}', rule '{rule}'")]
    Rule {
        field: String,
        rule: String,
        #[source]
        source: RuleError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_rule_error_messages() {
        let err = RuleError::MissingParameter {
            rule: "between".to_string(),
            expected: 2,
            got: 1,
        };
        assert_eq!(
            err.to_string(),
            "rule 'between' expects at least 2 parameter(s), got 1"
        );

        let err = RuleError::NotNumeric(FieldType::String);
        assert_eq!(err.to_string(), "expected a numeric value, got string");
    }

    #[test]
    fn test_engine_error_keeps_source() {
        let err = EngineError::Rule {
            field: "age".to_string(),
            rule: "min".to_string(),
            source: RuleError::InvalidNumber {
                rule: "min".to_string(),
                param: "abc".to_string(),
            },
        };
        assert_eq!(err.to_string(), "field 'age', rule 'min'");
        assert!(err.source().unwrap().to_string().contains("'abc'"));
    }
}
