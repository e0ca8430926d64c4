//! Cross-field comparison validators.
//!
//! Each of these takes the path of another field as its only parameter and
//! compares the value under validation against that field's raw value. A
//! missing other field, or one whose type differs, fails the rule.

use crate::error::RuleError;
use crate::field_type::FieldType;
use crate::locator;
use crate::validation::Context;
use crate::value::Value;

use super::{coerce, length, params_placeholders, values_equal, Placeholders, Validator};

/// Looks up the field named by the rule's first parameter.
fn other_value<'a>(ctx: &Context<'a>) -> Result<Option<&'a Value>, RuleError> {
    let path = ctx.path_param(0)?;
    let located = locator::locate(&path, ctx.data()).map_err(|source| RuleError::InvalidPath {
        rule: ctx.rule().name().to_string(),
        source,
    })?;
    Ok(located.value)
}

/// Ordering comparison against another field.
///
/// Numbers compare by value, strings by grapheme count, arrays and objects by
/// length. For files, every file on this side must compare favorably to every
/// file on the other side, by byte size.
pub struct Comparison {
    name: &'static str,
    holds: fn(f64, f64) -> bool,
}

impl Comparison {
    /// `greater_than:other`
    pub fn greater_than() -> Self {
        Self {
            name: "greater_than",
            holds: |a, b| a > b,
        }
    }

    /// `greater_than_equal:other`
    pub fn greater_than_equal() -> Self {
        Self {
            name: "greater_than_equal",
            holds: |a, b| a >= b,
        }
    }

    /// `lower_than:other`
    pub fn lower_than() -> Self {
        Self {
            name: "lower_than",
            holds: |a, b| a < b,
        }
    }

    /// `lower_than_equal:other`
    pub fn lower_than_equal() -> Self {
        Self {
            name: "lower_than_equal",
            holds: |a, b| a <= b,
        }
    }
}

impl Validator for Comparison {
    fn validate(&self, ctx: &mut Context<'_>) -> Result<bool, RuleError> {
        let Some(other) = other_value(ctx)? else {
            return Ok(false);
        };
        let value_type = FieldType::of(&ctx.value);
        if value_type != FieldType::of(other) {
            return Ok(false);
        }

        let holds = self.holds;
        match (value_type, &ctx.value, other) {
            (FieldType::Numeric, value, other) => {
                match (coerce(ctx, value)?, coerce(ctx, other)?) {
                    (Some(a), Some(b)) => Ok(holds(a, b)),
                    _ => Ok(false),
                }
            }
            (FieldType::File, Value::Files(files), Value::Files(others)) => {
                Ok(files.iter().all(|file| {
                    others
                        .iter()
                        .all(|other| holds(file.size as f64, other.size as f64))
                }))
            }
            (_, value, other) => match (length(value), length(other)) {
                (Some(a), Some(b)) => Ok(holds(a as f64, b as f64)),
                _ => Ok(true),
            },
        }
    }

    fn name(&self) -> &str {
        self.name
    }

    fn is_type_dependent(&self) -> bool {
        true
    }

    fn message_placeholders(&self, ctx: &Context<'_>) -> Result<Placeholders, RuleError> {
        params_placeholders(ctx, &[(":other", 0)])
    }
}

/// Equality against another field of the same type.
///
/// Files are never considered equal.
fn same(ctx: &Context<'_>) -> Result<bool, RuleError> {
    let Some(other) = other_value(ctx)? else {
        return Ok(false);
    };
    let value_type = FieldType::of(&ctx.value);
    if value_type != FieldType::of(other) {
        return Ok(false);
    }

    Ok(match value_type {
        FieldType::Numeric => match (coerce(ctx, &ctx.value)?, coerce(ctx, other)?) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
        FieldType::String
        | FieldType::Boolean
        | FieldType::Array
        | FieldType::Object => values_equal(&ctx.value, other),
        FieldType::File | FieldType::Unsupported => false,
    })
}

/// The value must equal the other field's value (`same:password`).
pub struct Same;

impl Validator for Same {
    fn validate(&self, ctx: &mut Context<'_>) -> Result<bool, RuleError> {
        same(ctx)
    }

    fn name(&self) -> &str {
        "same"
    }

    fn message_placeholders(&self, ctx: &Context<'_>) -> Result<Placeholders, RuleError> {
        params_placeholders(ctx, &[(":other", 0)])
    }
}

/// The exact complement of [`Same`]: passes when the other field is missing.
pub struct Different;

impl Validator for Different {
    fn validate(&self, ctx: &mut Context<'_>) -> Result<bool, RuleError> {
        Ok(!same(ctx)?)
    }

    fn name(&self) -> &str {
        "different"
    }

    fn message_placeholders(&self, ctx: &Context<'_>) -> Result<Placeholders, RuleError> {
        params_placeholders(ctx, &[(":other", 0)])
    }
}
