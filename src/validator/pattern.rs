//! Pattern and membership validators.

use parking_lot::RwLock;
use regex::Regex as Pattern;
use std::collections::HashMap;

use crate::error::RuleError;
use crate::numeric::parse_number;
use crate::validation::Context;
use crate::value::Value;

use super::{coerce, Placeholders, Validator};

/// The string must match a regular expression (`regex:^[a-z]+$`).
///
/// The pattern is the raw rule parameter, commas included. Non-string values
/// fail. Each distinct pattern is compiled once and shared by every later
/// call.
#[derive(Default)]
pub struct Regex {
    compiled: RwLock<HashMap<String, Pattern>>,
}

impl Regex {
    pub fn new() -> Self {
        Self::default()
    }

    fn pattern(&self, ctx: &Context<'_>) -> Result<Pattern, RuleError> {
        let raw = ctx.param(0)?;
        if let Some(pattern) = self.compiled.read().get(raw) {
            return Ok(pattern.clone());
        }

        let pattern = Pattern::new(raw).map_err(|source| RuleError::InvalidPattern {
            rule: ctx.rule().name().to_string(),
            pattern: raw.to_string(),
            source,
        })?;
        self.compiled
            .write()
            .entry(raw.to_string())
            .or_insert_with(|| pattern.clone());
        Ok(pattern)
    }
}

impl Validator for Regex {
    fn validate(&self, ctx: &mut Context<'_>) -> Result<bool, RuleError> {
        let pattern = self.pattern(ctx)?;
        Ok(match &ctx.value {
            Value::String(s) => pattern.is_match(s),
            _ => false,
        })
    }

    fn name(&self) -> &str {
        "regex"
    }
}

/// Membership of a string or number in the rule's parameter list.
///
/// `None` means the value cannot be a member: it is neither a string nor a
/// number, or it is a number the engine refuses to compare.
fn membership(ctx: &Context<'_>) -> Result<Option<bool>, RuleError> {
    match &ctx.value {
        Value::String(s) => Ok(Some(ctx.params().iter().any(|p| p == s))),
        value @ Value::Number(_) => {
            let Some(n) = coerce(ctx, value)? else {
                return Ok(None);
            };
            Ok(Some(ctx.params().iter().any(|p| {
                parse_number(p).is_some_and(|candidate| candidate.to_f64().0 == n)
            })))
        }
        _ => Ok(None),
    }
}

fn values_placeholder(ctx: &Context<'_>) -> Placeholders {
    let mut placeholders = Placeholders::new();
    placeholders.insert(":values".to_string(), ctx.params().join(", "));
    placeholders
}

/// The value must equal one of the listed literals (`in:draft,published`).
pub struct In;

impl Validator for In {
    fn validate(&self, ctx: &mut Context<'_>) -> Result<bool, RuleError> {
        Ok(membership(ctx)?.unwrap_or(false))
    }

    fn name(&self) -> &str {
        "in"
    }

    fn message_placeholders(&self, ctx: &Context<'_>) -> Result<Placeholders, RuleError> {
        Ok(values_placeholder(ctx))
    }
}

/// The value must not equal any of the listed literals.
///
/// Values that are neither strings nor numbers pass; numbers that lost
/// precision fail when the engine rejects imprecise numbers.
pub struct NotIn;

impl Validator for NotIn {
    fn validate(&self, ctx: &mut Context<'_>) -> Result<bool, RuleError> {
        Ok(match &ctx.value {
            Value::String(_) | Value::Number(_) => membership(ctx)?.is_some_and(|found| !found),
            _ => true,
        })
    }

    fn name(&self) -> &str {
        "not_in"
    }

    fn message_placeholders(&self, ctx: &Context<'_>) -> Result<Placeholders, RuleError> {
        Ok(values_placeholder(ctx))
    }
}
