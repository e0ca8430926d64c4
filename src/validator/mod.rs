//! The validator contract and the built-in catalog.
//!
//! A [`Validator`] is a stateless strategy object looked up by name. The same
//! instance serves every field and every request that references its name, so
//! implementations must keep all per-call state in the [`Context`].
//!
//! # Writing a validator
//!
//! ```rust
//! use formguard::{Context, RuleError, Validator, Value};
//!
//! struct Uppercase;
//!
//! impl Validator for Uppercase {
//!     fn validate(&self, ctx: &mut Context<'_>) -> Result<bool, RuleError> {
//!         Ok(match &ctx.value {
//!             Value::String(s) => s.chars().all(|c| !c.is_lowercase()),
//!             _ => false,
//!         })
//!     }
//!
//!     fn name(&self) -> &str {
//!         "uppercase"
//!     }
//! }
//! ```

mod compare;
mod pattern;
mod required;
mod size;
mod types;

use std::sync::Arc;

use indexmap::IndexMap;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::RuleError;
use crate::numeric::to_float64;
use crate::validation::Context;
use crate::value::Value;

pub use compare::{Comparison, Different, Same};
pub use pattern::{In, NotIn, Regex};
pub use required::Required;
pub use size::{Between, Max, Min, Size};
pub use types::{Array, Bool, Integer, Numeric, Object, StringType};

/// Placeholder values for a localized message, keyed by placeholder (`:min`).
pub type Placeholders = IndexMap<String, String>;

/// The contract every rule implementation satisfies.
///
/// `Send + Sync` because one registered instance is shared by all concurrent
/// validation passes.
pub trait Validator: Send + Sync {
    /// Decides whether `ctx.value` satisfies the rule.
    ///
    /// May replace `ctx.value` to coerce it. Returns `Ok(false)` for a
    /// validation failure and `Err` only when the rule itself is malformed.
    fn validate(&self, ctx: &mut Context<'_>) -> Result<bool, RuleError>;

    /// The name used in rule declarations and message keys.
    fn name(&self) -> &str;

    /// True when the outcome and message depend on the value's [`FieldType`](crate::FieldType).
    ///
    /// Failures of type-dependent validators use `name.<type>` as message key.
    fn is_type_dependent(&self) -> bool {
        false
    }

    /// Values substituted into the localized message on failure.
    fn message_placeholders(&self, _ctx: &Context<'_>) -> Result<Placeholders, RuleError> {
        Ok(Placeholders::new())
    }
}

/// Returns one instance of every built-in validator.
pub fn builtins() -> Vec<Arc<dyn Validator>> {
    vec![
        Arc::new(Required),
        Arc::new(Min),
        Arc::new(Max),
        Arc::new(Between),
        Arc::new(Size),
        Arc::new(Comparison::greater_than()),
        Arc::new(Comparison::greater_than_equal()),
        Arc::new(Comparison::lower_than()),
        Arc::new(Comparison::lower_than_equal()),
        Arc::new(Same),
        Arc::new(Different),
        Arc::new(Bool),
        Arc::new(Object),
        Arc::new(StringType),
        Arc::new(Numeric),
        Arc::new(Integer),
        Arc::new(Array),
        Arc::new(Regex::new()),
        Arc::new(In),
        Arc::new(NotIn),
    ]
}

/// Counts user-perceived characters (extended grapheme clusters).
pub(crate) fn grapheme_len(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Returns the length of a string, array or object value.
///
/// Strings count grapheme clusters and objects count keys.
pub(crate) fn length(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(grapheme_len(s)),
        Value::Array(items) => Some(items.len()),
        Value::Object(map) => Some(map.len()),
        _ => None,
    }
}

/// Structural equality where numbers compare by value at any depth.
///
/// `1` equals `1.0`, inside arrays and objects too. Object key order is
/// ignored.
pub(crate) fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.to_f64().0 == y.to_f64().0,
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}

/// Coerces a numeric value to `f64`, applying the precision-loss policy.
///
/// Returns `None` when the value lost precision and the engine is configured
/// to reject such values.
pub(crate) fn coerce(ctx: &Context<'_>, value: &Value) -> Result<Option<f64>, RuleError> {
    let (n, exact) = to_float64(value)?;
    if !exact {
        if ctx.config().reject_imprecise_numbers() {
            tracing::debug!(
                field = %ctx.path(),
                rule = ctx.rule().name(),
                "rejecting numeric value that lost precision"
            );
            return Ok(None);
        }
        tracing::warn!(
            field = %ctx.path(),
            rule = ctx.rule().name(),
            "numeric value lost precision during coercion"
        );
    }
    Ok(Some(n))
}

/// Builds placeholders from `(placeholder, parameter index)` pairs.
fn params_placeholders(
    ctx: &Context<'_>,
    names: &[(&str, usize)],
) -> Result<Placeholders, RuleError> {
    names
        .iter()
        .map(|(name, index)| Ok((name.to_string(), ctx.param(*index)?.to_string())))
        .collect()
}
