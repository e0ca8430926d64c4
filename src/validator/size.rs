//! Magnitude and length validators.
//!
//! `min`, `max`, `between` and `size` measure the value according to its type:
//!
//! - numbers are compared by value
//! - strings by grapheme cluster count
//! - arrays by element count, objects by key count
//! - files by size in units of [`EngineConfig::file_size_unit`](crate::EngineConfig)
//!   (KiB by default); every file of a multi-file upload must match
//!
//! `min`, `max` and `between` compare a file's exact size, so `min:2` needs at
//! least 2048 bytes. `size` compares the size rounded up to whole units.
//!
//! Any other type passes: checking the type is the job of a separate rule.

use crate::error::RuleError;
use crate::field_type::FieldType;
use crate::validation::Context;
use crate::value::{File, Value};

use super::{coerce, length, params_placeholders, Placeholders, Validator};

/// A value reduced to what the size rules compare.
enum Measure {
    Magnitude(f64),
    Length(usize),
    /// Size of every file, in configured units.
    Files(Vec<f64>),
    /// A number that lost precision while the engine rejects those.
    Rejected,
    Unmeasurable,
}

impl Measure {
    /// Measures files by their exact size in units.
    fn of(ctx: &Context<'_>) -> Result<Self, RuleError> {
        Self::measure(ctx, |file, unit| file.size as f64 / unit as f64)
    }

    /// Measures files by their size rounded up to whole units.
    fn rounded_up(ctx: &Context<'_>) -> Result<Self, RuleError> {
        Self::measure(ctx, |file, unit| file.size_in(unit) as f64)
    }

    fn measure(ctx: &Context<'_>, units: impl Fn(&File, u64) -> f64) -> Result<Self, RuleError> {
        let value = &ctx.value;
        let unit = ctx.config().file_size_unit().max(1);
        Ok(match FieldType::of(value) {
            FieldType::Numeric => match coerce(ctx, value)? {
                Some(n) => Measure::Magnitude(n),
                None => Measure::Rejected,
            },
            FieldType::String | FieldType::Array | FieldType::Object => {
                length(value).map_or(Measure::Unmeasurable, Measure::Length)
            }
            FieldType::File => match value {
                Value::Files(files) => Measure::Files(
                    files
                        .iter()
                        .map(|file| units(file, unit))
                        .collect(),
                ),
                _ => Measure::Unmeasurable,
            },
            FieldType::Boolean | FieldType::Unsupported => Measure::Unmeasurable,
        })
    }

    fn satisfies(&self, check: impl Fn(f64) -> bool) -> bool {
        match self {
            Measure::Magnitude(n) => check(*n),
            Measure::Length(len) => check(*len as f64),
            Measure::Files(sizes) => sizes.iter().all(|size| check(*size)),
            Measure::Rejected => false,
            Measure::Unmeasurable => true,
        }
    }
}

/// Numbers must be at least n; strings, arrays, objects and files must measure at least n.
pub struct Min;

impl Validator for Min {
    fn validate(&self, ctx: &mut Context<'_>) -> Result<bool, RuleError> {
        let min = ctx.number_param(0)?;
        Ok(Measure::of(ctx)?.satisfies(|n| n >= min))
    }

    fn name(&self) -> &str {
        "min"
    }

    fn is_type_dependent(&self) -> bool {
        true
    }

    fn message_placeholders(&self, ctx: &Context<'_>) -> Result<Placeholders, RuleError> {
        params_placeholders(ctx, &[(":min", 0)])
    }
}

/// Numbers must be at most n; strings, arrays, objects and files must measure at most n.
pub struct Max;

impl Validator for Max {
    fn validate(&self, ctx: &mut Context<'_>) -> Result<bool, RuleError> {
        let max = ctx.number_param(0)?;
        Ok(Measure::of(ctx)?.satisfies(|n| n <= max))
    }

    fn name(&self) -> &str {
        "max"
    }

    fn is_type_dependent(&self) -> bool {
        true
    }

    fn message_placeholders(&self, ctx: &Context<'_>) -> Result<Placeholders, RuleError> {
        params_placeholders(ctx, &[(":max", 0)])
    }
}

/// The measure must fall within `lo..=hi`, both bounds included.
pub struct Between;

impl Validator for Between {
    fn validate(&self, ctx: &mut Context<'_>) -> Result<bool, RuleError> {
        let min = ctx.number_param(0)?;
        let max = ctx.number_param(1)?;
        Ok(Measure::of(ctx)?.satisfies(|n| n >= min && n <= max))
    }

    fn name(&self) -> &str {
        "between"
    }

    fn is_type_dependent(&self) -> bool {
        true
    }

    fn message_placeholders(&self, ctx: &Context<'_>) -> Result<Placeholders, RuleError> {
        params_placeholders(ctx, &[(":min", 0), (":max", 1)])
    }
}

/// The measure must equal n exactly. The parameter must be an integer.
///
/// Files are measured in whole units, rounded up.
pub struct Size;

impl Validator for Size {
    fn validate(&self, ctx: &mut Context<'_>) -> Result<bool, RuleError> {
        let size = ctx.integer_param(0)? as f64;
        Ok(Measure::rounded_up(ctx)?.satisfies(|n| n == size))
    }

    fn name(&self) -> &str {
        "size"
    }

    fn is_type_dependent(&self) -> bool {
        true
    }

    fn message_placeholders(&self, ctx: &Context<'_>) -> Result<Placeholders, RuleError> {
        params_placeholders(ctx, &[(":value", 0)])
    }
}
