//! Type rules.
//!
//! These check the shape of a value. Some of them coerce: form and query
//! string inputs arrive as strings, so `bool`, `numeric` and `integer` replace
//! a matching string with its typed equivalent.

use crate::error::RuleError;
use crate::numeric::parse_number;
use crate::validation::Context;
use crate::value::{Number, Value};

use super::Validator;

/// Accepts booleans and the usual boolean spellings, coercing the latter.
///
/// `1`, `"1"`, `"on"`, `"true"` and `"yes"` become `true`; `0`, `"0"`, `"off"`,
/// `"false"` and `"no"` become `false`. String matching is case-sensitive.
pub struct Bool;

impl Bool {
    fn interpret(value: &Value) -> Option<bool> {
        match value {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => match n.to_f64() {
                (n, true) if n == 1.0 => Some(true),
                (n, true) if n == 0.0 => Some(false),
                _ => None,
            },
            Value::String(s) => match s.as_str() {
                "1" | "on" | "true" | "yes" => Some(true),
                "0" | "off" | "false" | "no" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

impl Validator for Bool {
    fn validate(&self, ctx: &mut Context<'_>) -> Result<bool, RuleError> {
        match Self::interpret(&ctx.value) {
            Some(b) => {
                ctx.value = Value::Bool(b);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn name(&self) -> &str {
        "bool"
    }
}

/// The value must be a keyed mapping.
pub struct Object;

impl Validator for Object {
    fn validate(&self, ctx: &mut Context<'_>) -> Result<bool, RuleError> {
        Ok(matches!(ctx.value, Value::Object(_)))
    }

    fn name(&self) -> &str {
        "object"
    }
}

/// The value must be a string. Registered as `string`.
pub struct StringType;

impl Validator for StringType {
    fn validate(&self, ctx: &mut Context<'_>) -> Result<bool, RuleError> {
        Ok(matches!(ctx.value, Value::String(_)))
    }

    fn name(&self) -> &str {
        "string"
    }
}

/// The value must be a number; numeric strings are converted.
pub struct Numeric;

impl Validator for Numeric {
    fn validate(&self, ctx: &mut Context<'_>) -> Result<bool, RuleError> {
        let number = match &ctx.value {
            Value::Number(_) => return Ok(true),
            Value::String(s) => parse_number(s),
            _ => None,
        };
        Ok(match number {
            Some(n) => {
                ctx.value = Value::Number(n);
                true
            }
            None => false,
        })
    }

    fn name(&self) -> &str {
        "numeric"
    }
}

/// The value must be a whole number.
///
/// Whole-valued floats and integral numeric strings are converted to integers.
pub struct Integer;

impl Integer {
    fn to_integer(number: Number) -> Option<Number> {
        match number {
            Number::Int(_) | Number::UInt(_) => Some(number),
            Number::Float(f) if number.is_integral() => {
                if f >= i64::MIN as f64 && f < i64::MAX as f64 {
                    Some(Number::Int(f as i64))
                } else {
                    Some(number)
                }
            }
            Number::Float(_) => None,
        }
    }
}

impl Validator for Integer {
    fn validate(&self, ctx: &mut Context<'_>) -> Result<bool, RuleError> {
        let number = match &ctx.value {
            Value::Number(n) => Some(*n),
            Value::String(s) => parse_number(s),
            _ => None,
        };
        Ok(match number.and_then(Self::to_integer) {
            Some(n) => {
                ctx.value = Value::Number(n);
                true
            }
            None => false,
        })
    }

    fn name(&self) -> &str {
        "integer"
    }
}

/// The value must be an array. File uploads are not arrays.
pub struct Array;

impl Validator for Array {
    fn validate(&self, ctx: &mut Context<'_>) -> Result<bool, RuleError> {
        Ok(matches!(ctx.value, Value::Array(_)))
    }

    fn name(&self) -> &str {
        "array"
    }
}
