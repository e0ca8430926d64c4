//! Numeric coercion.
//!
//! Numeric validators compare everything as `f64`. [`to_float64`] performs that
//! conversion and reports whether it was exact, so callers that care about
//! integer precision can reject values that lost it.

use crate::error::RuleError;
use crate::field_type::FieldType;
use crate::value::Value;

/// Converts a numeric value to `f64`.
///
/// Returns the converted value and an `exact` flag. The flag is `false` for
/// unsigned integers at or above 2^63, which are rounded to the nearest
/// representable float rather than rejected.
///
/// # Errors
///
/// Returns [`RuleError::NotNumeric`] if the value is not a number. Callers are
/// expected to classify the value with [`FieldType::of`] first, so this signals
/// a bug in the calling validator rather than bad input.
///
/// # Example
///
/// ```rust
/// use formguard::{numeric::to_float64, Value};
///
/// assert_eq!(to_float64(&Value::from(42u8)).unwrap(), (42.0, true));
///
/// let (value, exact) = to_float64(&Value::from(u64::MAX)).unwrap();
/// assert_eq!(value, 18446744073709551616.0);
/// assert!(!exact);
/// ```
pub fn to_float64(value: &Value) -> Result<(f64, bool), RuleError> {
    match value {
        Value::Number(n) => Ok(n.to_f64()),
        other => Err(RuleError::NotNumeric(FieldType::of(other))),
    }
}

/// Parses a numeric literal from a string, as sent by forms and query strings.
///
/// Integers keep their integer representation; anything else that parses as a
/// finite float becomes a float.
pub(crate) fn parse_number(s: &str) -> Option<crate::value::Number> {
    use crate::value::Number;

    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Some(Number::Int(i));
    }
    if let Ok(u) = s.parse::<u64>() {
        return Some(Number::UInt(u));
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() => Some(Number::Float(f)),
        _ => None,
    }
}
