//! Semantic classification of request values.
//!
//! Every value in a data tree resolves to exactly one [`FieldType`]. Type-dependent
//! validators (`min`, `max`, `size`, ...) branch on it, and comparison validators
//! refuse to compare values whose types differ.

use std::fmt::{self, Display};

use crate::value::Value;

/// The semantic family a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Numeric,
    String,
    Boolean,
    Array,
    Object,
    File,
    /// Null, absent, or anything no validator knows how to measure.
    Unsupported,
}

impl FieldType {
    /// Classifies a value.
    ///
    /// Total and deterministic: every value maps to one type, and `Null`
    /// resolves to [`FieldType::Unsupported`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use formguard::{FieldType, File, Value};
    ///
    /// assert_eq!(FieldType::of(&Value::from(3)), FieldType::Numeric);
    /// assert_eq!(FieldType::of(&Value::from("3")), FieldType::String);
    /// assert_eq!(FieldType::of(&Value::from(vec![File::new("a.txt", 12)])), FieldType::File);
    /// assert_eq!(FieldType::of(&Value::Null), FieldType::Unsupported);
    /// ```
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Files(_) => FieldType::File,
            Value::Number(_) => FieldType::Numeric,
            Value::Bool(_) => FieldType::Boolean,
            Value::String(_) => FieldType::String,
            Value::Array(_) => FieldType::Array,
            Value::Object(_) => FieldType::Object,
            Value::Null => FieldType::Unsupported,
        }
    }

    /// Returns the lowercase name used in message keys (`min.string`).
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Numeric => "numeric",
            FieldType::String => "string",
            FieldType::Boolean => "boolean",
            FieldType::Array => "array",
            FieldType::Object => "object",
            FieldType::File => "file",
            FieldType::Unsupported => "unsupported",
        }
    }

    /// Returns true for types that have a measurable length or magnitude.
    pub fn is_measurable(&self) -> bool {
        !matches!(self, FieldType::Boolean | FieldType::Unsupported)
    }
}

impl Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
