//! Untyped request values.
//!
//! This module provides [`Value`], the dynamically-typed value stored in a
//! request's data tree, together with [`Number`] for numeric representations
//! and [`File`] for uploaded file descriptors.
//!
//! A data tree is a [`Map`]: an insertion-ordered mapping from field name to
//! [`Value`]. Trees are usually built from a parsed JSON body or form:
//!
//! ```rust
//! use formguard::{Map, Value};
//! use serde_json::json;
//!
//! let tree: Map = Value::from(json!({"name": "Alice", "age": 30}))
//!     .into_object()
//!     .unwrap();
//!
//! assert_eq!(tree.get("name"), Some(&Value::from("Alice")));
//! ```

use std::fmt::{self, Display};

use indexmap::IndexMap;

use crate::field_type::FieldType;

/// An ordered mapping from field name to value.
///
/// The root of every data tree is a `Map`; nested objects are `Map`s too.
pub type Map = IndexMap<String, Value>;

/// A numeric value as received from the HTTP layer.
///
/// Signed and unsigned integers of any width are widened into `Int` and
/// `UInt`; floating-point values of any width into `Float`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl Number {
    /// Converts the number to `f64`.
    ///
    /// The second element is `false` when the conversion lost precision, which
    /// happens for unsigned values at or above 2^63.
    pub fn to_f64(&self) -> (f64, bool) {
        match *self {
            Number::Int(n) => (n as f64, true),
            Number::UInt(n) => (n as f64, n <= i64::MAX as u64),
            Number::Float(n) => (n, true),
        }
    }

    /// Returns true if the number has no fractional part.
    pub fn is_integral(&self) -> bool {
        match *self {
            Number::Int(_) | Number::UInt(_) => true,
            Number::Float(n) => n.is_finite() && n.fract() == 0.0,
        }
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            Number::UInt(n) => write!(f, "{}", n),
            Number::Float(n) => write!(f, "{}", n),
        }
    }
}

macro_rules! number_from {
    ($variant:ident, $target:ty, $($source:ty),*) => {
        $(
            impl From<$source> for Number {
                fn from(n: $source) -> Self {
                    Number::$variant(n as $target)
                }
            }

            impl From<$source> for Value {
                fn from(n: $source) -> Self {
                    Value::Number(Number::from(n))
                }
            }
        )*
    };
}

number_from!(Int, i64, i8, i16, i32, i64, isize);
number_from!(UInt, u64, u8, u16, u32, u64, usize);
number_from!(Float, f64, f32, f64);

/// An uploaded file descriptor.
///
/// Only metadata is carried; the engine never opens the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    /// Original file name as sent by the client.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Content type declared by the client, if any.
    pub mime_type: Option<String>,
}

impl File {
    /// Creates a file descriptor with the given name and byte size.
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: None,
        }
    }

    /// Sets the declared content type.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Returns the file size in whole units of `unit` bytes, rounded up.
    ///
    /// Used by the `size` rule: a 2050-byte file is `size:3` with a unit of
    /// 1024. `min`, `max` and `between` compare the exact size instead.
    pub fn size_in(&self, unit: u64) -> u64 {
        self.size.div_ceil(unit.max(1))
    }
}

/// A dynamically-typed request value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// An absent or explicit null value.
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(Map),
    /// One or more uploaded files bound to the same field.
    Files(Vec<File>),
}

impl Value {
    /// Returns the semantic family of this value.
    pub fn field_type(&self) -> FieldType {
        FieldType::of(self)
    }

    /// Returns true for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_files(&self) -> Option<&[File]> {
        match self {
            Value::Files(files) => Some(files),
            _ => None,
        }
    }

    /// Consumes the value and returns the inner map if it is an object.
    pub fn into_object(self) -> Option<Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Converts the value back into JSON.
    ///
    /// Files are rendered as objects holding their metadata.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;

        match self {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Number(Number::Int(n)) => Json::from(*n),
            Value::Number(Number::UInt(n)) => Json::from(*n),
            Value::Number(Number::Float(n)) => serde_json::Number::from_f64(*n)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::String(s) => Json::String(s.clone()),
            Value::Array(items) => Json::Array(items.iter().map(Value::to_json).collect()),
            Value::Object(map) => Json::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Value::Files(files) => Json::Array(
                files
                    .iter()
                    .map(|file| {
                        serde_json::json!({
                            "name": file.name,
                            "size": file.size,
                            "mime_type": file.mime_type,
                        })
                    })
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Object(map)
    }
}

impl From<Vec<File>> for Value {
    fn from(files: Vec<File>) -> Self {
        Value::Files(files)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Number(Number::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Value::Number(Number::UInt(u))
                } else {
                    Value::Number(Number::Float(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            Json::String(s) => Value::String(s),
            Json::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Json::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}
