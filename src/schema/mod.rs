//! Declarative validation schemas.
//!
//! A schema is a [`Fields`] mapping: an ordered set of [`Field`]s keyed by their
//! declared path, each carrying an ordered list of [`Rule`]s.
//!
//! # Example
//!
//! ```rust
//! use formguard::{Field, Fields};
//!
//! let fields = Fields::new()
//!     .field(Field::new("name").unwrap().with_rules("required|string|between:2,50"))
//!     .field(Field::new("tags").unwrap().with_rules("array|max:5")
//!         .elements([Field::new("label").unwrap().with_rules("required|string")]));
//!
//! let paths: Vec<_> = fields.iter().map(|(path, _)| path.as_str()).collect();
//! assert_eq!(paths, vec!["name", "tags", "tags.*.label"]);
//! ```

mod field;
mod rule;

use indexmap::IndexMap;

pub use field::Field;
pub use rule::{Rule, NULLABLE, REQUIRED};

/// An ordered, immutable-once-built set of field declarations.
///
/// Nested fields declared with [`Field::object`] or [`Field::elements`] are
/// flattened on insertion, parents first. Inserting a field whose path is
/// already declared replaces the earlier declaration in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    fields: IndexMap<String, Field>,
}

impl Fields {
    /// Creates an empty set of fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field and returns self for chaining.
    pub fn field(mut self, field: Field) -> Self {
        self.insert(field);
        self
    }

    /// Adds a field, flattening its nested children.
    pub fn insert(&mut self, mut field: Field) {
        let children = field.take_children();
        self.fields.insert(field.path().to_string(), field);
        for child in children {
            self.insert(child);
        }
    }

    /// Returns the field declared at `path`.
    pub fn get(&self, path: &str) -> Option<&Field> {
        self.fields.get(path)
    }

    /// Iterates over `(declared path, field)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Field)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<Field> for Fields {
    fn from_iter<T: IntoIterator<Item = Field>>(iter: T) -> Self {
        let mut fields = Fields::new();
        for field in iter {
            fields.insert(field);
        }
        fields
    }
}
