//! Validation failure types.
//!
//! This module provides [`FieldError`] for a single failed rule and
//! [`FieldErrors`] for accumulating every failure of a validation pass.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use stillwater::prelude::*;

use crate::path::FieldPath;
use crate::validator::Placeholders;

/// A single failed rule with everything the message layer needs.
///
/// `FieldError` never carries user-facing text. The message layer looks up
/// `message_key` in its localized catalog and substitutes `placeholders`.
///
/// # Example
///
/// ```rust
/// use formguard::{FieldError, FieldPath};
///
/// let error = FieldError::new("items[0].name".parse().unwrap(), "items.*.name", "min")
///     .with_message_key("min.string")
///     .with_placeholder(":min", "3");
///
/// assert_eq!(error.message_key, "min.string");
/// assert_eq!(error.placeholders[":min"], "3");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    /// Concrete path of the value that failed.
    pub path: FieldPath,
    /// Declared field path, possibly with wildcards.
    pub field: String,
    /// Name of the failed rule.
    pub rule: String,
    /// Lookup key for the localized message (`rule` or `rule.<type>`).
    pub message_key: String,
    /// Placeholder values to substitute into the message.
    pub placeholders: Placeholders,
}

impl FieldError {
    /// Creates an error for `rule` at `path`.
    ///
    /// The message key defaults to the rule name.
    pub fn new(path: FieldPath, field: impl Into<String>, rule: impl Into<String>) -> Self {
        let rule = rule.into();
        Self {
            path,
            field: field.into(),
            message_key: rule.clone(),
            rule,
            placeholders: Placeholders::new(),
        }
    }

    /// Sets the message key and returns self for chaining.
    pub fn with_message_key(mut self, key: impl Into<String>) -> Self {
        self.message_key = key.into();
        self
    }

    /// Adds a placeholder and returns self for chaining.
    pub fn with_placeholder(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.placeholders.insert(name.into(), value.into());
        self
    }

    /// Replaces all placeholders and returns self for chaining.
    pub fn with_placeholders(mut self, placeholders: Placeholders) -> Self {
        self.placeholders = placeholders;
        self
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path_str = if self.path.is_root() {
            "(root)".to_string()
        } else {
            self.path.to_string()
        };

        write!(f, "{}: {}", path_str, self.message_key)?;
        for (name, value) in &self.placeholders {
            write!(f, " {}={}", name, value)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldError {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<FieldError>();
    assert_sync::<FieldError>();
};

/// A non-empty collection of validation failures.
///
/// `FieldErrors` wraps a `NonEmptyVec<FieldError>` so that a
/// `Validation::Failure` always holds at least one error. Failures keep the
/// order in which the engine produced them: fields in declaration order,
/// occurrences in tree order, rules in declaration order.
///
/// # Combining Errors
///
/// ```rust
/// use formguard::{FieldError, FieldErrors, FieldPath};
/// use stillwater::prelude::*;
///
/// let a = FieldErrors::single(FieldError::new(FieldPath::from_field("name"), "name", "required"));
/// let b = FieldErrors::single(FieldError::new(FieldPath::from_field("age"), "age", "min"));
///
/// let combined = a.combine(b);
/// assert_eq!(combined.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldErrors(NonEmptyVec<FieldError>);

impl FieldErrors {
    /// Creates a `FieldErrors` containing a single error.
    pub fn single(error: FieldError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a `FieldErrors` from a `NonEmptyVec` of errors.
    pub fn from_non_empty(errors: NonEmptyVec<FieldError>) -> Self {
        Self(errors)
    }

    /// Creates a `FieldErrors` from a `Vec`, or `None` if it is empty.
    pub fn from_vec(errors: Vec<FieldError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    /// Returns the number of errors in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is guaranteed non-empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the contained errors.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Returns the first error in the collection.
    pub fn first(&self) -> &FieldError {
        self.0.head()
    }

    /// Returns all errors at the specified concrete path.
    pub fn at_path(&self, path: &FieldPath) -> Vec<&FieldError> {
        self.0.iter().filter(|e| &e.path == path).collect()
    }

    /// Returns all errors raised by the declared field `field`.
    pub fn for_field(&self, field: &str) -> Vec<&FieldError> {
        self.0.iter().filter(|e| e.field == field).collect()
    }

    /// Returns all errors raised by the rule `rule`.
    pub fn with_rule(&self, rule: &str) -> Vec<&FieldError> {
        self.0.iter().filter(|e| e.rule == rule).collect()
    }

    /// Groups failed rule names by concrete field path.
    ///
    /// Paths appear in the order of their first failure; rule names keep
    /// their declaration order.
    pub fn by_field(&self) -> IndexMap<String, Vec<String>> {
        let mut grouped: IndexMap<String, Vec<String>> = IndexMap::new();
        for error in self.0.iter() {
            grouped
                .entry(error.path.to_string())
                .or_default()
                .push(error.rule.clone());
        }
        grouped
    }

    /// Converts this collection into a `Vec<FieldError>`.
    pub fn into_vec(self) -> Vec<FieldError> {
        self.0.into_vec()
    }
}

impl Semigroup for FieldErrors {
    fn combine(self, other: Self) -> Self {
        FieldErrors(self.0.combine(other.0))
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

impl IntoIterator for FieldErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = &'a FieldError;
    type IntoIter = Box<dyn Iterator<Item = &'a FieldError> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<FieldErrors>();
    assert_sync::<FieldErrors>();
};

#[cfg(test)]
mod tests {
    use super::*;

    fn error(path: &str, rule: &str) -> FieldError {
        FieldError::new(path.parse().unwrap(), path, rule)
    }

    #[test]
    fn test_field_error_defaults() {
        let e = error("name", "required");
        assert_eq!(e.rule, "required");
        assert_eq!(e.message_key, "required");
        assert!(e.placeholders.is_empty());
    }

    #[test]
    fn test_field_error_display() {
        let e = error("age", "min")
            .with_message_key("min.numeric")
            .with_placeholder(":min", "18");
        assert_eq!(e.to_string(), "age: min.numeric :min=18");
    }

    #[test]
    fn test_from_vec_rejects_empty() {
        assert!(FieldErrors::from_vec(Vec::new()).is_none());
        assert_eq!(
            FieldErrors::from_vec(vec![error("a", "required")]).unwrap().len(),
            1
        );
    }

    #[test]
    fn test_by_field_groups_in_order() {
        let errors = FieldErrors::single(error("name", "required"))
            .combine(FieldErrors::single(error("age", "min")))
            .combine(FieldErrors::single(error("name", "min")));

        let grouped = errors.by_field();
        let keys: Vec<_> = grouped.keys().cloned().collect();
        assert_eq!(keys, vec!["name", "age"]);
        assert_eq!(grouped["name"], vec!["required", "min"]);
        assert_eq!(grouped["age"], vec!["min"]);
    }

    #[test]
    fn test_filters() {
        let errors = FieldErrors::single(error("a", "required"))
            .combine(FieldErrors::single(error("b", "required")))
            .combine(FieldErrors::single(error("b", "max")));

        assert_eq!(errors.with_rule("required").len(), 2);
        assert_eq!(errors.for_field("b").len(), 2);
        assert_eq!(errors.at_path(&FieldPath::from_field("a")).len(), 1);
        assert_eq!(errors.first().rule, "required");
    }

    #[test]
    fn test_display_lists_every_error() {
        let errors = FieldErrors::single(error("name", "required"))
            .combine(FieldErrors::single(error("email", "regex")));
        let display = errors.to_string();

        assert!(display.contains("2 error(s)"));
        assert!(display.contains("name: required"));
        assert!(display.contains("email: regex"));
    }
}
