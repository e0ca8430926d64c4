//! Validator registry for name-based rule dispatch.
//!
//! This module provides the [`ValidatorRegistry`] type that maps rule names to
//! shared [`Validator`] instances. The engine resolves every rule of a
//! [`Fields`] set against it before inspecting any value.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::schema::Fields;
use crate::validator::{builtins, Validator};

/// Type alias for the validator storage map.
type ValidatorMap = Arc<RwLock<HashMap<String, Arc<dyn Validator>>>>;

/// A thread-safe mapping from rule name to validator.
///
/// # Thread Safety
///
/// The registry uses `Arc<RwLock<...>>`:
/// - Concurrent validation passes only take read locks
/// - Registration takes the write lock and is serialized
///
/// Clones share the same storage, so a validator registered through one clone
/// is visible to all of them.
///
/// # Example
///
/// ```rust
/// use formguard::{Context, RuleError, Validator, ValidatorRegistry};
///
/// struct AlwaysFails;
///
/// impl Validator for AlwaysFails {
///     fn validate(&self, _ctx: &mut Context<'_>) -> Result<bool, RuleError> {
///         Ok(false)
///     }
///
///     fn name(&self) -> &str {
///         "always_fails"
///     }
/// }
///
/// let registry = ValidatorRegistry::with_builtins();
/// registry.register(AlwaysFails).unwrap();
///
/// assert!(registry.contains("always_fails"));
/// assert!(registry.contains("between"));
/// ```
pub struct ValidatorRegistry {
    validators: ValidatorMap,
}

impl ValidatorRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            validators: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Creates a registry holding every built-in validator.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        {
            let mut validators = registry.validators.write();
            for validator in builtins() {
                validators.insert(validator.name().to_string(), validator);
            }
        }
        registry
    }

    /// Registers a validator under its own [`name`](Validator::name).
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is already registered.
    /// Built-in validators cannot be replaced.
    pub fn register<V>(&self, validator: V) -> Result<(), RegistryError>
    where
        V: Validator + 'static,
    {
        self.register_arc(Arc::new(validator))
    }

    /// Registers an already shared validator.
    pub fn register_arc(&self, validator: Arc<dyn Validator>) -> Result<(), RegistryError> {
        let name = validator.name().to_string();
        let mut validators = self.validators.write();

        if validators.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        tracing::debug!(validator = %name, "registered validator");
        validators.insert(name, validator);
        Ok(())
    }

    /// Retrieves a validator by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Validator>> {
        self.validators.read().get(name).cloned()
    }

    /// Returns true if a validator is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.validators.read().contains_key(name)
    }

    /// Returns the registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.validators.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns the rule names used by `fields` that no validator answers to.
    ///
    /// The `nullable` marker is not a rule and is never reported.
    ///
    /// # Example
    ///
    /// ```rust
    /// use formguard::{Field, Fields, ValidatorRegistry};
    ///
    /// let fields: Fields = [
    ///     Field::new("name").unwrap().with_rules("required|string|slug"),
    ///     Field::new("bio").unwrap().with_rules("nullable|max:200"),
    /// ]
    /// .into_iter()
    /// .collect();
    ///
    /// let registry = ValidatorRegistry::with_builtins();
    /// assert_eq!(registry.unresolved(&fields), vec!["slug"]);
    /// ```
    pub fn unresolved(&self, fields: &Fields) -> Vec<String> {
        let validators = self.validators.read();
        let mut unresolved: Vec<String> = fields
            .iter()
            .flat_map(|(_, field)| field.rules())
            .map(|rule| rule.name())
            .filter(|name| !validators.contains_key(*name))
            .map(str::to_string)
            .collect();

        unresolved.sort();
        unresolved.dedup();
        unresolved
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl Clone for ValidatorRegistry {
    fn clone(&self) -> Self {
        Self {
            validators: Arc::clone(&self.validators),
        }
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a validator with a name that already exists.
    #[error("validator '{0}' already registered")]
    DuplicateName(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuleError;
    use crate::validation::Context;

    struct Named(&'static str);

    impl Validator for Named {
        fn validate(&self, _ctx: &mut Context<'_>) -> Result<bool, RuleError> {
            Ok(true)
        }

        fn name(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn test_builtins_are_registered() {
        let registry = ValidatorRegistry::with_builtins();
        for name in ["required", "min", "max", "between", "size", "same", "bool", "object"] {
            assert!(registry.contains(name), "missing {}", name);
        }
        assert!(!registry.contains("nullable"));
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let registry = ValidatorRegistry::new();
        registry.register(Named("slug")).unwrap();
        let err = registry.register(Named("slug")).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName(ref n) if n == "slug"));
    }

    #[test]
    fn test_builtins_cannot_be_replaced() {
        let registry = ValidatorRegistry::with_builtins();
        assert!(registry.register(Named("required")).is_err());
    }

    #[test]
    fn test_clones_share_storage() {
        let registry = ValidatorRegistry::new();
        let clone = registry.clone();
        clone.register(Named("custom")).unwrap();
        assert!(registry.get("custom").is_some());
        assert_eq!(registry.names(), vec!["custom"]);
    }
}
