//! Field declarations.

use crate::path::{FieldPath, PathError};

use super::rule::{Rule, NULLABLE, REQUIRED};

/// A declared validation target.
///
/// A field binds an ordered list of [`Rule`]s to a path in the data tree. Its
/// `required` and `nullable` flags are derived from the rules as they are
/// added and cached on the field.
///
/// Nested fields are declared relative to their parent with [`Field::object`]
/// (keys of an object) or [`Field::elements`] (every element of an array).
///
/// # Example
///
/// ```rust
/// use formguard::Field;
///
/// let field = Field::new("email").unwrap().with_rules("required|nullable|max:255");
///
/// assert!(field.is_required());
/// assert!(field.is_nullable());
/// assert_eq!(field.rules().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    path: FieldPath,
    rules: Vec<Rule>,
    nullable: bool,
    required: bool,
    children: Vec<Field>,
}

impl Field {
    /// Creates a field from a dotted path such as `user.email` or `items.*.id`.
    ///
    /// # Errors
    ///
    /// Returns a [`PathError`] if the path is malformed.
    pub fn new(path: &str) -> Result<Self, PathError> {
        Ok(Self::at(FieldPath::parse(path)?))
    }

    /// Creates a field from an already parsed path.
    pub fn at(path: FieldPath) -> Self {
        Self {
            path,
            rules: Vec::new(),
            nullable: false,
            required: false,
            children: Vec::new(),
        }
    }

    /// Appends a rule.
    ///
    /// `nullable` is a marker rather than a validator: it only sets the flag.
    pub fn rule(mut self, rule: Rule) -> Self {
        match rule.name() {
            NULLABLE => self.nullable = true,
            name => {
                if name == REQUIRED {
                    self.required = true;
                }
                self.rules.push(rule);
            }
        }
        self
    }

    /// Appends rules from a `|`-separated declaration (`required|min:3`).
    ///
    /// Patterns containing `|` must be added with [`Field::rule`] instead.
    pub fn with_rules(self, declaration: &str) -> Self {
        declaration
            .split('|')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .fold(self, |field, part| field.rule(Rule::parse(part)))
    }

    /// Marks the field as accepting an explicit null.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Declares nested fields for the keys of this object field.
    pub fn object(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        let prefix = self.path.clone();
        self.children
            .extend(fields.into_iter().map(|child| child.rebase(&prefix)));
        self
    }

    /// Declares nested fields for every element of this array field.
    ///
    /// A child declared at `id` under `items` validates `items.*.id`.
    pub fn elements(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        let prefix = self.path.push_wildcard();
        self.children
            .extend(fields.into_iter().map(|child| child.rebase(&prefix)));
        self
    }

    fn rebase(mut self, prefix: &FieldPath) -> Self {
        self.path = prefix.join(&self.path);
        self.children = self
            .children
            .into_iter()
            .map(|child| child.rebase(prefix))
            .collect();
        self
    }

    /// Returns the declared path.
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Returns the rules in declaration order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns true if a `required` rule is declared.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns true if the field accepts an explicit null.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub(crate) fn take_children(&mut self) -> Vec<Field> {
        std::mem::take(&mut self.children)
    }
}
