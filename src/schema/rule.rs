//! Rule declarations.

use std::fmt::{self, Display};

/// Name of the rule that makes a field required.
pub const REQUIRED: &str = "required";

/// Name of the marker that lets a required field hold an explicit null.
pub const NULLABLE: &str = "nullable";

/// Rules whose parameter is taken verbatim instead of being split on commas.
const UNSPLIT: &[&str] = &["regex"];

/// A named validator reference with its raw parameters.
///
/// Parameters stay unparsed strings: each validator interprets its own on use,
/// and a parameter it cannot interpret is a fatal configuration error.
///
/// # Example
///
/// ```rust
/// use formguard::Rule;
///
/// let rule = Rule::parse("between:1,5");
/// assert_eq!(rule.name(), "between");
/// assert_eq!(rule.params(), ["1", "5"]);
///
/// let rule = Rule::new("in", ["a", "b"]);
/// assert_eq!(rule.to_string(), "in:a,b");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    name: String,
    params: Vec<String>,
}

impl Rule {
    /// Creates a rule with explicit parameters.
    pub fn new<I, S>(name: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a rule without parameters.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    /// Parses a `name:param1,param2` declaration.
    ///
    /// Everything after the first `:` is split on `,`, except for `regex`
    /// whose pattern is kept whole.
    pub fn parse(declaration: &str) -> Self {
        let declaration = declaration.trim();
        match declaration.split_once(':') {
            None => Self::named(declaration),
            Some((name, params)) if UNSPLIT.contains(&name) => Self::new(name, [params]),
            Some((name, params)) => Self::new(name, params.split(',')),
        }
    }

    /// Returns the validator name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw parameters.
    pub fn params(&self) -> &[String] {
        &self.params
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.params.is_empty() {
            write!(f, ":{}", self.params.join(","))?;
        }
        Ok(())
    }
}
