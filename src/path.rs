//! Field paths for locating values in nested data trees.
//!
//! This module provides [`FieldPath`] and [`PathSegment`] types. Declared fields
//! are parsed from dotted names (`user.email`, `items[0].id`) and may contain
//! wildcard segments (`tags.*`, `items[].id`) that match every element of an
//! array. Paths produced by the locator are always concrete.

use std::fmt::{self, Display};
use std::str::FromStr;

/// A segment of a field path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object key (`user`, `email`)
    Field(String),
    /// An array position (`[0]`)
    Index(usize),
    /// Every element of an array (`*`, `[]` or `[*]`)
    Wildcard,
}

impl PathSegment {
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    pub fn index(position: usize) -> Self {
        PathSegment::Index(position)
    }
}

/// Errors produced when parsing a malformed field path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("field path is empty")]
    Empty,

    #[error("empty segment in field path '{0}'")]
    EmptySegment(String),

    #[error("unclosed bracket in field path '{0}'")]
    UnclosedBracket(String),

    #[error("invalid index '{index}' in field path '{path}'")]
    InvalidIndex { path: String, index: String },

    #[error("field path '{0}' contains a wildcard where a concrete path is required")]
    UnexpectedWildcard(String),
}

/// A path to a value in a data tree.
///
/// `FieldPath` represents locations like `items[0].id` and provides
/// methods for building paths incrementally.
///
/// # Example
///
/// ```rust
/// use formguard::FieldPath;
///
/// let path: FieldPath = "items.*.id".parse().unwrap();
/// assert!(path.has_wildcard());
///
/// let concrete = FieldPath::root()
///     .push_field("items")
///     .push_index(0)
///     .push_field("id");
///
/// assert_eq!(concrete.to_string(), "items[0].id");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Creates an empty path representing the root of the data tree.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from a single field segment.
    pub fn from_field(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Field(name.into())],
        }
    }

    /// Parses a dotted field name.
    ///
    /// Segments are separated by `.`. A segment may be followed by bracket
    /// groups: `[n]` indexes an array, `[]` and `[*]` are wildcards. A segment
    /// made of a single `*` is also a wildcard.
    ///
    /// # Errors
    ///
    /// Returns a [`PathError`] for empty names, empty segments, unclosed
    /// brackets or non-numeric indexes.
    pub fn parse(name: &str) -> Result<Self, PathError> {
        if name.is_empty() {
            return Err(PathError::Empty);
        }

        let mut segments = Vec::new();
        for part in name.split('.') {
            if part == "*" {
                segments.push(PathSegment::Wildcard);
                continue;
            }

            let (head, mut rest) = match part.find('[') {
                Some(pos) => part.split_at(pos),
                None => (part, ""),
            };
            if head.is_empty() {
                return Err(PathError::EmptySegment(name.to_string()));
            }
            segments.push(PathSegment::Field(head.to_string()));

            while !rest.is_empty() {
                let close = rest
                    .find(']')
                    .ok_or_else(|| PathError::UnclosedBracket(name.to_string()))?;
                let inner = &rest[1..close];
                match inner {
                    "" | "*" => segments.push(PathSegment::Wildcard),
                    _ => {
                        let index = inner.parse::<usize>().map_err(|_| PathError::InvalidIndex {
                            path: name.to_string(),
                            index: inner.to_string(),
                        })?;
                        segments.push(PathSegment::Index(index));
                    }
                }
                rest = &rest[close + 1..];
                if !rest.is_empty() && !rest.starts_with('[') {
                    return Err(PathError::UnclosedBracket(name.to_string()));
                }
            }
        }

        Ok(Self { segments })
    }

    /// Returns a copy of this path extended by an object key.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        self.push(PathSegment::Field(name.into()))
    }

    /// Returns a copy of this path extended by an array position.
    pub fn push_index(&self, index: usize) -> Self {
        self.push(PathSegment::Index(index))
    }

    /// Returns a new path with a wildcard segment appended.
    pub fn push_wildcard(&self) -> Self {
        self.push(PathSegment::Wildcard)
    }

    /// Returns a new path with `segment` appended.
    pub fn push(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// Returns a new path made of this path followed by every segment of `other`.
    pub fn join(&self, other: &FieldPath) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }

    /// Returns true if any segment is a wildcard.
    pub fn has_wildcard(&self) -> bool {
        self.segments.contains(&PathSegment::Wildcard)
    }

    /// The root path designates the whole tree.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterates over the segments from the root down.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the path of the enclosing container, `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        self.segments.split_last().map(|(_, init)| Self {
            segments: init.to_vec(),
        })
    }

    /// Returns the final segment, `None` for the root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldPath::parse(s)
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            let name = match segment {
                PathSegment::Index(position) => {
                    write!(f, "[{}]", position)?;
                    continue;
                }
                PathSegment::Field(name) => name.as_str(),
                PathSegment::Wildcard => "*",
            };
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}
