//! Resolution of field paths against a data tree.
//!
//! [`locate`] resolves one concrete path; [`locate_all`] expands wildcard
//! segments into every matching concrete path, in the tree's element order.
//! Neither ever fails on data: missing or mis-shaped intermediate values simply
//! produce a [`Located`] with `found == false`.

use crate::path::{FieldPath, PathError, PathSegment};
use crate::value::{Map, Value};

static NULL: Value = Value::Null;

/// The container holding a located value.
#[derive(Debug, Clone, Copy)]
pub enum Parent<'a> {
    Object(&'a Map),
    Array(&'a [Value]),
}

impl<'a> Parent<'a> {
    /// Returns the container view of `value`, if it is an object or an array.
    pub fn of(value: &'a Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Parent::Object(map)),
            Value::Array(items) => Some(Parent::Array(items)),
            _ => None,
        }
    }

    /// Looks up a single non-wildcard segment.
    ///
    /// Arrays accept both index segments and purely numeric field names
    /// (`items.0`); objects accept index segments as string keys.
    pub fn get(&self, segment: &PathSegment) -> Option<&'a Value> {
        match (*self, segment) {
            (Parent::Object(map), PathSegment::Field(name)) => map.get(name),
            (Parent::Object(map), PathSegment::Index(i)) => map.get(&i.to_string()),
            (Parent::Array(items), PathSegment::Index(i)) => items.get(*i),
            (Parent::Array(items), PathSegment::Field(name)) => {
                name.parse::<usize>().ok().and_then(|i| items.get(i))
            }
            (_, PathSegment::Wildcard) => None,
        }
    }
}

/// The outcome of resolving one concrete path.
#[derive(Debug, Clone)]
pub struct Located<'a> {
    /// The container of the final segment, when every intermediate segment resolved.
    pub parent: Option<Parent<'a>>,
    /// The value, when found.
    pub value: Option<&'a Value>,
    /// The concrete path (wildcards replaced by indexes).
    pub path: FieldPath,
    pub found: bool,
}

impl<'a> Located<'a> {
    fn missing(path: FieldPath) -> Self {
        Self {
            parent: None,
            value: None,
            path,
            found: false,
        }
    }

    /// Returns the located value, or `Null` when nothing was found.
    pub fn value_or_null(&self) -> &'a Value {
        self.value.unwrap_or(&NULL)
    }
}

/// Resolves a concrete path against `tree`.
///
/// # Errors
///
/// Returns [`PathError::UnexpectedWildcard`] if `path` contains a wildcard;
/// use [`locate_all`] to expand those.
///
/// # Example
///
/// ```rust
/// use formguard::{locator, FieldPath, Value};
/// use serde_json::json;
///
/// let tree = Value::from(json!({"user": {"name": "Alice"}})).into_object().unwrap();
///
/// let found = locator::locate(&"user.name".parse().unwrap(), &tree).unwrap();
/// assert!(found.found);
/// assert_eq!(found.value, Some(&Value::from("Alice")));
///
/// let missing = locator::locate(&"user.email".parse().unwrap(), &tree).unwrap();
/// assert!(!missing.found);
/// assert!(missing.parent.is_some());
/// ```
pub fn locate<'a>(path: &FieldPath, tree: &'a Map) -> Result<Located<'a>, PathError> {
    if path.has_wildcard() {
        return Err(PathError::UnexpectedWildcard(path.to_string()));
    }
    Ok(locate_all(path, tree)
        .pop()
        .unwrap_or_else(|| Located::missing(path.clone())))
}

/// Resolves `path` against `tree`, expanding every wildcard segment.
///
/// A wildcard over an array yields one result per element, in order. A
/// wildcard over a missing or non-array value yields nothing, since there is
/// nothing to enumerate. A missing value that does not sit behind an
/// unexpandable wildcard yields a single result with `found == false`.
///
/// For a path without wildcards, exactly one result is returned (none for the
/// root path).
pub fn locate_all<'a>(path: &FieldPath, tree: &'a Map) -> Vec<Located<'a>> {
    let segments: Vec<&PathSegment> = path.segments().collect();
    let mut out = Vec::new();
    expand(Parent::Object(tree), &segments, FieldPath::root(), &mut out);
    tracing::trace!(path = %path, matches = out.len(), "expanded field path");
    out
}

fn expand<'a>(
    container: Parent<'a>,
    segments: &[&PathSegment],
    built: FieldPath,
    out: &mut Vec<Located<'a>>,
) {
    let Some((segment, rest)) = segments.split_first() else {
        return;
    };

    match segment {
        PathSegment::Wildcard => {
            if let Parent::Array(items) = container {
                for (i, item) in items.iter().enumerate() {
                    step(container, Some(item), built.push_index(i), rest, out);
                }
            }
        }
        segment => {
            let value = container.get(segment);
            step(container, value, built.push((*segment).clone()), rest, out);
        }
    }
}

fn step<'a>(
    parent: Parent<'a>,
    value: Option<&'a Value>,
    path: FieldPath,
    rest: &[&PathSegment],
    out: &mut Vec<Located<'a>>,
) {
    if rest.is_empty() {
        out.push(Located {
            parent: Some(parent),
            value,
            path,
            found: value.is_some(),
        });
        return;
    }

    match value.and_then(Parent::of) {
        Some(child) => expand(child, rest, path, out),
        None if rest.contains(&&PathSegment::Wildcard) => {}
        None => {
            let path = rest
                .iter()
                .fold(path, |acc, segment| acc.push((*segment).clone()));
            out.push(Located::missing(path));
        }
    }
}

/// Replaces the value at a concrete, existing path.
///
/// Returns false, leaving the tree untouched, when the path does not resolve.
/// The tree's shape never changes: no key or element is created.
pub fn replace(tree: &mut Map, path: &FieldPath, value: Value) -> bool {
    let mut segments = path.segments();
    let Some(first) = segments.next() else {
        return false;
    };
    let mut slot = match map_child_mut(tree, first) {
        Some(slot) => slot,
        None => return false,
    };
    for segment in segments {
        slot = match child_mut(slot, segment) {
            Some(next) => next,
            None => return false,
        };
    }
    *slot = value;
    true
}

fn map_child_mut<'a>(map: &'a mut Map, segment: &PathSegment) -> Option<&'a mut Value> {
    match segment {
        PathSegment::Field(name) => map.get_mut(name),
        PathSegment::Index(i) => map.get_mut(&i.to_string()),
        PathSegment::Wildcard => None,
    }
}

fn child_mut<'a>(value: &'a mut Value, segment: &PathSegment) -> Option<&'a mut Value> {
    match (value, segment) {
        (Value::Object(map), segment) => map_child_mut(map, segment),
        (Value::Array(items), PathSegment::Index(i)) => items.get_mut(*i),
        (Value::Array(items), PathSegment::Field(name)) => {
            name.parse::<usize>().ok().and_then(|i| items.get_mut(i))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree(json: serde_json::Value) -> Map {
        Value::from(json).into_object().unwrap()
    }

    fn path(s: &str) -> FieldPath {
        s.parse().unwrap()
    }

    #[test]
    fn test_locate_top_level() {
        let data = tree(json!({"name": "Alice"}));
        let located = locate(&path("name"), &data).unwrap();
        assert!(located.found);
        assert_eq!(located.value, Some(&Value::from("Alice")));
        assert!(matches!(located.parent, Some(Parent::Object(_))));
    }

    #[test]
    fn test_locate_wrong_shape() {
        let data = tree(json!({"name": "Alice"}));
        let located = locate(&path("name.first"), &data).unwrap();
        assert!(!located.found);
        assert!(located.parent.is_none());
        assert_eq!(located.path.to_string(), "name.first");
    }

    #[test]
    fn test_locate_rejects_wildcards() {
        let data = tree(json!({}));
        assert!(matches!(
            locate(&path("a.*"), &data),
            Err(PathError::UnexpectedWildcard(_))
        ));
    }

    #[test]
    fn test_numeric_field_indexes_arrays() {
        let data = tree(json!({"items": [10, 20]}));
        let located = locate(&path("items.1"), &data).unwrap();
        assert_eq!(located.value, Some(&Value::from(20i64)));
    }

    #[test]
    fn test_replace_existing_leaf() {
        let mut data = tree(json!({"items": [{"ok": "yes"}]}));
        assert!(replace(&mut data, &path("items[0].ok"), Value::from(true)));
        assert_eq!(Value::Object(data).to_json(), json!({"items": [{"ok": true}]}));
    }

    #[test]
    fn test_replace_never_creates() {
        let mut data = tree(json!({"items": []}));
        assert!(!replace(&mut data, &path("items[0]"), Value::from(true)));
        assert!(!replace(&mut data, &path("missing"), Value::from(true)));
        assert_eq!(Value::Object(data).to_json(), json!({"items": []}));
    }
}
