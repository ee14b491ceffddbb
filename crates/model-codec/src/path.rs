//! Field paths used to locate errors inside nested payloads.
//!
//! Paths render as RFC 6901 JSON pointers, e.g. `/filters/must/0/field`.

use std::fmt;

/// One step into a payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A record field, a map key or a wire alias.
    Key(String),
    /// A sequence element.
    Index(usize),
}

/// Location of a value relative to the root record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path extended by a key segment.
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.into()));
        Self { segments }
    }

    /// Returns a new path extended by an index segment.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Name of the innermost key segment, if any.
    pub fn last_key(&self) -> Option<&str> {
        self.segments.iter().rev().find_map(|s| match s {
            PathSegment::Key(k) => Some(k.as_str()),
            PathSegment::Index(_) => None,
        })
    }

    /// Formats the path as a JSON pointer. The root path is the empty string.
    pub fn to_pointer(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            out.push('/');
            match segment {
                PathSegment::Key(k) => out.push_str(&escape_component(k)),
                PathSegment::Index(i) => out.push_str(&i.to_string()),
            }
        }
        out
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("<root>")
        } else {
            f.write_str(&self.to_pointer())
        }
    }
}

/// Escapes one JSON Pointer token component.
fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_formatting() {
        let p = FieldPath::root().key("filters").key("must").index(2).key("a/b~c");
        assert_eq!(p.to_pointer(), "/filters/must/2/a~1b~0c");
        assert_eq!(p.last_key(), Some("a/b~c"));
    }

    #[test]
    fn root_display() {
        assert_eq!(FieldPath::root().to_string(), "<root>");
        assert_eq!(FieldPath::root().to_pointer(), "");
        assert_eq!(FieldPath::root().key("topic_id").to_string(), "/topic_id");
    }
}
