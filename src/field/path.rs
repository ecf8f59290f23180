//! # Field Paths
//!
//! Structured locators into a validated document, rendered as `a.b[3].c`.
//!
//! A [`FieldPath`] is a persistent cons-list: every child shares its parent
//! through an [`Arc`], so descending into a nested field never copies or
//! mutates the path the caller holds.

use std::fmt;
use std::sync::Arc;

/// One step of a field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Named child field (`.name`)
    Child(String),
    /// List element (`[3]`)
    Index(usize),
    /// Map entry (`[key]`)
    Key(String),
}

#[derive(Debug, PartialEq, Eq)]
struct Node {
    parent: FieldPath,
    segment: Segment,
}

/// Immutable, cheaply cloneable field path
///
/// The empty path is a valid root: `FieldPath::root().child("spec")` renders
/// as `spec`, matching how callers without a document prefix address fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(Option<Arc<Node>>);

impl FieldPath {
    /// Empty root path
    #[must_use]
    pub fn root() -> Self {
        Self(None)
    }

    /// Path starting at a named field
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::root().child(name)
    }

    /// Build a path from a dotted list of names, e.g. `["spec", "provider"]`
    #[must_use]
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .fold(Self::root(), |path, name| path.child(name))
    }

    fn push(&self, segment: Segment) -> Self {
        Self(Some(Arc::new(Node {
            parent: self.clone(),
            segment,
        })))
    }

    /// Descend into a named field
    #[must_use]
    pub fn child(&self, name: impl Into<String>) -> Self {
        self.push(Segment::Child(name.into()))
    }

    /// Descend into a list element
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        self.push(Segment::Index(index))
    }

    /// Descend into a map entry
    #[must_use]
    pub fn key(&self, key: impl Into<String>) -> Self {
        self.push(Segment::Key(key.into()))
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_none()
    }

    /// Segments from the root to the leaf
    #[must_use]
    pub fn segments(&self) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut current = self;
        while let Some(node) = &current.0 {
            segments.push(node.segment.clone());
            current = &node.parent;
        }
        segments.reverse();
        segments
    }

    /// Last segment, if any
    #[must_use]
    pub fn leaf(&self) -> Option<&Segment> {
        self.0.as_ref().map(|node| &node.segment)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments().iter().enumerate() {
            match segment {
                Segment::Child(name) if i == 0 => write!(f, "{name}")?,
                Segment::Child(name) => write!(f, ".{name}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
                Segment::Key(key) => write!(f, "[{key}]")?,
            }
        }
        Ok(())
    }
}
