//! Core type definitions for the idea graph

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

/// Caller-supplied unique identifier for an idea node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        NodeId(s)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId(s.to_string())
    }
}

impl From<&NodeId> for NodeId {
    fn from(id: &NodeId) -> Self {
        id.clone()
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets maps keyed by NodeId be queried with a plain &str
impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Deref for NodeId {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

/// Identity of an edge: the ordered (source, target) pair.
///
/// Each ordered pair has exactly one edge slot, so `a -> b` and `b -> a` are
/// distinct edges while a second `a -> b` replaces the first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct EdgeId {
    pub source: NodeId,
    pub target: NodeId,
}

impl EdgeId {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        EdgeId {
            source: source.into(),
            target: target.into(),
        }
    }

    /// The same pair in the opposite direction
    pub fn reversed(&self) -> Self {
        EdgeId {
            source: self.target.clone(),
            target: self.source.clone(),
        }
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.source, self.target)
    }
}

/// Relationship type between two ideas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationType {
    /// Directed parent -> child link; at most one parent per node
    ParentChild,
    Related,
    Supports,
    Contradicts,
}

impl RelationType {
    pub fn is_hierarchical(self) -> bool {
        matches!(self, RelationType::ParentChild)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RelationType::ParentChild => "parent_child",
            RelationType::Related => "related",
            RelationType::Supports => "supports",
            RelationType::Contradicts => "contradicts",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
