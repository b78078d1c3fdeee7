//! Edge implementation for the idea graph
//!
//! An edge is a typed, weighted, directed connection between two idea nodes.
//! Parent/child links and symmetric links behave differently in the store
//! (only the parent records a hierarchical link, both ends record a symmetric
//! one), so the two shapes are separate variants of [`Relation`].

use super::types::{EdgeId, NodeId, RelationType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Non-hierarchical relationship kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymmetricKind {
    Related,
    Supports,
    Contradicts,
}

impl From<SymmetricKind> for RelationType {
    fn from(kind: SymmetricKind) -> Self {
        match kind {
            SymmetricKind::Related => RelationType::Related,
            SymmetricKind::Supports => RelationType::Supports,
            SymmetricKind::Contradicts => RelationType::Contradicts,
        }
    }
}

/// The endpoints of an edge together with its shape
#[derive(Debug, Clone, PartialEq)]
pub enum Relation {
    /// `parent -> child`; the child learns its parent through `parent_id`
    Hierarchical { parent: NodeId, child: NodeId },
    /// Recorded on both endpoints; direction only matters for path finding
    Symmetric {
        kind: SymmetricKind,
        source: NodeId,
        target: NodeId,
    },
}

impl Relation {
    pub fn new(source: NodeId, target: NodeId, relation_type: RelationType) -> Self {
        let kind = match relation_type {
            RelationType::ParentChild => {
                return Relation::Hierarchical {
                    parent: source,
                    child: target,
                }
            }
            RelationType::Related => SymmetricKind::Related,
            RelationType::Supports => SymmetricKind::Supports,
            RelationType::Contradicts => SymmetricKind::Contradicts,
        };
        Relation::Symmetric { kind, source, target }
    }

    /// Node the edge goes FROM
    pub fn source(&self) -> &NodeId {
        match self {
            Relation::Hierarchical { parent, .. } => parent,
            Relation::Symmetric { source, .. } => source,
        }
    }

    /// Node the edge goes TO
    pub fn target(&self) -> &NodeId {
        match self {
            Relation::Hierarchical { child, .. } => child,
            Relation::Symmetric { target, .. } => target,
        }
    }

    pub fn relation_type(&self) -> RelationType {
        match self {
            Relation::Hierarchical { .. } => RelationType::ParentChild,
            Relation::Symmetric { kind, .. } => (*kind).into(),
        }
    }

    pub fn is_hierarchical(&self) -> bool {
        matches!(self, Relation::Hierarchical { .. })
    }
}

/// Edge timestamps, independent of the nodes the edge connects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeMetadata {
    pub created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl EdgeMetadata {
    pub fn now() -> Self {
        let now = Utc::now();
        EdgeMetadata {
            created: now,
            last_updated: now,
        }
    }
}

/// A directed edge in the idea graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "EdgeRecord", from = "EdgeRecord")]
pub struct Edge {
    pub relation: Relation,
    pub strength: f64,
    pub metadata: EdgeMetadata,
}

impl Edge {
    /// Create a new edge stamped with the current time
    pub fn new(
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        relation_type: RelationType,
        strength: f64,
    ) -> Self {
        Edge {
            relation: Relation::new(source.into(), target.into(), relation_type),
            strength,
            metadata: EdgeMetadata::now(),
        }
    }

    pub fn id(&self) -> EdgeId {
        EdgeId::new(self.source(), self.target())
    }

    pub fn source(&self) -> &NodeId {
        self.relation.source()
    }

    pub fn target(&self) -> &NodeId {
        self.relation.target()
    }

    pub fn relation_type(&self) -> RelationType {
        self.relation.relation_type()
    }

    pub fn is_hierarchical(&self) -> bool {
        self.relation.is_hierarchical()
    }

    /// Check if this edge touches a node at either end
    pub fn touches(&self, node: &NodeId) -> bool {
        self.source() == node || self.target() == node
    }

    /// The endpoint opposite to `node`, if `node` is one of the endpoints
    pub fn other_endpoint(&self, node: &NodeId) -> Option<&NodeId> {
        if self.source() == node {
            Some(self.target())
        } else if self.target() == node {
            Some(self.source())
        } else {
            None
        }
    }

    pub(crate) fn set_strength(&mut self, strength: f64) {
        self.strength = strength;
        self.metadata.last_updated = Utc::now();
    }
}

/// Flat wire shape of an edge
#[derive(Serialize, Deserialize)]
struct EdgeRecord {
    #[serde(default, skip_deserializing)]
    id: String,
    source: NodeId,
    target: NodeId,
    #[serde(rename = "type")]
    relation_type: RelationType,
    strength: f64,
    metadata: EdgeMetadata,
}

impl From<Edge> for EdgeRecord {
    fn from(edge: Edge) -> Self {
        let id = edge.id().to_string();
        let relation_type = edge.relation_type();
        let (source, target) = match edge.relation {
            Relation::Hierarchical { parent, child } => (parent, child),
            Relation::Symmetric { source, target, .. } => (source, target),
        };
        EdgeRecord {
            id,
            source,
            target,
            relation_type,
            strength: edge.strength,
            metadata: edge.metadata,
        }
    }
}

impl From<EdgeRecord> for Edge {
    fn from(record: EdgeRecord) -> Self {
        Edge {
            relation: Relation::new(record.source, record.target, record.relation_type),
            strength: record.strength,
            metadata: record.metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_edge() {
        let edge = Edge::new("root", "child", RelationType::ParentChild, 1.0);

        assert_eq!(edge.id(), EdgeId::new("root", "child"));
        assert_eq!(edge.source(), &NodeId::new("root"));
        assert_eq!(edge.target(), &NodeId::new("child"));
        assert_eq!(edge.relation_type(), RelationType::ParentChild);
        assert!(edge.is_hierarchical());
        assert_eq!(edge.metadata.created, edge.metadata.last_updated);
    }

    #[test]
    fn test_relation_shapes() {
        let hier = Relation::new("p".into(), "c".into(), RelationType::ParentChild);
        assert!(matches!(hier, Relation::Hierarchical { .. }));

        let sym = Relation::new("a".into(), "b".into(), RelationType::Contradicts);
        assert_eq!(
            sym,
            Relation::Symmetric {
                kind: SymmetricKind::Contradicts,
                source: "a".into(),
                target: "b".into(),
            }
        );
        assert_eq!(sym.relation_type(), RelationType::Contradicts);
        assert_eq!(sym.source(), &NodeId::new("a"));
        assert_eq!(sym.target(), &NodeId::new("b"));
    }

    #[test]
    fn test_edge_endpoints() {
        let edge = Edge::new("a", "b", RelationType::Related, 0.5);

        assert!(edge.touches(&"a".into()));
        assert!(edge.touches(&"b".into()));
        assert!(!edge.touches(&"c".into()));
        assert_eq!(edge.other_endpoint(&"a".into()), Some(&NodeId::new("b")));
        assert_eq!(edge.other_endpoint(&"b".into()), Some(&NodeId::new("a")));
        assert_eq!(edge.other_endpoint(&"c".into()), None);
    }

    #[test]
    fn test_set_strength_touches_timestamp() {
        let mut edge = Edge::new("a", "b", RelationType::Supports, 0.5);
        let before = edge.metadata.last_updated;

        std::thread::sleep(std::time::Duration::from_millis(5));
        edge.set_strength(0.9);

        assert_eq!(edge.strength, 0.9);
        assert!(edge.metadata.last_updated > before);
        assert_eq!(edge.metadata.created, before);
    }

    #[test]
    fn test_edge_serializes_flat() {
        let edge = Edge::new("a", "b", RelationType::Contradicts, 2.0);
        let json = serde_json::to_value(&edge).unwrap();

        assert_eq!(json["id"], "a-b");
        assert_eq!(json["source"], "a");
        assert_eq!(json["target"], "b");
        assert_eq!(json["type"], "contradicts");
        assert_eq!(json["strength"], 2.0);

        let back: Edge = serde_json::from_value(json).unwrap();
        assert_eq!(back, edge);
    }
}
