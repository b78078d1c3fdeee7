//! Idea node implementation
//!
//! A node carries its display attributes plus a cache of the relationships
//! the store holds for it. The cache (`relationships`, `parent_id`) is only
//! written by [`GraphStore`](super::GraphStore); callers read it through
//! accessors and change display attributes through [`NodeUpdate`].

use super::types::{NodeId, RelationType};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Bookkeeping attached to every idea
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeMetadata {
    pub created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    /// How sure the idea extractor is about this idea
    pub confidence: f64,
    /// How often the idea came up
    pub frequency: u32,
}

impl Default for NodeMetadata {
    fn default() -> Self {
        let now = Utc::now();
        NodeMetadata {
            created: now,
            last_updated: now,
            confidence: 1.0,
            frequency: 1,
        }
    }
}

/// Cached view of one edge from a node's perspective
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelationshipDescriptor {
    #[serde(rename = "type")]
    pub relation_type: RelationType,
    pub strength: f64,
    pub created: DateTime<Utc>,
}

/// One row of [`GraphStore::get_relationships`](super::GraphStore::get_relationships)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipView {
    pub node_id: NodeId,
    #[serde(rename = "type")]
    pub relation_type: RelationType,
    pub strength: f64,
}

/// An idea in the brainstorm graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdeaNode {
    id: NodeId,

    /// Display label
    pub label: String,

    /// Depth in the idea hierarchy as assigned by the caller
    pub level: i32,

    /// Weight used to size the node when rendered
    pub priority: f64,

    /// Optional display colour (e.g. "#33aa55")
    #[serde(default)]
    pub colour: Option<String>,

    /// Chat messages that contributed to this idea
    #[serde(default)]
    pub message_ids: Vec<String>,

    pub metadata: NodeMetadata,

    #[serde(default)]
    parent_id: Option<NodeId>,

    #[serde(default)]
    relationships: IndexMap<NodeId, RelationshipDescriptor>,
}

impl IdeaNode {
    /// Create a root idea with level 0 and priority 1
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>) -> Self {
        IdeaNode {
            id: id.into(),
            label: label.into(),
            level: 0,
            priority: 1.0,
            colour: None,
            message_ids: Vec::new(),
            metadata: NodeMetadata::default(),
            parent_id: None,
            relationships: IndexMap::new(),
        }
    }

    pub fn with_level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_colour(mut self, colour: impl Into<String>) -> Self {
        self.colour = Some(colour.into());
        self
    }

    pub fn with_message_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.message_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_metadata(mut self, metadata: NodeMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn parent_id(&self) -> Option<&NodeId> {
        self.parent_id.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Relationship cache keyed by the neighbor's id
    pub fn relationships(&self) -> &IndexMap<NodeId, RelationshipDescriptor> {
        &self.relationships
    }

    pub fn relationship(&self, other: &NodeId) -> Option<&RelationshipDescriptor> {
        self.relationships.get(other)
    }

    /// Ids of the hierarchical children recorded on this node
    pub fn children(&self) -> impl Iterator<Item = &NodeId> + '_ {
        self.relationships
            .iter()
            .filter(|(_, rel)| rel.relation_type.is_hierarchical())
            .map(|(id, _)| id)
    }

    pub(crate) fn has_relationship_cache(&self) -> bool {
        self.parent_id.is_some() || !self.relationships.is_empty()
    }

    pub(crate) fn clear_relationship_cache(&mut self) {
        self.parent_id = None;
        self.relationships.clear();
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent_id = parent;
    }

    pub(crate) fn cache_relationship(&mut self, other: NodeId, descriptor: Option<RelationshipDescriptor>) {
        match descriptor {
            Some(descriptor) => {
                self.relationships.insert(other, descriptor);
            }
            None => {
                self.relationships.shift_remove(&other);
            }
        }
    }
}

/// Partial update of an idea's display attributes.
///
/// Fields left as `None` are untouched. The relationship cache and parent
/// link are not part of it; they change only through relationship
/// operations on the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodeUpdate {
    pub label: Option<String>,
    pub level: Option<i32>,
    pub priority: Option<f64>,
    pub colour: Option<String>,
    pub message_ids: Option<Vec<String>>,
    pub metadata: Option<NodeMetadata>,
}

impl NodeUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn level(mut self, level: i32) -> Self {
        self.level = Some(level);
        self
    }

    pub fn priority(mut self, priority: f64) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn colour(mut self, colour: impl Into<String>) -> Self {
        self.colour = Some(colour.into());
        self
    }

    pub fn message_ids(mut self, ids: Vec<String>) -> Self {
        self.message_ids = Some(ids);
        self
    }

    pub fn metadata(mut self, metadata: NodeMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == NodeUpdate::default()
    }

    /// Shallow-merge the supplied fields onto `node`
    pub fn apply_to(self, node: &mut IdeaNode) {
        if let Some(label) = self.label {
            node.label = label;
        }
        if let Some(level) = self.level {
            node.level = level;
        }
        if let Some(priority) = self.priority {
            node.priority = priority;
        }
        if let Some(colour) = self.colour {
            node.colour = Some(colour);
        }
        if let Some(message_ids) = self.message_ids {
            node.message_ids = message_ids;
        }
        if let Some(metadata) = self.metadata {
            node.metadata = metadata;
        }
    }
}
