//! In-memory idea graph storage
//!
//! The edge map is the source of truth for relationships. Each node keeps a
//! cache of the edges it takes part in (`relationships`, `parent_id`); every
//! mutation below rewrites that cache from the edge map for the node pair it
//! touched, so the two never drift apart.

use super::edge::Edge;
use super::event::{ChangeNotifier, GraphUpdateEvent, ListenerId};
use super::node::{IdeaNode, NodeUpdate, RelationshipDescriptor, RelationshipView};
use super::types::{EdgeId, NodeId, RelationType};
use indexmap::{IndexMap, IndexSet};
use thiserror::Error;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tracing::{debug, warn};

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Relationship {0} not found")]
    RelationshipNotFound(EdgeId),

    #[error("Node {0} already exists")]
    DuplicateNode(NodeId),
}

/// Coarse classification of [`GraphError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced node or edge does not exist
    NotFound,
    /// An add referenced a node id already present
    DuplicateKey,
}

impl GraphError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GraphError::NodeNotFound(_) | GraphError::RelationshipNotFound(_) => ErrorKind::NotFound,
            GraphError::DuplicateNode(_) => ErrorKind::DuplicateKey,
        }
    }
}

pub type GraphResult<T> = Result<T, GraphError>;

/// In-memory idea graph
///
/// - nodes: NodeId -> IdeaNode (insertion ordered)
/// - edges: (source, target) -> Edge (insertion ordered; enumeration order
///   drives traversal tie-breaks)
/// - root_nodes: ids of nodes without a parent
///
/// The store has no internal locking. Share it behind a single lock
/// (`Arc<RwLock<GraphStore>>`) when several tasks need it.
#[derive(Debug, Default)]
pub struct GraphStore {
    nodes: IndexMap<NodeId, IdeaNode>,
    edges: IndexMap<EdgeId, Edge>,
    root_nodes: IndexSet<NodeId>,
    notifier: ChangeNotifier,
}

impl GraphStore {
    /// Create a new empty graph store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that publishes to an existing notifier
    pub fn with_notifier(notifier: ChangeNotifier) -> Self {
        GraphStore {
            notifier,
            ..Self::default()
        }
    }

    /// Create a store whose change events are also forwarded to a channel,
    /// for consumers running on an async task
    pub fn with_event_channel() -> (Self, UnboundedReceiver<GraphUpdateEvent>) {
        let (tx, rx) = unbounded_channel();
        let store = Self::new();
        store.subscribe(move |event| {
            if tx.send(event.clone()).is_err() {
                debug!("Event channel closed, dropping {}", event.event_type());
            }
        });
        (store, rx)
    }

    /// Handle to the store's observer list
    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&GraphUpdateEvent) + Send + Sync + 'static,
    {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.notifier.unsubscribe(id)
    }

    // ============================================================
    // Node operations
    // ============================================================

    /// Insert a fully formed node.
    ///
    /// Relationships only come into existence through
    /// [`add_relationship`](Self::add_relationship); a node arriving with a
    /// populated relationship cache (e.g. a clone read from another store)
    /// has it dropped and enters the graph as a root.
    pub fn add_node(&mut self, mut node: IdeaNode) -> GraphResult<()> {
        if self.nodes.contains_key(node.id()) {
            return Err(GraphError::DuplicateNode(node.id().clone()));
        }

        if node.has_relationship_cache() {
            warn!(
                "Node {} arrived with {} cached relationship(s); edges must be added through the store",
                node.id(),
                node.relationships().len()
            );
            node.clear_relationship_cache();
        }

        let id = node.id().clone();
        if node.is_root() {
            self.root_nodes.insert(id.clone());
        }
        self.nodes.insert(id.clone(), node.clone());

        debug!("Added node {}", id);
        self.notifier.emit(&GraphUpdateEvent::NodeAdded(node));
        Ok(())
    }

    /// Shallow-merge `update` onto a node's display attributes
    pub fn update_node(&mut self, id: &str, update: NodeUpdate) -> GraphResult<()> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.into()))?;

        update.apply_to(node);
        let snapshot = node.clone();

        debug!("Updated node {}", id);
        self.notifier.emit(&GraphUpdateEvent::NodeUpdated(snapshot));
        Ok(())
    }

    /// Delete a node and every edge touching it.
    ///
    /// Children of the node are not deleted; they lose their parent and
    /// become roots. The removed node is returned detached from the graph.
    pub fn remove_node(&mut self, id: &str) -> GraphResult<IdeaNode> {
        let node_id = self.require_node(id)?;

        let mut neighbors: IndexSet<NodeId> = IndexSet::new();
        let edges_before = self.edges.len();
        self.edges.retain(|_, edge| match edge.other_endpoint(&node_id) {
            Some(other) => {
                neighbors.insert(other.clone());
                false
            }
            None => true,
        });
        let removed_edges = edges_before - self.edges.len();

        let mut node = self
            .nodes
            .shift_remove(&node_id)
            .ok_or_else(|| GraphError::NodeNotFound(node_id.clone()))?;
        self.root_nodes.shift_remove(&node_id);
        node.clear_relationship_cache();

        for other in neighbors.iter().filter(|other| **other != node_id) {
            if let Some(neighbor) = self.nodes.get_mut(other) {
                neighbor.cache_relationship(node_id.clone(), None);
                if neighbor.parent_id() == Some(&node_id) {
                    neighbor.set_parent(None);
                    self.root_nodes.insert(other.clone());
                }
            }
        }

        debug!("Removed node {} and {} edge(s)", node_id, removed_edges);
        self.notifier
            .emit(&GraphUpdateEvent::NodeRemoved { node_id });
        Ok(node)
    }

    /// Get a node by id
    pub fn get_node(&self, id: &str) -> Option<&IdeaNode> {
        self.nodes.get(id)
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// All nodes without a parent, in the order they became roots
    pub fn get_root_nodes(&self) -> Vec<&IdeaNode> {
        self.root_nodes
            .iter()
            .filter_map(|id| self.nodes.get(id))
            .collect()
    }

    /// Hierarchical children of a node, in edge order
    pub fn get_children(&self, id: &str) -> GraphResult<Vec<&IdeaNode>> {
        let node = self
            .nodes
            .get(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.into()))?;
        Ok(node
            .children()
            .filter_map(|child| self.nodes.get(child))
            .collect())
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &IdeaNode> + '_ {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ============================================================
    // Relationship operations
    // ============================================================

    /// Create (or replace) the edge `source -> target`.
    ///
    /// A hierarchical edge makes `source` the parent of `target`; if `target`
    /// already had another parent, that older parent edge is dropped first.
    pub fn add_relationship(
        &mut self,
        source: &str,
        target: &str,
        relation_type: RelationType,
        strength: f64,
    ) -> GraphResult<EdgeId> {
        let source = self.require_node(source)?;
        let target = self.require_node(target)?;

        if relation_type.is_hierarchical() {
            let previous_parent = self
                .nodes
                .get(&target)
                .and_then(|node| node.parent_id())
                .filter(|parent| **parent != source)
                .cloned();
            if let Some(previous_parent) = previous_parent {
                self.edges
                    .shift_remove(&EdgeId::new(&previous_parent, &target));
                self.sync_pair(&previous_parent, &target);
                debug!("Detached {} from previous parent {}", target, previous_parent);
            }
        }

        let edge = Edge::new(source.clone(), target.clone(), relation_type, strength);
        let edge_id = edge.id();
        self.edges.insert(edge_id.clone(), edge.clone());
        self.sync_pair(&source, &target);

        debug!("Added {} relationship {}", relation_type, edge_id);
        self.notifier.emit(&GraphUpdateEvent::RelationshipAdded(edge));
        Ok(edge_id)
    }

    /// Change the strength of the edge `source -> target`
    pub fn update_relationship_strength(
        &mut self,
        source: &str,
        target: &str,
        strength: f64,
    ) -> GraphResult<()> {
        let edge_id = EdgeId::new(source, target);
        let edge = self
            .edges
            .get_mut(&edge_id)
            .ok_or_else(|| GraphError::RelationshipNotFound(edge_id.clone()))?;

        edge.set_strength(strength);
        let snapshot = edge.clone();
        self.sync_pair(&edge_id.source, &edge_id.target);

        debug!("Updated relationship {} strength to {}", edge_id, strength);
        self.notifier
            .emit(&GraphUpdateEvent::RelationshipUpdated(snapshot));
        Ok(())
    }

    /// Delete the edge `source -> target`
    pub fn remove_relationship(&mut self, source: &str, target: &str) -> GraphResult<Edge> {
        let edge_id = EdgeId::new(source, target);
        let edge = self
            .edges
            .shift_remove(&edge_id)
            .ok_or_else(|| GraphError::RelationshipNotFound(edge_id.clone()))?;

        self.sync_pair(&edge_id.source, &edge_id.target);

        debug!("Removed relationship {}", edge_id);
        let EdgeId { source, target } = edge_id;
        self.notifier.emit(&GraphUpdateEvent::RelationshipRemoved {
            source_id: source,
            target_id: target,
        });
        Ok(edge)
    }

    /// Every relationship of a node as seen from that node.
    ///
    /// The node's own cache is listed first; a child additionally gets one
    /// `ParentChild` row pointing at its parent, reconstructed from the
    /// parent's side since the link is stored only there.
    pub fn get_relationships(&self, id: &str) -> GraphResult<Vec<RelationshipView>> {
        let node = self
            .nodes
            .get(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.into()))?;

        let mut relationships: Vec<RelationshipView> = node
            .relationships()
            .iter()
            .map(|(other, rel)| RelationshipView {
                node_id: other.clone(),
                relation_type: rel.relation_type,
                strength: rel.strength,
            })
            .collect();

        if let Some(parent_id) = node.parent_id() {
            let link = self
                .nodes
                .get(parent_id)
                .and_then(|parent| parent.relationship(node.id()));
            if let Some(link) = link {
                relationships.push(RelationshipView {
                    node_id: parent_id.clone(),
                    relation_type: RelationType::ParentChild,
                    strength: link.strength,
                });
            }
        }

        Ok(relationships)
    }

    /// Get the edge `source -> target`
    pub fn get_edge(&self, source: &str, target: &str) -> Option<&Edge> {
        self.edges.get(&EdgeId::new(source, target))
    }

    /// All edges in enumeration order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.values()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // ============================================================
    // Cache maintenance
    // ============================================================

    fn require_node(&self, id: &str) -> GraphResult<NodeId> {
        self.nodes
            .get_key_value(id)
            .map(|(key, _)| key.clone())
            .ok_or_else(|| GraphError::NodeNotFound(id.into()))
    }

    /// Rebuild the cache entries between `a` and `b` from the edge map.
    ///
    /// A node's entry for its neighbor comes from its own outgoing edge if
    /// there is one, otherwise from the neighbor's symmetric edge towards it.
    /// A hierarchical edge sets the target's parent.
    fn sync_pair(&mut self, a: &NodeId, b: &NodeId) {
        let forward = self.edges.get(&EdgeId::new(a, b));
        let backward = self.edges.get(&EdgeId::new(b, a));

        let a_entry = cached_descriptor(forward, backward);
        let b_entry = cached_descriptor(backward, forward);
        let a_is_parent_of_b = forward.is_some_and(Edge::is_hierarchical);
        let b_is_parent_of_a = backward.is_some_and(Edge::is_hierarchical);

        self.apply_cache(a, b, a_entry, b_is_parent_of_a);
        self.apply_cache(b, a, b_entry, a_is_parent_of_b);
    }

    fn apply_cache(
        &mut self,
        node_id: &NodeId,
        other: &NodeId,
        entry: Option<RelationshipDescriptor>,
        other_is_parent: bool,
    ) {
        let Some(node) = self.nodes.get_mut(node_id) else {
            return;
        };

        node.cache_relationship(other.clone(), entry);
        if other_is_parent {
            node.set_parent(Some(other.clone()));
            self.root_nodes.shift_remove(node_id);
        } else if node.parent_id() == Some(other) {
            node.set_parent(None);
            self.root_nodes.insert(node_id.clone());
        }
    }
}

fn cached_descriptor(own: Option<&Edge>, incoming: Option<&Edge>) -> Option<RelationshipDescriptor> {
    own.or_else(|| incoming.filter(|edge| !edge.is_hierarchical()))
        .map(|edge| RelationshipDescriptor {
            relation_type: edge.relation_type(),
            strength: edge.strength,
            created: edge.metadata.created,
        })
}
