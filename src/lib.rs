//! Brainstorm Graph
//!
//! An in-memory graph of ideas captured during a brainstorming session.
//! Ideas form a forest through parent/child links and are cross-linked by
//! symmetric `related`, `supports` and `contradicts` relationships.
//!
//! # Architecture
//!
//! - [`graph`]: the data model and the [`GraphStore`] that owns it. Every
//!   mutation keeps the per-node relationship caches and the root set in
//!   step with the edge map, then publishes a [`GraphUpdateEvent`].
//! - [`algo`]: subtree, shortest path and neighborhood queries, run by the
//!   `brainstorm-graph-algorithms` kernels over a dense view of the store.
//! - [`vis`]: a flattened node/edge projection for network renderers.
//!
//! The store is single-owner and performs no locking. Share it behind one
//! lock (`Arc<RwLock<GraphStore>>`) when several tasks need it.
//!
//! ## Example Usage
//!
//! ```rust
//! use brainstorm_graph::{GraphStore, IdeaNode, RelationType};
//!
//! let mut store = GraphStore::new();
//! store.add_node(IdeaNode::new("energy", "Energy")).unwrap();
//! store.add_node(IdeaNode::new("solar", "Solar panels")).unwrap();
//! store.add_node(IdeaNode::new("wind", "Wind farms")).unwrap();
//!
//! store.add_relationship("energy", "solar", RelationType::ParentChild, 1.0).unwrap();
//! store.add_relationship("energy", "wind", RelationType::ParentChild, 1.0).unwrap();
//! store.add_relationship("solar", "wind", RelationType::Supports, 0.6).unwrap();
//!
//! assert_eq!(store.get_root_nodes().len(), 1);
//! assert_eq!(store.get_subtree("energy").len(), 3);
//! assert_eq!(store.find_path("energy", "wind").len(), 2);
//!
//! let vis = store.get_vis_network_data();
//! assert_eq!(vis.edges.len(), 3);
//! ```

pub mod algo;
pub mod graph;
pub mod vis;

pub use graph::{
    ChangeNotifier, Edge, EdgeId, ErrorKind, GraphError, GraphResult, GraphStore,
    GraphUpdateEvent, IdeaNode, ListenerId, NodeId, NodeMetadata, NodeUpdate, RelationType,
    RelationshipView,
};
pub use vis::{VisConfig, VisEdge, VisNetworkData, VisNode};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
