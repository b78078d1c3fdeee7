//! Core idea graph implementation
//!
//! This module implements the brainstorm graph data model with:
//! - Idea nodes carrying display attributes and a relationship cache
//! - Directed, weighted edges that are either hierarchical or symmetric
//! - A root set of parentless nodes kept in sync with every mutation
//! - Synchronous change notification through [`ChangeNotifier`]

pub mod edge;
pub mod event;
pub mod node;
pub mod store;
pub mod types;

// Re-export main types
pub use edge::{Edge, EdgeMetadata, Relation, SymmetricKind};
pub use event::{ChangeNotifier, GraphUpdateEvent, ListenerId};
pub use node::{IdeaNode, NodeMetadata, NodeUpdate, RelationshipDescriptor, RelationshipView};
pub use store::{ErrorKind, GraphError, GraphResult, GraphStore};
pub use types::{EdgeId, NodeId, RelationType};
