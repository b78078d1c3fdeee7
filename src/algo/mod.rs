//! Graph algorithms module
//!
//! The traversal kernels live in the `brainstorm-graph-algorithms` crate and
//! run over a dense [`GraphView`]. This module is the adapter layer: it
//! projects the store into a view and exposes the traversals as store methods.

use crate::graph::{GraphStore, IdeaNode, NodeId};
use brainstorm_graph_algorithms::GraphView;

// Re-export algorithms
pub use brainstorm_graph_algorithms::{bfs, bounded_neighborhood, dfs_preorder, PathResult};

/// Which edges a view is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeFilter {
    /// Every edge, in enumeration order
    All,
    /// Parent -> child edges only
    Hierarchical,
}

/// Build a GraphView from the store for algorithm execution.
///
/// Nodes keep the store's insertion order and each node's successors keep the
/// store's edge enumeration order.
pub fn build_view(store: &GraphStore, filter: EdgeFilter) -> GraphView<NodeId> {
    let nodes = store.nodes().map(|node| node.id().clone());
    let edges = store
        .edges()
        .filter(|edge| filter == EdgeFilter::All || edge.is_hierarchical())
        .map(|edge| (edge.source().clone(), edge.target().clone()));

    GraphView::from_edges(nodes, edges)
}

impl GraphStore {
    /// The node `root` and everything below it, depth-first pre-order.
    ///
    /// Only parent -> child edges are followed. Unknown roots give an empty
    /// result.
    pub fn get_subtree(&self, root: &str) -> Vec<&IdeaNode> {
        if !self.has_node(root) {
            return Vec::new();
        }
        let view = build_view(self, EdgeFilter::Hierarchical);
        self.resolve(dfs_preorder(&view, &NodeId::new(root)))
    }

    /// Fewest-hop path from `start` to `end` following edges source -> target.
    ///
    /// Both endpoints are included. Empty if either endpoint is unknown or
    /// `end` is unreachable. Among equally short paths the one discovered
    /// first in edge enumeration order wins.
    pub fn find_path(&self, start: &str, end: &str) -> Vec<&IdeaNode> {
        if !self.has_node(start) || !self.has_node(end) {
            return Vec::new();
        }
        let view = build_view(self, EdgeFilter::All);
        match bfs(&view, &NodeId::new(start), &NodeId::new(end)) {
            Some(result) => self.resolve(result.path),
            None => Vec::new(),
        }
    }

    /// Every node within `degree` hops of `id` over any edge, in either
    /// direction, excluding `id` itself. Ordered by discovery.
    pub fn get_related_ideas(&self, id: &str, degree: usize) -> Vec<&IdeaNode> {
        if degree == 0 || !self.has_node(id) {
            return Vec::new();
        }
        let view = build_view(self, EdgeFilter::All);
        self.resolve(bounded_neighborhood(&view, &NodeId::new(id), degree))
    }

    fn resolve(&self, ids: Vec<NodeId>) -> Vec<&IdeaNode> {
        ids.iter().filter_map(|id| self.get_node(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::RelationType;

    fn ids(nodes: Vec<&IdeaNode>) -> Vec<&str> {
        nodes.into_iter().map(|n| n.id().as_str()).collect()
    }

    fn store_with(ids: &[&str]) -> GraphStore {
        let mut store = GraphStore::new();
        for id in ids {
            store.add_node(IdeaNode::new(*id, *id)).unwrap();
        }
        store
    }

    #[test]
    fn test_build_view_filters_edges() {
        let mut store = store_with(&["a", "b", "c"]);
        store.add_relationship("a", "b", RelationType::ParentChild, 1.0).unwrap();
        store.add_relationship("b", "c", RelationType::Related, 1.0).unwrap();

        let all = build_view(&store, EdgeFilter::All);
        assert_eq!(all.node_count, 3);
        assert_eq!(all.edge_count(), 2);

        let tree = build_view(&store, EdgeFilter::Hierarchical);
        assert_eq!(tree.node_count, 3);
        assert_eq!(tree.edge_count(), 1);
    }

    #[test]
    fn test_subtree_preorder() {
        let mut store = store_with(&["root", "a", "a1", "b", "x"]);
        store.add_relationship("root", "a", RelationType::ParentChild, 1.0).unwrap();
        store.add_relationship("root", "b", RelationType::ParentChild, 1.0).unwrap();
        store.add_relationship("a", "a1", RelationType::ParentChild, 1.0).unwrap();
        store.add_relationship("b", "x", RelationType::Related, 1.0).unwrap();

        assert_eq!(ids(store.get_subtree("root")), vec!["root", "a", "a1", "b"]);
        assert_eq!(ids(store.get_subtree("a1")), vec!["a1"]);
        assert!(store.get_subtree("ghost").is_empty());
    }

    #[test]
    fn test_find_path_is_directed() {
        let mut store = store_with(&["a", "b", "c"]);
        store.add_relationship("a", "b", RelationType::Supports, 1.0).unwrap();
        store.add_relationship("b", "c", RelationType::Supports, 1.0).unwrap();

        assert_eq!(ids(store.find_path("a", "c")), vec!["a", "b", "c"]);
        assert!(store.find_path("c", "a").is_empty());
        assert_eq!(ids(store.find_path("b", "b")), vec!["b"]);
        assert!(store.find_path("a", "ghost").is_empty());
    }

    #[test]
    fn test_find_path_tie_break_follows_edge_order() {
        let mut store = store_with(&["s", "m1", "m2", "t"]);
        store.add_relationship("s", "m2", RelationType::Related, 1.0).unwrap();
        store.add_relationship("s", "m1", RelationType::Related, 1.0).unwrap();
        store.add_relationship("m1", "t", RelationType::Related, 1.0).unwrap();
        store.add_relationship("m2", "t", RelationType::Related, 1.0).unwrap();

        assert_eq!(ids(store.find_path("s", "t")), vec!["s", "m2", "t"]);
    }

    #[test]
    fn test_related_ideas_ignore_direction() {
        let mut store = store_with(&["a", "b", "c", "d"]);
        store.add_relationship("b", "a", RelationType::ParentChild, 1.0).unwrap();
        store.add_relationship("b", "c", RelationType::Contradicts, 1.0).unwrap();
        store.add_relationship("c", "d", RelationType::Related, 1.0).unwrap();

        assert!(store.get_related_ideas("a", 0).is_empty());
        assert_eq!(ids(store.get_related_ideas("a", 1)), vec!["b"]);
        assert_eq!(ids(store.get_related_ideas("a", 2)), vec!["b", "c"]);
        assert_eq!(ids(store.get_related_ideas("a", 10)), vec!["b", "c", "d"]);
        assert!(store.get_related_ideas("ghost", 3).is_empty());
    }

    #[test]
    fn test_related_ideas_count_shortest_hops() {
        // d is one hop from a directly and three hops via b and c
        let mut store = store_with(&["a", "b", "c", "d", "e"]);
        store.add_relationship("a", "b", RelationType::Related, 1.0).unwrap();
        store.add_relationship("b", "c", RelationType::Related, 1.0).unwrap();
        store.add_relationship("c", "d", RelationType::Related, 1.0).unwrap();
        store.add_relationship("a", "d", RelationType::Related, 1.0).unwrap();
        store.add_relationship("d", "e", RelationType::Related, 1.0).unwrap();

        assert_eq!(ids(store.get_related_ideas("a", 2)), vec!["b", "d", "c", "e"]);
    }
}
