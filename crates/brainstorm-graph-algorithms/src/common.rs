//! Shared utilities for graph algorithms
//!
//! Provides a read-only, dense-index view of the graph topology for algorithm execution.

use rustc_hash::FxHashMap;
use std::hash::Hash;

/// A dense, integer-indexed view of the graph topology using Compressed Sparse Row (CSR) format.
///
/// `K` is the caller's node key. Neighbor slices preserve the order in which
/// edges were handed to the builder, so traversals that depend on edge
/// enumeration order (BFS tie-breaks, DFS child order) stay reproducible.
#[derive(Debug, Clone)]
pub struct GraphView<K> {
    /// Number of nodes
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to the node key
    pub index_to_node: Vec<K>,
    /// Mapping from node key to dense index
    pub node_to_index: FxHashMap<K, usize>,

    /// Outgoing edges CSR structure
    /// Offsets into `out_targets`. Size = node_count + 1
    pub out_offsets: Vec<usize>,
    /// Contiguous array of target node indices
    pub out_targets: Vec<usize>,

    /// Incoming edges CSR structure
    /// Offsets into `in_sources`. Size = node_count + 1
    pub in_offsets: Vec<usize>,
    /// Contiguous array of source node indices
    pub in_sources: Vec<usize>,
}

impl<K: Clone + Eq + Hash> GraphView<K> {
    /// Build a view from a node list and a directed edge list.
    ///
    /// Edges whose endpoints are not in `nodes` are skipped, which is how
    /// callers project a subgraph.
    pub fn from_edges<N, E>(nodes: N, edges: E) -> Self
    where
        N: IntoIterator<Item = K>,
        E: IntoIterator<Item = (K, K)>,
    {
        let mut index_to_node = Vec::new();
        let mut node_to_index = FxHashMap::default();
        for key in nodes {
            if !node_to_index.contains_key(&key) {
                node_to_index.insert(key.clone(), index_to_node.len());
                index_to_node.push(key);
            }
        }

        let node_count = index_to_node.len();
        let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        let mut incoming: Vec<Vec<usize>> = vec![Vec::new(); node_count];

        for (source, target) in edges {
            let (Some(&u), Some(&v)) = (node_to_index.get(&source), node_to_index.get(&target)) else {
                continue;
            };
            outgoing[u].push(v);
            incoming[v].push(u);
        }

        Self::from_adjacency_list(index_to_node, node_to_index, outgoing, incoming)
    }

    /// Helper to create a GraphView from adjacency lists
    pub fn from_adjacency_list(
        index_to_node: Vec<K>,
        node_to_index: FxHashMap<K, usize>,
        outgoing: Vec<Vec<usize>>,
        incoming: Vec<Vec<usize>>,
    ) -> Self {
        let node_count = index_to_node.len();
        let mut out_offsets = Vec::with_capacity(node_count + 1);
        let mut out_targets = Vec::new();
        let mut in_offsets = Vec::with_capacity(node_count + 1);
        let mut in_sources = Vec::new();

        out_offsets.push(0);
        for neighbors in outgoing {
            out_targets.extend(neighbors);
            out_offsets.push(out_targets.len());
        }

        in_offsets.push(0);
        for sources in incoming {
            in_sources.extend(sources);
            in_offsets.push(in_sources.len());
        }

        GraphView {
            node_count,
            index_to_node,
            node_to_index,
            out_offsets,
            out_targets,
            in_offsets,
            in_sources,
        }
    }

    /// Dense index of a node key, if the node is part of the view
    pub fn index_of(&self, key: &K) -> Option<usize> {
        self.node_to_index.get(key).copied()
    }

    /// Node key at a dense index
    pub fn key(&self, idx: usize) -> &K {
        &self.index_to_node[idx]
    }
}

impl<K> GraphView<K> {
    /// Get the out-degree of a node (by index)
    pub fn out_degree(&self, idx: usize) -> usize {
        self.out_offsets[idx + 1] - self.out_offsets[idx]
    }

    /// Get the in-degree of a node (by index)
    pub fn in_degree(&self, idx: usize) -> usize {
        self.in_offsets[idx + 1] - self.in_offsets[idx]
    }

    /// Get outgoing neighbors (successors) of a node
    pub fn successors(&self, idx: usize) -> &[usize] {
        let start = self.out_offsets[idx];
        let end = self.out_offsets[idx + 1];
        &self.out_targets[start..end]
    }

    /// Get incoming neighbors (predecessors) of a node
    pub fn predecessors(&self, idx: usize) -> &[usize] {
        let start = self.in_offsets[idx];
        let end = self.in_offsets[idx + 1];
        &self.in_sources[start..end]
    }

    /// Number of edges in the view
    pub fn edge_count(&self) -> usize {
        self.out_targets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_edges_builds_csr() {
        let view = GraphView::from_edges(["a", "b", "c"], [("a", "b"), ("a", "c"), ("b", "c")]);

        assert_eq!(view.node_count, 3);
        assert_eq!(view.edge_count(), 3);

        let a = view.index_of(&"a").unwrap();
        let c = view.index_of(&"c").unwrap();
        assert_eq!(view.out_degree(a), 2);
        assert_eq!(view.in_degree(c), 2);
        assert_eq!(view.successors(a), &[1, 2]);
        assert_eq!(view.predecessors(c), &[0, 1]);
    }

    #[test]
    fn test_from_edges_skips_dangling_endpoints() {
        let view = GraphView::from_edges(["a", "b"], [("a", "b"), ("a", "zzz"), ("zzz", "b")]);
        assert_eq!(view.edge_count(), 1);
        assert!(view.index_of(&"zzz").is_none());
    }

    #[test]
    fn test_duplicate_node_keys_collapse() {
        let view = GraphView::from_edges(["a", "a", "b"], [("a", "b")]);
        assert_eq!(view.node_count, 2);
        assert_eq!(view.key(1), &"b");
    }
}
