//! Traversal algorithms
//!
//! Iterative depth-first pre-order and hop-bounded neighborhoods. Both use an
//! explicit work list and a visited set, so cyclic inputs terminate and deep
//! graphs do not grow the call stack.

use super::common::GraphView;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use std::hash::Hash;

/// Depth-first pre-order walk along outgoing edges.
///
/// Returns every node reachable from `root`, `root` first, each exactly once.
/// Successors are visited in slice order, matching a recursive walk.
/// An unknown root yields an empty result.
pub fn dfs_preorder<K: Clone + Eq + Hash>(view: &GraphView<K>, root: &K) -> Vec<K> {
    let Some(root_idx) = view.index_of(root) else {
        return Vec::new();
    };

    let mut result = Vec::new();
    let mut visited = FxHashSet::default();
    let mut stack = vec![root_idx];

    while let Some(idx) = stack.pop() {
        if !visited.insert(idx) {
            continue;
        }
        result.push(view.key(idx).clone());

        // Reverse so the first successor is popped first
        for &next_idx in view.successors(idx).iter().rev() {
            if !visited.contains(&next_idx) {
                stack.push(next_idx);
            }
        }
    }

    result
}

/// Nodes within `max_hops` of `start`, ignoring edge direction.
///
/// The start node is excluded and every other node appears once, in
/// breadth-first discovery order. `max_hops == 0` yields an empty result.
pub fn bounded_neighborhood<K: Clone + Eq + Hash>(
    view: &GraphView<K>,
    start: &K,
    max_hops: usize,
) -> Vec<K> {
    let Some(start_idx) = view.index_of(start) else {
        return Vec::new();
    };

    let mut result = Vec::new();
    let mut visited = FxHashSet::default();
    let mut queue = VecDeque::new();

    visited.insert(start_idx);
    queue.push_back((start_idx, 0usize));

    while let Some((idx, depth)) = queue.pop_front() {
        if depth >= max_hops {
            continue;
        }

        let neighbors = view.successors(idx).iter().chain(view.predecessors(idx));
        for &next_idx in neighbors {
            if visited.insert(next_idx) {
                result.push(view.key(next_idx).clone());
                queue.push_back((next_idx, depth + 1));
            }
        }
    }

    result
}
