//! Pathfinding algorithms
//!
//! Unweighted shortest path over directed edges.

use super::common::GraphView;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::hash::Hash;

/// Result of a pathfinding algorithm
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResult<K> {
    pub source: K,
    pub target: K,
    /// Nodes from `source` to `target`, both inclusive
    pub path: Vec<K>,
    /// Number of hops
    pub cost: f64,
}

/// Breadth-First Search (Unweighted Shortest Path)
///
/// Follows edges from source to target only. Among paths of equal length the
/// first one discovered wins, so the result depends on the order of each
/// node's successor slice.
pub fn bfs<K: Clone + Eq + Hash>(
    view: &GraphView<K>,
    source: &K,
    target: &K,
) -> Option<PathResult<K>> {
    let source_idx = view.index_of(source)?;
    let target_idx = view.index_of(target)?;

    let mut queue = VecDeque::new();
    let mut visited: FxHashMap<usize, Option<usize>> = FxHashMap::default(); // index -> parent_index

    queue.push_back(source_idx);
    visited.insert(source_idx, None);

    while let Some(current_idx) = queue.pop_front() {
        if current_idx == target_idx {
            let mut path = Vec::new();
            let mut curr = Some(target_idx);
            while let Some(idx) = curr {
                path.push(view.key(idx).clone());
                curr = visited.get(&idx).copied().flatten();
            }
            path.reverse();
            return Some(PathResult {
                source: source.clone(),
                target: target.clone(),
                cost: (path.len() - 1) as f64,
                path,
            });
        }

        for &next_idx in view.successors(current_idx) {
            if !visited.contains_key(&next_idx) {
                visited.insert(next_idx, Some(current_idx));
                queue.push_back(next_idx);
            }
        }
    }

    None
}
