pub mod common;
pub mod pathfinding;
pub mod traversal;

pub use common::GraphView;
pub use pathfinding::{bfs, PathResult};
pub use traversal::{bounded_neighborhood, dfs_preorder};
