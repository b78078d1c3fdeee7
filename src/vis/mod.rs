//! Visualization projection
//!
//! Flattens the store into the node/edge lists a vis-network style renderer
//! consumes. The result is a snapshot: later mutations do not show up in it.

pub mod config;

pub use config::VisConfig;

use crate::graph::{Edge, GraphStore, IdeaNode, RelationType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisNode {
    pub id: String,
    pub label: String,
    pub level: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisEdge {
    pub id: String,
    pub from: String,
    pub to: String,
    pub color: String,
    pub width: f64,
    /// Set for every relationship that is not parent -> child
    pub dashes: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisNetworkData {
    pub nodes: Vec<VisNode>,
    pub edges: Vec<VisEdge>,
}

impl VisNode {
    fn project(node: &IdeaNode, config: &VisConfig) -> Self {
        VisNode {
            id: node.id().to_string(),
            label: node.label.clone(),
            level: node.level,
            color: node.colour.clone(),
            size: node.priority * config.size_scale,
        }
    }
}

impl VisEdge {
    fn project(edge: &Edge, config: &VisConfig) -> Self {
        let color = match edge.relation_type() {
            RelationType::Contradicts => &config.alert_edge_color,
            _ => &config.edge_color,
        };
        VisEdge {
            id: edge.id().to_string(),
            from: edge.source().to_string(),
            to: edge.target().to_string(),
            color: color.clone(),
            width: edge.strength,
            dashes: !edge.is_hierarchical(),
        }
    }
}

impl GraphStore {
    /// Project the graph with the default [`VisConfig`]
    pub fn get_vis_network_data(&self) -> VisNetworkData {
        self.vis_network_data_with(&VisConfig::default())
    }

    /// Project the graph: one visual node per node, one visual edge per edge,
    /// both in store enumeration order
    pub fn vis_network_data_with(&self, config: &VisConfig) -> VisNetworkData {
        VisNetworkData {
            nodes: self.nodes().map(|node| VisNode::project(node, config)).collect(),
            edges: self.edges().map(|edge| VisEdge::project(edge, config)).collect(),
        }
    }
}
