//! Rendering configuration for the visualization projection

use serde::{Deserialize, Serialize};

/// Projection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisConfig {
    /// Multiplier from node priority to rendered size
    pub size_scale: f64,
    /// Edge colour for contradicting ideas
    pub alert_edge_color: String,
    /// Edge colour for every other relationship
    pub edge_color: String,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            size_scale: 5.0,
            alert_edge_color: "#ff0000".to_string(),
            edge_color: "#999999".to_string(),
        }
    }
}
