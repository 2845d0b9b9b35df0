//! Influence edge between two concepts.

use serde::{Deserialize, Serialize};
use super::NodeId;

/// A directed, signed influence of one concept on another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub label: String,
    /// Signed weight applied when an impulse travels `from → to`.
    pub influence: f64,
}

impl Edge {
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>, influence: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: String::new(),
            influence,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    /// True if both edges join the same two nodes, in either direction.
    pub fn connects_same_pair(&self, other: &Edge) -> bool {
        (self.from == other.from && self.to == other.to)
            || (self.from == other.to && self.to == other.from)
    }

    /// True if this edge touches `id` at either end.
    pub fn touches(&self, id: &NodeId) -> bool {
        &self.from == id || &self.to == id
    }
}

/// Caption shown on the canvas: `label (influence)`.
impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label, self.influence)
    }
}
