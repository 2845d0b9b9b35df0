//! GraphData: the canonical, persisted form of a cognitive map.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use super::{Edge, Node, NodeId};
use crate::{Error, Result};

/// Nodes and edges of one cognitive map.
///
/// Node order is significant: position `k` in `nodes` is row/column `k` of
/// the influence matrix and entry `k` of every state vector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl GraphData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn with_edge(mut self, edge: Edge) -> Self {
        self.edges.push(edge);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| &n.id == id)
    }

    /// The edge running exactly `from → to`.
    pub fn edge(&self, from: &NodeId, to: &NodeId) -> Option<&Edge> {
        self.edges.iter().find(|e| &e.from == from && &e.to == to)
    }

    pub fn edge_mut(&mut self, from: &NodeId, to: &NodeId) -> Option<&mut Edge> {
        self.edges.iter_mut().find(|e| &e.from == from && &e.to == to)
    }

    /// Check the data contract the editor maintains:
    ///
    /// - node ids are unique,
    /// - every edge endpoint names a node,
    /// - no edge joins a node to itself,
    /// - at most one edge joins any unordered pair of nodes.
    ///
    /// The store never calls this; it keeps whatever it is given.
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !ids.insert(&node.id) {
                return Err(Error::DuplicateNode(node.id.clone()));
            }
        }

        for (i, edge) in self.edges.iter().enumerate() {
            for end in [&edge.from, &edge.to] {
                if !ids.contains(end) {
                    return Err(Error::UnknownNode(end.clone()));
                }
            }
            if edge.is_self_loop() {
                return Err(Error::SelfLoop(edge.from.clone()));
            }
            if self.edges[..i].iter().any(|prev| prev.connects_same_pair(edge)) {
                return Err(Error::DuplicateEdge {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                });
            }
        }

        Ok(())
    }

    /// Parse a document body.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Document body, pretty-printed with two-space indentation.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
