//! Graph editing operations.
//!
//! Every edit reads the current graph, changes it, checks the data
//! contract and submits the whole graph back to the store. The store
//! itself accepts anything; this is where self-loops and parallel edges
//! are refused.

use std::sync::Arc;

use crate::model::{Edge, GraphData, Node, NodeId};
use crate::storage::GraphStore;
use crate::{Error, Result};

/// Editing front end over a [`GraphStore`].
#[derive(Debug, Clone)]
pub struct GraphEditor {
    store: Arc<GraphStore>,
}

impl GraphEditor {
    pub fn new(store: Arc<GraphStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<GraphStore> {
        &self.store
    }

    // ========================================================================
    // Nodes
    // ========================================================================

    /// Add a concept with a fresh UUID id.
    pub fn add_node(&self, label: impl Into<String>, value: f64, impulse: f64) -> Result<NodeId> {
        let id = NodeId::Text(uuid::Uuid::new_v4().to_string());
        let node = Node::new(id.clone(), label).with_value(value).with_impulse(impulse);
        self.insert_node(node)?;
        Ok(id)
    }

    /// Add a node whose id the caller chose.
    pub fn insert_node(&self, node: Node) -> Result<()> {
        self.edit(|data| {
            if data.node(&node.id).is_some() {
                return Err(Error::DuplicateNode(node.id.clone()));
            }
            data.nodes.push(node);
            Ok(())
        })
    }

    pub fn update_node(
        &self,
        id: &NodeId,
        label: impl Into<String>,
        value: f64,
        impulse: f64,
    ) -> Result<()> {
        let label = label.into();
        self.edit(|data| {
            let node = data.node_mut(id).ok_or_else(|| Error::NotFound(format!("Node {id}")))?;
            node.label = label;
            node.value = value;
            node.impulse = impulse;
            Ok(())
        })
    }

    /// Remove a node together with every edge touching it.
    pub fn remove_node(&self, id: &NodeId) -> Result<()> {
        self.edit(|data| {
            let before = data.nodes.len();
            data.nodes.retain(|n| &n.id != id);
            if data.nodes.len() == before {
                return Err(Error::NotFound(format!("Node {id}")));
            }
            data.edges.retain(|e| !e.touches(id));
            Ok(())
        })
    }

    // ========================================================================
    // Edges
    // ========================================================================

    /// Connect `from → to`.
    ///
    /// Refused if `from == to`, if either node is missing, or if the two
    /// nodes are already connected in either direction.
    pub fn add_edge(
        &self,
        from: &NodeId,
        to: &NodeId,
        label: impl Into<String>,
        influence: f64,
    ) -> Result<()> {
        let edge = Edge::new(from.clone(), to.clone(), influence).with_label(label);
        self.edit(|data| {
            if edge.is_self_loop() {
                return Err(Error::SelfLoop(edge.from.clone()));
            }
            for end in [&edge.from, &edge.to] {
                if data.node(end).is_none() {
                    return Err(Error::UnknownNode(end.clone()));
                }
            }
            if data.edges.iter().any(|e| e.connects_same_pair(&edge)) {
                return Err(Error::DuplicateEdge { from: edge.from.clone(), to: edge.to.clone() });
            }
            data.edges.push(edge);
            Ok(())
        })
    }

    pub fn update_edge(
        &self,
        from: &NodeId,
        to: &NodeId,
        label: impl Into<String>,
        influence: f64,
    ) -> Result<()> {
        let label = label.into();
        self.edit(|data| {
            let edge = data
                .edge_mut(from, to)
                .ok_or_else(|| Error::NotFound(format!("Edge {from} -> {to}")))?;
            edge.label = label;
            edge.influence = influence;
            Ok(())
        })
    }

    pub fn remove_edge(&self, from: &NodeId, to: &NodeId) -> Result<()> {
        self.edit(|data| {
            let before = data.edges.len();
            data.edges.retain(|e| !(&e.from == from && &e.to == to));
            if data.edges.len() == before {
                return Err(Error::NotFound(format!("Edge {from} -> {to}")));
            }
            Ok(())
        })
    }

    // ========================================================================
    // Whole graph
    // ========================================================================

    /// Replace the whole graph after checking the data contract.
    pub fn submit(&self, data: GraphData) -> Result<()> {
        data.validate()?;
        self.store.replace(data);
        Ok(())
    }

    fn edit<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&mut GraphData) -> Result<()>,
    {
        let mut data = self.store.data();
        change(&mut data)?;
        self.submit(data)
    }
}
