//! GraphData → numeric form.

use hashbrown::{HashMap, HashSet};

use crate::model::{GraphData, Matrix, Node, NodeId};
use crate::{Error, Result};

/// Initial vectors and influence matrix of one graph version.
///
/// Index `k` everywhere refers to `nodes[k]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub nodes: Vec<Node>,
    pub values: Vec<f64>,
    pub impulses: Vec<f64>,
    /// `influence[i][j]` is the weight of the edge `nodes[i] → nodes[j]`, or 0.
    pub influence: Matrix,
}

impl Snapshot {
    /// Build the snapshot of `data`.
    ///
    /// Fails on a repeated node id or an edge naming a node that does not
    /// exist. Two edges over the same ordered pair are not rejected: the
    /// later one overwrites the cell, which the data contract leaves
    /// undefined, so it is logged.
    pub fn build(data: &GraphData) -> Result<Self> {
        let n = data.nodes.len();
        tracing::debug!(nodes = n, edges = data.edges.len(), "building simulation snapshot");

        let mut index: HashMap<&NodeId, usize> = HashMap::with_capacity(n);
        let mut values = Vec::with_capacity(n);
        let mut impulses = Vec::with_capacity(n);
        for (k, node) in data.nodes.iter().enumerate() {
            if index.insert(&node.id, k).is_some() {
                return Err(Error::DuplicateNode(node.id.clone()));
            }
            values.push(node.value);
            impulses.push(node.impulse);
        }

        let lookup = |id: &NodeId| {
            index
                .get(id)
                .copied()
                .ok_or_else(|| Error::UnknownNode(id.clone()))
        };

        let mut influence = Matrix::square(n);
        let mut filled = HashSet::with_capacity(data.edges.len());
        for edge in &data.edges {
            let (i, j) = (lookup(&edge.from)?, lookup(&edge.to)?);
            if !filled.insert((i, j)) {
                tracing::warn!(
                    from = %edge.from,
                    to = %edge.to,
                    "parallel edge overwrites earlier influence"
                );
            }
            influence.set(i, j, edge.influence);
        }

        Ok(Self {
            nodes: data.nodes.clone(),
            values,
            impulses,
            influence,
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Edge;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_matrix_follows_node_order() {
        let data = GraphData::new()
            .with_node(Node::new("x", "X").with_value(1.0).with_impulse(0.1))
            .with_node(Node::new("y", "Y").with_value(2.0))
            .with_node(Node::new("z", "Z").with_impulse(-3.0))
            .with_edge(Edge::new("z", "x", -0.7))
            .with_edge(Edge::new("x", "y", 0.2));

        let snap = Snapshot::build(&data).unwrap();
        assert_eq!(snap.values, vec![1.0, 2.0, 0.0]);
        assert_eq!(snap.impulses, vec![0.1, 0.0, -3.0]);
        assert_eq!(
            snap.influence.to_rows(),
            vec![
                vec![0.0, 0.2, 0.0],
                vec![0.0, 0.0, 0.0],
                vec![-0.7, 0.0, 0.0],
            ]
        );
        assert_eq!(snap.nodes, data.nodes);
    }

    #[test]
    fn test_unknown_endpoint_is_rejected() {
        let data = GraphData::new()
            .with_node(Node::new(1, "A"))
            .with_edge(Edge::new(1, 2, 1.0));
        let err = Snapshot::build(&data).unwrap_err();
        assert!(matches!(err, Error::UnknownNode(NodeId::Int(2))));
    }

    #[test]
    fn test_duplicate_node_is_rejected() {
        let data = GraphData::new()
            .with_node(Node::new(1, "A"))
            .with_node(Node::new(1, "B"));
        assert!(matches!(Snapshot::build(&data), Err(Error::DuplicateNode(_))));
    }

    #[test]
    fn test_parallel_edge_last_wins() {
        let data = GraphData::new()
            .with_node(Node::new(1, "A"))
            .with_node(Node::new(2, "B"))
            .with_edge(Edge::new(1, 2, 1.0))
            .with_edge(Edge::new(1, 2, 4.0));
        let snap = Snapshot::build(&data).unwrap();
        assert_eq!(snap.influence.get(0, 1), 4.0);
    }

    #[test]
    fn test_empty_graph() {
        let snap = Snapshot::build(&GraphData::new()).unwrap();
        assert!(snap.is_empty());
        assert_eq!(snap.influence.rows(), 0);
    }
}
