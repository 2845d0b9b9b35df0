//! Append-only step arena.

use crate::model::Matrix;
use super::{CalculationResult, Snapshot};

/// Steps computed so far for one snapshot.
///
/// `values`, `impulses` and `matrices` always have exactly `len()` entries.
/// Entries are only ever appended; a new graph version gets a new cache.
#[derive(Debug)]
pub(crate) struct StepCache {
    version: u64,
    snapshot: Snapshot,
    values: Vec<Vec<f64>>,
    impulses: Vec<Vec<f64>>,
    matrices: Vec<Matrix>,
}

impl StepCache {
    /// Cache holding step 0 (the snapshot itself) of store version `version`.
    pub(crate) fn new(version: u64, snapshot: Snapshot) -> Self {
        Self {
            version,
            values: vec![snapshot.values.clone()],
            impulses: vec![snapshot.impulses.clone()],
            matrices: vec![snapshot.influence.clone()],
            snapshot,
        }
    }

    /// Store version the snapshot was taken from.
    pub(crate) fn version(&self) -> u64 {
        self.version
    }

    /// Highest step count available without further computation.
    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn is_empty_graph(&self) -> bool {
        self.snapshot.is_empty()
    }

    /// Compute steps `len()..steps`. No-op if already available.
    ///
    /// ```text
    /// values[i]   = values[i-1] + impulses[i-1]
    /// impulses[i] = impulses[0] · matrices[i-1]
    /// matrices[i] = matrices[0] · matrices[i-1]      (= A^(i+1))
    /// ```
    pub(crate) fn extend_to(&mut self, steps: usize) {
        let from = self.len();
        if steps <= from {
            return;
        }
        tracing::trace!(from, to = steps, nodes = self.snapshot.len(), "extending step cache");

        self.values.reserve(steps - from);
        self.impulses.reserve(steps - from);
        self.matrices.reserve(steps - from);

        for i in from..steps {
            let values: Vec<f64> = self.values[i - 1]
                .iter()
                .zip(&self.impulses[i - 1])
                .map(|(v, p)| v + p)
                .collect();
            let impulses = self.matrices[i - 1].left_mul(&self.impulses[0]);
            let matrix = self.matrices[0].matmul(&self.matrices[i - 1]);

            self.values.push(values);
            self.impulses.push(impulses);
            self.matrices.push(matrix);
        }
    }

    /// First `steps` entries of every sequence. `steps` must not exceed `len()`.
    pub(crate) fn prefix(&self, steps: usize) -> CalculationResult {
        CalculationResult {
            values: self.values[..steps].to_vec(),
            impulses: self.impulses[..steps].to_vec(),
            matrices: self.matrices[..steps].to_vec(),
            nodes: self.snapshot.nodes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Edge, GraphData, Node};

    fn cache() -> StepCache {
        let data = GraphData::new()
            .with_node(Node::new(1, "A").with_value(1.0).with_impulse(1.0))
            .with_node(Node::new(2, "B"))
            .with_edge(Edge::new(1, 2, 2.0))
            .with_edge(Edge::new(2, 1, 0.5));
        StepCache::new(0, Snapshot::build(&data).unwrap())
    }

    #[test]
    fn test_starts_with_step_zero() {
        let c = cache();
        assert_eq!(c.len(), 1);
        let r = c.prefix(1);
        assert_eq!(r.values, vec![vec![1.0, 0.0]]);
        assert_eq!(r.impulses, vec![vec![1.0, 0.0]]);
    }

    #[test]
    fn test_extend_only_appends() {
        let mut c = cache();
        c.extend_to(3);
        assert_eq!(c.len(), 3);
        let before = c.prefix(3);

        c.extend_to(2);
        assert_eq!(c.len(), 3);
        c.extend_to(5);
        assert_eq!(c.len(), 5);

        let after = c.prefix(3);
        assert_eq!(before, after);
    }

    #[test]
    fn test_oscillating_pair() {
        // A ⇄ B with product 1: impulses bounce between the two nodes.
        let mut c = cache();
        c.extend_to(4);
        let r = c.prefix(4);
        assert_eq!(r.impulses[1], vec![0.0, 2.0]);
        assert_eq!(r.impulses[2], vec![1.0, 0.0]);
        assert_eq!(r.impulses[3], vec![0.0, 2.0]);
        assert_eq!(r.values[2], vec![2.0, 2.0]);
        assert_eq!(r.values[3], vec![3.0, 2.0]);
    }
}
