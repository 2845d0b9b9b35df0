//! # Impulse Simulation
//!
//! Discrete pulse process over the influence graph:
//!
//! ```text
//! GraphStore.data() → Snapshot (x₀, p₀, A) → StepCache
//!   values[i]   = values[i-1] + impulses[i-1]
//!   impulses[i] = p₀ · A^i
//!   matrices[i] = A^(i+1)
//! ```
//!
//! The simulator subscribes to its store. A change only marks it dirty; the
//! snapshot is rebuilt on the next `calculate`. The cache also remembers the
//! store version it was built from, so a `calculate` issued by another
//! change handler never sees the previous graph. Steps already computed for
//! the current snapshot are never recomputed, only appended to.

mod cache;
pub mod snapshot;

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::config::SimulatorConfig;
use crate::model::{Matrix, Node};
use crate::storage::{GraphStore, Subscription};
use crate::{Error, Result};
use cache::StepCache;

pub use snapshot::Snapshot;

// ============================================================================
// CalculationResult
// ============================================================================

/// The first `steps` states of the process.
///
/// `values[t][k]`, `impulses[t][k]` refer to `nodes[k]` at step `t`;
/// `matrices[t]` is the influence matrix raised to the power `t + 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub values: Vec<Vec<f64>>,
    pub impulses: Vec<Vec<f64>>,
    pub matrices: Vec<Matrix>,
    pub nodes: Vec<Node>,
}

impl CalculationResult {
    pub fn steps(&self) -> usize {
        self.values.len()
    }

    /// The influence matrix itself. `None` only for a result with no steps,
    /// which `calculate` never returns.
    pub fn influence(&self) -> Option<&Matrix> {
        self.matrices.first()
    }

    /// Value trajectory of node `k` across all steps.
    ///
    /// # Panics
    ///
    /// If `k` is not an index into `nodes`.
    pub fn trajectory(&self, k: usize) -> Vec<f64> {
        self.values.iter().map(|step| step[k]).collect()
    }
}

// ============================================================================
// Simulator
// ============================================================================

/// Memoizing impulse-propagation engine bound to one [`GraphStore`].
///
/// `None` in `state` means dirty: no snapshot for the current graph yet.
pub struct Simulator {
    store: Arc<GraphStore>,
    config: SimulatorConfig,
    state: Arc<Mutex<Option<StepCache>>>,
    _subscription: Subscription,
}

impl Simulator {
    pub fn new(store: Arc<GraphStore>) -> Self {
        let state: Arc<Mutex<Option<StepCache>>> = Arc::new(Mutex::new(None));
        let weak = Arc::downgrade(&state);
        let subscription = store.subscribe(move || {
            if let Some(state) = weak.upgrade() {
                if state.lock().take().is_some() {
                    tracing::debug!("graph changed, step cache dropped");
                }
            }
        });

        Self {
            store,
            config: SimulatorConfig::default(),
            state,
            _subscription: subscription,
        }
    }

    pub fn with_config(store: Arc<GraphStore>, config: SimulatorConfig) -> Result<Self> {
        config.validate()?;
        let mut sim = Self::new(store);
        sim.config = config;
        Ok(sim)
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<GraphStore> {
        &self.store
    }

    /// Compute (or reuse) the first `steps` states of the process.
    ///
    /// Returns `Ok(None)` for a graph without nodes. `steps == 0` is
    /// rejected rather than clamped. Data errors (unknown edge endpoint,
    /// repeated node id) leave the simulator dirty, so fixing the graph and
    /// calling again works.
    pub fn calculate(&self, steps: usize) -> Result<Option<CalculationResult>> {
        if steps == 0 {
            return Err(Error::InvalidSteps);
        }
        if let Some(max) = self.config.max_steps {
            if steps > max {
                return Err(Error::StepLimitExceeded { requested: steps, max });
            }
        }

        let mut state = self.state.lock();
        let version = self.store.version();
        if state.as_ref().is_some_and(|cache| cache.version() != version) {
            // Another subscriber got the change notification before ours did.
            tracing::debug!(version, "step cache is behind the store, rebuilding");
            state.take();
        }
        let cache = match &mut *state {
            Some(cache) => cache,
            slot @ None => {
                let (version, data) = self.store.versioned_data();
                let snapshot = Snapshot::build(&data)?;
                slot.insert(StepCache::new(version, snapshot))
            }
        };

        if cache.is_empty_graph() {
            return Ok(None);
        }

        cache.extend_to(steps);
        Ok(Some(cache.prefix(steps)))
    }

    /// Steps cached for the current graph; 0 when dirty.
    pub fn computed_steps(&self) -> usize {
        let version = self.store.version();
        self.state
            .lock()
            .as_ref()
            .filter(|cache| cache.version() == version)
            .map_or(0, StepCache::len)
    }

    /// True until the next successful `calculate` after a graph change.
    pub fn is_dirty(&self) -> bool {
        self.computed_steps() == 0
    }

    /// Drop the cache without waiting for a store change.
    pub fn invalidate(&self) {
        self.state.lock().take();
    }
}

impl std::fmt::Debug for Simulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulator")
            .field("config", &self.config)
            .field("computed_steps", &self.computed_steps())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
