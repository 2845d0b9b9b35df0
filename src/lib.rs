//! # cognitive-map: Cognitive Map Modeling
//!
//! Build signed, weighted influence graphs of concepts and run the discrete
//! impulse-propagation (pulse process) simulation over them.
//!
//! ## Design Principles
//!
//! 1. **One source of truth**: `GraphStore` holds the graph; writers submit
//!    whole graphs, readers get copies, interested parties subscribe.
//! 2. **Plain DTOs**: `Node`, `Edge`, `GraphData` are the persisted form and
//!    cross every boundary.
//! 3. **Lazy simulation**: a store change only marks the `Simulator` dirty;
//!    steps are computed on demand and never recomputed.
//! 4. **Contract at the edge**: the store keeps anything; the editor and
//!    `GraphData::validate` enforce it.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use cognitive_map::{GraphEditor, GraphStore, Simulator};
//!
//! # fn example() -> cognitive_map::Result<()> {
//! let store = Arc::new(GraphStore::new());
//! let editor = GraphEditor::new(Arc::clone(&store));
//! let simulator = Simulator::new(Arc::clone(&store));
//!
//! let demand = editor.add_node("Demand", 10.0, 1.0)?;
//! let price = editor.add_node("Price", 5.0, -1.0)?;
//! editor.add_edge(&demand, &price, "raises", 0.5)?;
//!
//! let result = simulator.calculate(2)?.expect("graph has nodes");
//! assert_eq!(result.values[1], vec![11.0, 4.0]);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `model` | Nodes, edges, graph data, dense matrix |
//! | `storage` | `GraphStore` and change subscriptions |
//! | `simulation` | Snapshot, step cache, `Simulator` |
//! | `editor` | Validated edit operations |
//! | `document` | New / load / save / save as, window title |
//! | `export` | CSV report and chart series |
//! | `config` | Simulator and document settings |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod storage;
pub mod simulation;
pub mod editor;
pub mod document;
pub mod export;
pub mod config;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{Node, NodeId, Edge, GraphData, Matrix};

// ============================================================================
// Re-exports: Storage / Simulation
// ============================================================================

pub use storage::{GraphStore, Subscription, SubscriptionId};
pub use simulation::{Simulator, CalculationResult, Snapshot};

// ============================================================================
// Re-exports: Collaborators
// ============================================================================

pub use editor::GraphEditor;
pub use document::DocumentSession;
pub use config::{SimulatorConfig, DocumentConfig};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid step count: at least one step is required")]
    InvalidSteps,

    #[error("Step limit exceeded: requested {requested}, max {max}")]
    StepLimitExceeded { requested: usize, max: usize },

    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("Duplicate node id: {0}")]
    DuplicateNode(NodeId),

    #[error("Self-loop on node {0}")]
    SelfLoop(NodeId),

    #[error("Nodes {from} and {to} are already connected")]
    DuplicateEdge { from: NodeId, to: NodeId },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Matrix shape error: {0}")]
    Shape(String),

    #[error("Document has no file path; save it under a name first")]
    NoDocumentPath,

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
