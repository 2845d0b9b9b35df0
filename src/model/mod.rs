//! # Cognitive Map Model
//!
//! Plain data shared by the store, the simulator, the editor and the
//! document layer. No I/O, no state, no locking here.

pub mod node;
pub mod edge;
pub mod graph;
pub mod matrix;

pub use node::{Node, NodeId};
pub use edge::Edge;
pub use graph::GraphData;
pub use matrix::Matrix;
