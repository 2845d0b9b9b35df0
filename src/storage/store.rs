//! In-memory graph store.
//!
//! Holds the single authoritative [`GraphData`] value. Every write is a
//! whole-value swap followed by a synchronous notification of all current
//! subscribers, so readers observe either the old graph or the new one,
//! never a mix.
//!
//! ## Limitations
//!
//! - **No validation**: `replace()` stores whatever it is handed. Use
//!   [`GraphData::validate`] or go through [`GraphEditor`](crate::editor::GraphEditor)
//!   if the data contract matters.
//! - **Copy on read**: `data()` clones the graph. Graphs are small; if that
//!   ever stops being true this should hand out `Arc<GraphData>` instead.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::model::GraphData;
use super::subscription::{Registry, Subscription};

// ============================================================================
// GraphStore
// ============================================================================

/// Single source of truth for the current cognitive map.
pub struct GraphStore {
    data: RwLock<GraphData>,
    version: AtomicU64,
    subscribers: Arc<Registry>,
}

impl GraphStore {
    /// Store holding the empty graph.
    pub fn new() -> Self {
        Self::with_data(GraphData::new())
    }

    pub fn with_data(data: GraphData) -> Self {
        Self {
            data: RwLock::new(data),
            version: AtomicU64::new(0),
            subscribers: Registry::new(),
        }
    }

    /// Snapshot of the current graph. Mutating it does not touch the store.
    pub fn data(&self) -> GraphData {
        self.data.read().clone()
    }

    /// Snapshot of the current graph together with the version it belongs to.
    pub fn versioned_data(&self) -> (u64, GraphData) {
        let data = self.data.read();
        (self.version(), data.clone())
    }

    /// Install `data` as the current graph, then notify every subscriber
    /// before returning.
    pub fn replace(&self, data: GraphData) {
        let version = {
            let mut current = self.data.write();
            *current = data;
            self.version.fetch_add(1, Ordering::AcqRel) + 1
        };
        tracing::trace!(version, subscribers = self.subscribers.len(), "graph replaced");
        self.subscribers.notify();
    }

    /// Register `handler` for every future `replace`.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.subscribers.register(Arc::new(handler))
    }

    /// Number of `replace` calls so far.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GraphStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let data = self.data.read();
        f.debug_struct("GraphStore")
            .field("nodes", &data.nodes.len())
            .field("edges", &data.edges.len())
            .field("version", &self.version())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Edge, Node};
    use std::sync::atomic::AtomicUsize;

    fn sample() -> GraphData {
        GraphData::new()
            .with_node(Node::new(1, "A").with_value(10.0))
            .with_node(Node::new(2, "B"))
            .with_edge(Edge::new(1, 2, 0.5))
    }

    #[test]
    fn test_starts_empty() {
        let store = GraphStore::new();
        assert_eq!(store.data(), GraphData::new());
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn test_replace_and_read_back() {
        let store = GraphStore::new();
        store.replace(sample());
        assert_eq!(store.data(), sample());
        assert_eq!(store.version(), 1);
    }

    #[test]
    fn test_versioned_data_matches_version() {
        let store = GraphStore::new();
        assert_eq!(store.versioned_data(), (0, GraphData::new()));
        store.replace(sample());
        assert_eq!(store.versioned_data(), (1, sample()));
    }

    #[test]
    fn test_read_is_a_copy() {
        let store = GraphStore::with_data(sample());
        let mut copy = store.data();
        copy.nodes.clear();
        assert_eq!(store.data().nodes.len(), 2);
    }

    #[test]
    fn test_replace_notifies_synchronously() {
        let store = GraphStore::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let _sub = store.subscribe(move || {
            h.fetch_add(1, Ordering::SeqCst);
        });

        store.replace(sample());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        store.replace(sample());
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_handler_sees_new_data() {
        let store = Arc::new(GraphStore::new());
        let seen = Arc::new(AtomicUsize::new(usize::MAX));
        let (s, st) = (Arc::clone(&seen), Arc::downgrade(&store));
        let _sub = store.subscribe(move || {
            if let Some(store) = st.upgrade() {
                s.store(store.data().nodes.len(), Ordering::SeqCst);
            }
        });

        store.replace(sample());
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_released_subscription_is_silent() {
        let store = GraphStore::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let sub = store.subscribe(move || {
            h.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(store.subscriber_count(), 1);

        sub.unsubscribe();
        store.replace(sample());
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(store.subscriber_count(), 0);
    }
}
