//! Change-notification registry.
//!
//! Handlers are keyed by a token. Fan-out clones the handler list before
//! calling anything, so a handler may subscribe or drop subscriptions
//! (including its own) while a notification is running.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use hashbrown::HashMap;
use parking_lot::Mutex;

/// Token identifying one registered handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

type Handler = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
pub(crate) struct Registry {
    next_id: AtomicU64,
    handlers: Mutex<HashMap<SubscriptionId, Handler>>,
}

impl Registry {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn register(self: &Arc<Self>, handler: Handler) -> Subscription {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers.lock().insert(id, handler);
        Subscription { id, registry: Arc::downgrade(self) }
    }

    fn remove(&self, id: SubscriptionId) -> bool {
        self.handlers.lock().remove(&id).is_some()
    }

    /// Call every handler registered at the time of the call.
    ///
    /// The registry lock is not held while handlers run. Call order is
    /// unspecified.
    pub(crate) fn notify(&self) {
        let handlers: Vec<Handler> = self.handlers.lock().values().cloned().collect();
        for handler in handlers {
            handler();
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.handlers.lock().len()
    }
}

/// Live registration returned by [`GraphStore::subscribe`](super::GraphStore::subscribe).
///
/// Dropping it (or calling [`unsubscribe`](Self::unsubscribe)) removes the
/// handler before returning; later `replace` calls will not reach it.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: SubscriptionId,
    registry: Weak<Registry>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Explicit form of dropping the subscription.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
