//! # Graph Storage
//!
//! The store is the contract between the editing side (editor, document
//! load/save) and the computing side (simulator, exports). Writers submit a
//! whole graph; readers get a copy; everyone interested in changes
//! subscribes.
//!
//! | Type | Module | Description |
//! |------|--------|-------------|
//! | `GraphStore` | `store` | Authoritative in-memory graph + change fan-out |
//! | `Subscription` | `subscription` | Handle that unsubscribes on drop |

pub mod store;
pub mod subscription;

pub use store::GraphStore;
pub use subscription::{Subscription, SubscriptionId};
