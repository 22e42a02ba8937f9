//! Presence registry trait.
//!
//! The use cases depend on this trait; the in-memory implementation lives in
//! the infrastructure layer.

use async_trait::async_trait;

use super::{ConnectionId, User};

/// Set of users currently joined, keyed by connection id.
///
/// Every operation is total. At most one entry exists per connection id.
#[async_trait]
pub trait PresenceRegistry: Send + Sync {
    /// Record `user`, replacing any entry with the same connection id.
    ///
    /// Returns the replaced entry, if any. A replaced entry keeps its
    /// position in the snapshot order.
    async fn join(&self, user: User) -> Option<User>;

    /// Remove the entry for `id`. Removing an unknown id is a no-op.
    async fn remove(&self, id: &ConnectionId) -> Option<User>;

    /// Current users in join order
    async fn snapshot(&self) -> Vec<User>;

    /// Number of joined users
    async fn count(&self) -> usize;
}
