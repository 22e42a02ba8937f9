//! Outbound delivery trait.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError};

/// Channel carrying encoded frames to one connection's socket writer
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Delivers already-encoded frames to open connections.
///
/// A connection is registered from the moment its socket opens, whether or
/// not it has joined yet.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Start delivering to `id` through `sender`
    async fn register_client(&self, id: ConnectionId, sender: PusherChannel);

    /// Stop delivering to `id`
    async fn unregister_client(&self, id: &ConnectionId);

    /// Deliver `content` to a single connection
    async fn push_to(&self, id: &ConnectionId, content: &str) -> Result<(), MessagePushError>;

    /// Deliver `content` to every target.
    ///
    /// Unknown or closed targets are skipped; a broadcast never fails
    /// because of a single peer.
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        content: &str,
    ) -> Result<(), MessagePushError>;

    /// Ids of every registered connection
    async fn connected_ids(&self) -> Vec<ConnectionId>;
}
