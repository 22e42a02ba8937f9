//! UseCase: a WebSocket connection closes.

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PresenceRegistry, User};

use super::{
    error::RelayError,
    presence::{PresenceLock, announce},
};

/// Result of a disconnect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disconnected {
    /// The user entry that was dropped; `None` if the connection never joined
    pub removed: Option<User>,
    /// Presence snapshot after the removal
    pub remaining: Vec<User>,
    /// Connections the new snapshot was sent to
    pub targets: Vec<ConnectionId>,
}

pub struct DisconnectParticipantUseCase {
    registry: Arc<dyn PresenceRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    presence_lock: PresenceLock,
}

impl DisconnectParticipantUseCase {
    pub fn new(
        registry: Arc<dyn PresenceRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        presence_lock: PresenceLock,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            presence_lock,
        }
    }

    /// Stop delivering to the connection, drop its user entry and send the
    /// snapshot, encoded by `encode`, to every connection still open.
    ///
    /// Safe to call more than once for the same connection.
    pub async fn execute<F>(
        &self,
        connection_id: &ConnectionId,
        encode: F,
    ) -> Result<Disconnected, RelayError>
    where
        F: FnOnce(&[User]) -> Option<String>,
    {
        let _presence = self.presence_lock.acquire().await;

        self.message_pusher.unregister_client(connection_id).await;
        let removed = self.registry.remove(connection_id).await;
        let remaining = self.registry.snapshot().await;
        let targets = announce(self.message_pusher.as_ref(), &remaining, encode).await?;
        Ok(Disconnected {
            removed,
            remaining,
            targets,
        })
    }
}
