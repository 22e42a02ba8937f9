//! UseCase: a WebSocket connection opens.
//!
//! The connection becomes a delivery target immediately. It only shows up
//! in presence once it sends `join`.

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PresenceRegistry, PusherChannel, User};

use super::{error::RelayError, presence::PresenceLock};

pub struct ConnectParticipantUseCase {
    registry: Arc<dyn PresenceRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    presence_lock: PresenceLock,
}

impl ConnectParticipantUseCase {
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

    /// Register the connection for delivery and send it the current
    /// presence snapshot, encoded by `encode`, so it can show who is online
    /// before joining.
    ///
    /// # Returns
    ///
    /// The snapshot that was sent
    pub async fn execute<F>(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
        encode: F,
    ) -> Result<Vec<User>, RelayError>
    where
        F: FnOnce(&[User]) -> Option<String>,
    {
        let _presence = self.presence_lock.acquire().await;

        self.message_pusher
            .register_client(connection_id, sender)
            .await;
        let snapshot = self.registry.snapshot().await;
        if let Some(message) = encode(&snapshot) {
            self.message_pusher.push_to(&connection_id, &message).await?;
        }
        Ok(snapshot)
    }
}
