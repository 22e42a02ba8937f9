//! UseCase: relay a typing notice to everyone but its sender.

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, service::broadcast_targets};

use super::error::RelayError;

pub struct SendTypingUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl SendTypingUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// Relay the encoded notice to every connection except `from`
    pub async fn execute(
        &self,
        from: &ConnectionId,
        json_message: &str,
    ) -> Result<Vec<ConnectionId>, RelayError> {
        let targets = broadcast_targets(self.message_pusher.connected_ids().await, Some(from));
        self.message_pusher
            .broadcast(targets.clone(), json_message)
            .await?;
        Ok(targets)
    }
}
