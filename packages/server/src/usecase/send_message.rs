//! UseCase: relay a chat message.
//!
//! Messages go to every open connection, the sender included; clients spot
//! their own messages by the `user` field.

use std::sync::Arc;

use crate::domain::{ChatMessage, ConnectionId, MessagePusher, service::broadcast_targets};

use super::error::RelayError;

pub struct SendMessageUseCase {
    message_pusher: Arc<dyn MessagePusher>,
    /// Cap on `ChatMessage::file_size`
    max_file_bytes: usize,
}

impl SendMessageUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>, max_file_bytes: usize) -> Self {
        Self {
            message_pusher,
            max_file_bytes,
        }
    }

    /// Relay `message` to every connection.
    ///
    /// The size cap is checked before `encode` runs, so a rejected message
    /// is never copied into a frame.
    ///
    /// # Returns
    ///
    /// * `Ok(targets)` - the connections the frame was handed to
    /// * `Err(RelayError::PayloadTooLarge)` - nothing was sent
    pub async fn execute<F>(
        &self,
        message: ChatMessage,
        encode: F,
    ) -> Result<Vec<ConnectionId>, RelayError>
    where
        F: FnOnce(ChatMessage) -> Option<String>,
    {
        let size = message.file_size();
        if size > self.max_file_bytes {
            return Err(RelayError::PayloadTooLarge {
                size,
                limit: self.max_file_bytes,
            });
        }

        let Some(json_message) = encode(message) else {
            return Ok(Vec::new());
        };
        let targets = broadcast_targets(self.message_pusher.connected_ids().await, None);
        self.message_pusher
            .broadcast(targets.clone(), &json_message)
            .await?;
        Ok(targets)
    }
}
