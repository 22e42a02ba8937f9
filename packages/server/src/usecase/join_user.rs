//! UseCase: a connection joins under a display name.

use std::sync::Arc;

use crate::domain::{ConnectionId, DisplayName, MessagePusher, PresenceRegistry, User};

use super::{
    error::RelayError,
    presence::{PresenceBroadcast, PresenceLock, announce},
};

pub struct JoinUserUseCase {
    registry: Arc<dyn PresenceRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    presence_lock: PresenceLock,
}

impl JoinUserUseCase {
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

    /// Record (or rename) the user of `connection_id` and send the updated
    /// snapshot, encoded by `encode`, to every open connection.
    ///
    /// # Returns
    ///
    /// * `Ok(broadcast)` - the snapshot after the update and who received it
    /// * `Err(RelayError::BroadcastFailed)` - the user is registered but the
    ///   snapshot could not be sent
    pub async fn execute<F>(
        &self,
        connection_id: ConnectionId,
        name: DisplayName,
        encode: F,
    ) -> Result<PresenceBroadcast, RelayError>
    where
        F: FnOnce(&[User]) -> Option<String>,
    {
        let _presence = self.presence_lock.acquire().await;

        if let Some(previous) = self.registry.join(User::new(connection_id, name)).await {
            tracing::info!(
                "Connection '{}' re-joined, replacing name '{}'",
                connection_id,
                previous.name
            );
        }
        let snapshot = self.registry.snapshot().await;
        let targets = announce(self.message_pusher.as_ref(), &snapshot, encode).await?;
        Ok(PresenceBroadcast { snapshot, targets })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::MockMessagePusher,
        infrastructure::{
            message_pusher::WebSocketMessagePusher, registry::InMemoryPresenceRegistry,
        },
    };
    use tokio::sync::mpsc;

    fn name(value: &str) -> DisplayName {
        DisplayName::new(value.to_string()).unwrap()
    }

    fn names(users: &[User]) -> Option<String> {
        Some(
            users
                .iter()
                .map(|u| u.name.as_str())
                .collect::<Vec<_>>()
                .join(","),
        )
    }

    fn usecase(pusher: Arc<dyn MessagePusher>) -> JoinUserUseCase {
        JoinUserUseCase::new(
            Arc::new(InMemoryPresenceRegistry::new()),
            pusher,
            PresenceLock::new(),
        )
    }

    #[tokio::test]
    async fn test_join_returns_updated_snapshot() {
        // given:
        let usecase = usecase(Arc::new(WebSocketMessagePusher::new()));
        let alice = ConnectionId::generate();
        let bob = ConnectionId::generate();

        // when:
        usecase.execute(alice, name("Alice"), names).await.unwrap();
        let result = usecase.execute(bob, name("Bob"), names).await.unwrap();

        // then:
        let joined: Vec<&str> = result.snapshot.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(joined, vec!["Alice", "Bob"]);
    }

    #[tokio::test]
    async fn test_rejoin_keeps_single_entry() {
        // given:
        let usecase = usecase(Arc::new(WebSocketMessagePusher::new()));
        let alice = ConnectionId::generate();
        usecase.execute(alice, name("Alice"), names).await.unwrap();

        // when:
        let result = usecase.execute(alice, name("Alice"), names).await.unwrap();

        // then:
        assert_eq!(result.snapshot.len(), 1);
    }

    #[tokio::test]
    async fn test_snapshot_reaches_every_connection() {
        // given: one joining connection and one that has not joined yet
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let joined = ConnectionId::generate();
        let lurker = ConnectionId::generate();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        pusher.register_client(joined, tx1).await;
        pusher.register_client(lurker, tx2).await;
        let usecase = usecase(pusher);

        // when:
        let result = usecase.execute(joined, name("Alice"), names).await.unwrap();

        // then:
        assert_eq!(result.targets.len(), 2);
        assert_eq!(rx1.recv().await, Some("Alice".to_string()));
        assert_eq!(rx2.recv().await, Some("Alice".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_includes_the_joiner() {
        // given:
        let joiner = ConnectionId::generate();
        let other = ConnectionId::generate();
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_connected_ids()
            .returning(move || vec![joiner, other]);
        pusher
            .expect_broadcast()
            .withf(move |targets, message| targets == &vec![joiner, other] && message == "Alice")
            .times(1)
            .returning(|_, _| Ok(()));
        let usecase = usecase(Arc::new(pusher));

        // when:
        let result = usecase.execute(joiner, name("Alice"), names).await;

        // then:
        assert_eq!(result.map(|b| b.targets), Ok(vec![joiner, other]));
    }

    #[tokio::test]
    async fn test_failed_encoding_registers_without_sending() {
        // given:
        let mut pusher = MockMessagePusher::new();
        pusher.expect_connected_ids().never();
        pusher.expect_broadcast().never();
        let usecase = usecase(Arc::new(pusher));

        // when:
        let result = usecase
            .execute(ConnectionId::generate(), name("Alice"), |_| None)
            .await
            .unwrap();

        // then:
        assert_eq!(result.snapshot.len(), 1);
        assert!(result.targets.is_empty());
    }
}
