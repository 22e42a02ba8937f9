//! Shared application state.

use std::sync::Arc;

use crate::{
    config::ServerConfig,
    domain::{MessagePusher, PresenceRegistry},
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, GetOnlineUsersUseCase,
        JoinUserUseCase, PresenceLock, SendMessageUseCase, SendTypingUseCase,
    },
};

/// State handed to every handler.
///
/// All use cases share the one registry and the one pusher created at
/// startup. Use cases that change presence also share one lock.
pub struct AppState {
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    pub join_user_usecase: Arc<JoinUserUseCase>,
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    pub send_message_usecase: Arc<SendMessageUseCase>,
    pub send_typing_usecase: Arc<SendTypingUseCase>,
    pub get_online_users_usecase: Arc<GetOnlineUsersUseCase>,
    /// Largest WebSocket message accepted from a client
    pub max_frame_bytes: usize,
}

impl AppState {
    pub fn new(
        registry: Arc<dyn PresenceRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        config: &ServerConfig,
    ) -> Self {
        let presence_lock = PresenceLock::new();

        Self {
            connect_participant_usecase: Arc::new(ConnectParticipantUseCase::new(
                registry.clone(),
                message_pusher.clone(),
                presence_lock.clone(),
            )),
            join_user_usecase: Arc::new(JoinUserUseCase::new(
                registry.clone(),
                message_pusher.clone(),
                presence_lock.clone(),
            )),
            disconnect_participant_usecase: Arc::new(DisconnectParticipantUseCase::new(
                registry.clone(),
                message_pusher.clone(),
                presence_lock.clone(),
            )),
            send_message_usecase: Arc::new(SendMessageUseCase::new(
                message_pusher.clone(),
                config.max_file_bytes,
            )),
            send_typing_usecase: Arc::new(SendTypingUseCase::new(message_pusher)),
            get_online_users_usecase: Arc::new(GetOnlineUsersUseCase::new(registry)),
            max_frame_bytes: config.max_frame_bytes(),
        }
    }
}
