//! WebSocket connection handlers.
//!
//! Each connection runs two tasks: one decodes incoming frames and
//! dispatches them to the use cases, the other drains the connection's
//! outbound channel into the socket. When either ends, the other is aborted
//! and the connection is removed from presence.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{ChatMessage, ConnectionId, DisplayName, User},
    infrastructure::dto::{
        conversion::users_to_payload,
        websocket::{ClientEvent, MessagePayload, ServerEvent},
    },
    ui::state::AppState,
    usecase::{Disconnected, RelayError},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let connection_id = ConnectionId::generate();
    tracing::debug!("Upgrading connection '{}'", connection_id);

    ws.max_message_size(state.max_frame_bytes)
        .on_upgrade(move |socket| handle_socket(socket, state, connection_id))
}

/// Spawns a task that drains `rx` into the WebSocket sink.
///
/// Ends when the channel closes (the connection was unregistered) or the
/// socket refuses a write.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, connection_id: ConnectionId) {
    let (sender, mut receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();

    // Register for delivery and show the newcomer who is already online
    match state
        .connect_participant_usecase
        .execute(connection_id, tx, encode_online_users)
        .await
    {
        Ok(snapshot) => tracing::info!(
            "Connection '{}' opened, {} users online",
            connection_id,
            snapshot.len()
        ),
        Err(e) => tracing::warn!("Failed to send presence to '{}': {}", connection_id, e),
    }

    let mut send_task = pusher_loop(rx, sender);

    let state_for_recv = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => dispatch(&state_for_recv, connection_id, text.as_str()).await,
                Message::Binary(data) => {
                    tracing::debug!(
                        "Ignoring {} bytes of binary data from '{}'",
                        data.len(),
                        connection_id
                    );
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id);
                    break;
                }
                // ping/pong is answered by the protocol layer
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    handle_disconnect(&state, connection_id).await;
}

/// Decode one text frame and route it to the matching use case.
///
/// Undecodable frames are logged and dropped; the connection stays open.
pub(crate) async fn dispatch(state: &AppState, connection_id: ConnectionId, text: &str) {
    let event = match ClientEvent::from_json(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Dropping frame from '{}': {}", connection_id, e);
            return;
        }
    };

    match event {
        ClientEvent::Join(name) => handle_join(state, connection_id, name).await,
        ClientEvent::SendMessage(payload) => {
            handle_send_message(state, connection_id, payload).await
        }
        ClientEvent::Typing(name) => handle_typing(state, connection_id, name).await,
    }
}

async fn handle_join(state: &AppState, connection_id: ConnectionId, name: String) {
    let name = match DisplayName::new(name) {
        Ok(name) => name,
        Err(e) => {
            tracing::warn!("Rejected join from '{}': {}", connection_id, e);
            return;
        }
    };

    tracing::info!("Connection '{}' joined as '{}'", connection_id, name);
    match state
        .join_user_usecase
        .execute(connection_id, name, encode_online_users)
        .await
    {
        Ok(broadcast) => tracing::debug!(
            "Sent online-users to {} connections",
            broadcast.targets.len()
        ),
        Err(e) => tracing::warn!("Failed to broadcast online-users: {}", e),
    }
}

async fn handle_send_message(state: &AppState, connection_id: ConnectionId, payload: MessagePayload) {
    let message = ChatMessage::from(payload);
    let user = message.user.clone();

    let result = state
        .send_message_usecase
        .execute(message, |message| {
            encode_event(&ServerEvent::ReceiveMessage(MessagePayload::from(message)))
        })
        .await;
    match result {
        Ok(targets) => tracing::debug!(
            "Relayed message from '{}' ({}) to {} connections",
            user,
            connection_id,
            targets.len()
        ),
        Err(RelayError::PayloadTooLarge { size, limit }) => tracing::warn!(
            "Rejected message from '{}': file payload of {} bytes exceeds {} bytes",
            connection_id,
            size,
            limit
        ),
        Err(e) => tracing::warn!("Failed to relay message from '{}': {}", connection_id, e),
    }
}

async fn handle_typing(state: &AppState, connection_id: ConnectionId, name: String) {
    let Some(json) = encode_event(&ServerEvent::Typing(name)) else {
        return;
    };

    if let Err(e) = state
        .send_typing_usecase
        .execute(&connection_id, &json)
        .await
    {
        tracing::warn!("Failed to relay typing from '{}': {}", connection_id, e);
    }
}

async fn handle_disconnect(state: &AppState, connection_id: ConnectionId) {
    let result = state
        .disconnect_participant_usecase
        .execute(&connection_id, encode_online_users)
        .await;

    match result {
        Ok(Disconnected {
            removed: Some(user),
            ..
        }) => tracing::info!("'{}' ({}) disconnected", user.name, connection_id),
        Ok(Disconnected { removed: None, .. }) => {
            tracing::info!("Connection '{}' closed without joining", connection_id)
        }
        Err(e) => tracing::warn!(
            "Connection '{}' closed, failed to broadcast online-users: {}",
            connection_id,
            e
        ),
    }
}

fn encode_online_users(users: &[User]) -> Option<String> {
    encode_event(&ServerEvent::OnlineUsers(users_to_payload(users.to_vec())))
}

fn encode_event(event: &ServerEvent) -> Option<String> {
    match event.to_json() {
        Ok(json) => Some(json),
        Err(e) => {
            tracing::error!("Failed to encode server event: {}", e);
            None
        }
    }
}
