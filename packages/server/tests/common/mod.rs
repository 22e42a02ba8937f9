//! Shared helpers for the server integration tests.

#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use relaychat_server::{
    config::ServerConfig,
    infrastructure::{
        dto::websocket::{ClientEvent, MessagePayload, ServerEvent, UserPayload},
        message_pusher::WebSocketMessagePusher,
        registry::InMemoryPresenceRegistry,
    },
    ui::{AppState, SOCKET_PATH, Server},
};
use tokio::{net::TcpStream, task::JoinHandle};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

const EVENT_TIMEOUT: Duration = Duration::from_secs(2);

/// A server bound to an ephemeral local port
pub struct TestServer {
    pub addr: std::net::SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(ServerConfig::default()).await
    }

    pub async fn start_with(config: ServerConfig) -> Self {
        let state = AppState::new(
            Arc::new(InMemoryPresenceRegistry::new()),
            Arc::new(WebSocketMessagePusher::new()),
            &config,
        );
        let app = Server::new(state, config).into_router();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });
        Self { addr, handle }
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}{}", self.addr, SOCKET_PATH)
    }

    pub fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// One WebSocket client
pub struct TestClient {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    /// Connect and consume the presence snapshot sent on open
    pub async fn connect(server: &TestServer) -> Self {
        let (ws, _) = connect_async(server.ws_url()).await.expect("connect");
        let mut client = Self { ws };
        match client.next_event().await {
            Some(ServerEvent::OnlineUsers(_)) => {}
            other => panic!("expected initial online-users, got {:?}", other),
        }
        client
    }

    pub async fn send(&mut self, event: ClientEvent) {
        let json = event.to_json().expect("encode");
        self.ws.send(Message::Text(json.into())).await.expect("send");
    }

    /// Send a frame as-is, bypassing the encoder
    pub async fn send_raw(&mut self, text: &str) {
        self.ws
            .send(Message::Text(text.to_string().into()))
            .await
            .expect("send");
    }

    pub async fn join(&mut self, name: &str) {
        self.send(ClientEvent::Join(name.to_string())).await;
    }

    /// Next server event, or `None` on timeout or close
    pub async fn next_event(&mut self) -> Option<ServerEvent> {
        loop {
            let frame = tokio::time::timeout(EVENT_TIMEOUT, self.ws.next())
                .await
                .ok()??;
            match frame.ok()? {
                Message::Text(text) => {
                    return Some(ServerEvent::from_json(text.as_str()).expect("decode"));
                }
                Message::Close(_) => return None,
                _ => continue,
            }
        }
    }

    /// Skip events until one matches `accept`
    pub async fn wait_for<F>(&mut self, mut accept: F) -> ServerEvent
    where
        F: FnMut(&ServerEvent) -> bool,
    {
        loop {
            match self.next_event().await {
                Some(event) if accept(&event) => return event,
                Some(_) => continue,
                None => panic!("connection ended before the expected event"),
            }
        }
    }

    /// Wait for an online-users event whose names equal `expected` (any order)
    pub async fn wait_for_users(&mut self, expected: &[&str]) -> Vec<UserPayload> {
        let mut expected: Vec<&str> = expected.to_vec();
        expected.sort_unstable();
        let event = self
            .wait_for(|event| match event {
                ServerEvent::OnlineUsers(users) => {
                    let mut names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
                    names.sort_unstable();
                    names == expected
                }
                _ => false,
            })
            .await;
        match event {
            ServerEvent::OnlineUsers(users) => users,
            _ => unreachable!(),
        }
    }

    /// Assert nothing arrives within `window`
    pub async fn expect_silence(&mut self, window: Duration) {
        if let Ok(Some(Ok(Message::Text(text)))) =
            tokio::time::timeout(window, self.ws.next()).await
        {
            panic!("unexpected frame: {}", text);
        }
    }

    pub async fn close(mut self) {
        self.ws.close(None).await.ok();
    }
}

pub fn text_message(user: &str, text: &str) -> MessagePayload {
    MessagePayload {
        user: user.to_string(),
        text: Some(text.to_string()),
        file_name: None,
        file_type: None,
        file_data: None,
        time: "10:42".to_string(),
    }
}
