//! WebSocket event frames.
//!
//! Every frame is one JSON text message naming its event and carrying the
//! payload under `data`:
//!
//! ```json
//! {"event":"send-message","data":{"user":"Alice","text":"hi","time":"10:42"}}
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Frame could not be encoded or decoded
#[derive(Debug, Error)]
#[error("invalid event frame: {0}")]
pub struct ProtocolError(#[from] serde_json::Error);

/// Events a client sends to the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Register under a display name
    Join(String),
    /// Relay a message to everyone
    SendMessage(MessagePayload),
    /// Tell everyone else the named user is typing
    Typing(String),
}

/// Events the server sends to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    ReceiveMessage(MessagePayload),
    OnlineUsers(Vec<UserPayload>),
    Typing(String),
}

/// A chat message as it travels on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePayload {
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    /// Base64-encoded file content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_data: Option<String>,
    pub time: String,
}

/// One entry of the online-users list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    pub id: String,
    pub name: String,
}

impl ClientEvent {
    pub fn from_json(text: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl ServerEvent {
    pub fn from_json(text: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}
