//! Entities.

use super::value_object::{ConnectionId, DisplayName};

/// A joined user. Lives exactly as long as its connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: ConnectionId,
    pub name: DisplayName,
}

impl User {
    pub fn new(id: ConnectionId, name: DisplayName) -> Self {
        Self { id, name }
    }
}

/// A chat message in transit. Never stored.
///
/// `user` is whatever name the sender put on the message; the relay does
/// not rewrite it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub user: String,
    pub text: Option<String>,
    pub file_name: Option<String>,
    pub file_type: Option<String>,
    /// Base64-encoded file content
    pub file_data: Option<String>,
    pub time: String,
}

impl ChatMessage {
    /// Encoded length of the attached file, 0 when there is none
    pub fn file_size(&self) -> usize {
        self.file_data.as_ref().map_or(0, String::len)
    }

    pub fn has_file(&self) -> bool {
        self.file_data.is_some()
    }
}
