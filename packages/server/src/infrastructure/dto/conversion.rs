//! Conversion logic between DTOs and domain entities.

use crate::domain::entity::{ChatMessage, User};
use crate::infrastructure::dto::websocket::{MessagePayload, UserPayload};

// ========================================
// DTO → Domain Entity
// ========================================

impl From<MessagePayload> for ChatMessage {
    fn from(dto: MessagePayload) -> Self {
        Self {
            user: dto.user,
            text: dto.text,
            file_name: dto.file_name,
            file_type: dto.file_type,
            file_data: dto.file_data,
            time: dto.time,
        }
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<ChatMessage> for MessagePayload {
    fn from(model: ChatMessage) -> Self {
        Self {
            user: model.user,
            text: model.text,
            file_name: model.file_name,
            file_type: model.file_type,
            file_data: model.file_data,
            time: model.time,
        }
    }
}

impl From<User> for UserPayload {
    fn from(model: User) -> Self {
        Self {
            id: model.id.to_string(),
            name: model.name.into_string(),
        }
    }
}

/// Convert a presence snapshot into its wire form
pub fn users_to_payload(users: Vec<User>) -> Vec<UserPayload> {
    users.into_iter().map(UserPayload::from).collect()
}
