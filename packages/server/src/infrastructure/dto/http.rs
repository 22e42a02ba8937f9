//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::UserPayload;

/// Response of `GET /api/users`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnlineUsersDto {
    pub count: usize,
    pub users: Vec<UserPayload>,
}
