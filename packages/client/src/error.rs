//! Error types for the chat client.

use relaychat_server::infrastructure::dto::websocket::ProtocolError;
use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Could not connect, or the connection was lost
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// A frame could not be encoded or decoded
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The input line is not a valid command
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// An attachment could not be read, decoded or saved
    #[error("Attachment error: {0}")]
    Attachment(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
