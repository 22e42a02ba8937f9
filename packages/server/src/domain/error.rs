//! Domain error types.

use thiserror::Error;

/// Errors raised when building a [`DisplayName`](super::DisplayName)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisplayNameError {
    #[error("display name must not be empty")]
    Empty,
}

/// Errors raised while delivering a payload to connections
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// No outbound channel is registered for the connection
    #[error("connection '{0}' is not registered")]
    ClientNotFound(String),

    /// The outbound channel exists but is closed
    #[error("failed to push message: {0}")]
    PushFailed(String),
}
