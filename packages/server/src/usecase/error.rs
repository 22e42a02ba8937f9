//! UseCase error types.

use thiserror::Error;

use crate::domain::MessagePushError;

/// Errors raised while relaying an event
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// The attached file is larger than the configured cap
    #[error("file payload of {size} bytes exceeds the limit of {limit} bytes")]
    PayloadTooLarge { size: usize, limit: usize },

    #[error("broadcast failed: {0}")]
    BroadcastFailed(#[from] MessagePushError),
}
