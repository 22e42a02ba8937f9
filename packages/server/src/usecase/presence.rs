//! Ordering of presence announcements.
//!
//! Every change to presence and the online-users frame announcing it happen
//! under one lock, so connections see snapshots in the order the registry
//! produced them and a departed user is never re-announced.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::domain::{ConnectionId, MessagePusher, User, service::broadcast_targets};

use super::error::RelayError;

/// Lock shared by every use case that changes or announces presence
#[derive(Clone, Default)]
pub struct PresenceLock(Arc<Mutex<()>>);

impl PresenceLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) async fn acquire(&self) -> MutexGuard<'_, ()> {
        self.0.lock().await
    }
}

/// A presence snapshot and the connections it was sent to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceBroadcast {
    pub snapshot: Vec<User>,
    pub targets: Vec<ConnectionId>,
}

/// Encode `snapshot` and hand it to every open connection.
///
/// Callers hold the [`PresenceLock`]. An encoder returning `None` sends
/// nothing.
pub(super) async fn announce<F>(
    message_pusher: &dyn MessagePusher,
    snapshot: &[User],
    encode: F,
) -> Result<Vec<ConnectionId>, RelayError>
where
    F: FnOnce(&[User]) -> Option<String>,
{
    let Some(message) = encode(snapshot) else {
        return Ok(Vec::new());
    };

    let targets = broadcast_targets(message_pusher.connected_ids().await, None);
    message_pusher.broadcast(targets.clone(), &message).await?;
    Ok(targets)
}
