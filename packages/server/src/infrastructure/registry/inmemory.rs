//! In-memory presence registry.
//!
//! Users are kept in a `Vec` so snapshots come out in join order. The list
//! is small (one entry per joined connection), so lookups are linear.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, PresenceRegistry, User};

/// Presence registry backed by a mutex-guarded list.
///
/// Created once at server startup and shared through the application state.
#[derive(Default)]
pub struct InMemoryPresenceRegistry {
    users: Mutex<Vec<User>>,
}

impl InMemoryPresenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PresenceRegistry for InMemoryPresenceRegistry {
    async fn join(&self, user: User) -> Option<User> {
        let mut users = self.users.lock().await;
        match users.iter_mut().find(|existing| existing.id == user.id) {
            Some(existing) => {
                tracing::debug!(
                    "Connection '{}' re-joined as '{}' (was '{}')",
                    user.id,
                    user.name,
                    existing.name
                );
                Some(std::mem::replace(existing, user))
            }
            None => {
                tracing::debug!("Connection '{}' joined as '{}'", user.id, user.name);
                users.push(user);
                None
            }
        }
    }

    async fn remove(&self, id: &ConnectionId) -> Option<User> {
        let mut users = self.users.lock().await;
        let index = users.iter().position(|user| &user.id == id)?;
        let removed = users.remove(index);
        tracing::debug!("Connection '{}' ('{}') left", removed.id, removed.name);
        Some(removed)
    }

    async fn snapshot(&self) -> Vec<User> {
        self.users.lock().await.clone()
    }

    async fn count(&self) -> usize {
        self.users.lock().await.len()
    }
}
