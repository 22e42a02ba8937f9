//! UseCase: read the presence snapshot (HTTP API).

use std::sync::Arc;

use crate::domain::{PresenceRegistry, User};

pub struct GetOnlineUsersUseCase {
    registry: Arc<dyn PresenceRegistry>,
}

impl GetOnlineUsersUseCase {
    pub fn new(registry: Arc<dyn PresenceRegistry>) -> Self {
        Self { registry }
    }

    pub async fn execute(&self) -> Vec<User> {
        self.registry.snapshot().await
    }
}
