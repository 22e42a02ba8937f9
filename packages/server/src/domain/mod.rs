//! Domain layer: entities, value objects and the interfaces the use cases
//! depend on.

pub mod entity;
pub mod error;
pub mod pusher;
pub mod registry;
pub mod service;
pub mod value_object;

pub use entity::{ChatMessage, User};
pub use error::{DisplayNameError, MessagePushError};
pub use pusher::{MessagePusher, PusherChannel};
pub use registry::PresenceRegistry;
pub use value_object::{ConnectionId, DisplayName};

#[cfg(test)]
pub use pusher::MockMessagePusher;
