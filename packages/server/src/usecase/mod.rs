//! UseCase layer: one type per server operation.
//!
//! Use cases talk to the domain traits only. Encoding frames is left to the
//! UI layer, which hands the use cases ready-to-send JSON.

mod connect_participant;
mod disconnect_participant;
mod error;
mod get_online_users;
mod join_user;
mod presence;
mod send_message;
mod send_typing;

pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::{DisconnectParticipantUseCase, Disconnected};
pub use error::RelayError;
pub use get_online_users::GetOnlineUsersUseCase;
pub use join_user::JoinUserUseCase;
pub use presence::{PresenceBroadcast, PresenceLock};
pub use send_message::SendMessageUseCase;
pub use send_typing::SendTypingUseCase;
