//! Terminal chat client for relaychat.
//!
//! Connects to the relay over WebSocket, joins under a display name and
//! renders messages, presence and typing notices in the terminal.

pub mod attachment;
pub mod domain;
pub mod error;
pub mod formatter;
pub mod render;
pub mod session;
pub mod typing;
pub mod ui;

pub use session::run_client_session;
