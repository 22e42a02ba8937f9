//! Relay server for relaychat.
//!
//! Tracks which users are online and relays chat messages, typing notices
//! and presence snapshots between WebSocket connections.

// layers
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
