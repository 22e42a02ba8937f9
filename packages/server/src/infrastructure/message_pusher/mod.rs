//! Outbound delivery implementations.

pub mod websocket;

pub use websocket::WebSocketMessagePusher;
