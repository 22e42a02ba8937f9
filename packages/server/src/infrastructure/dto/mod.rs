//! Data Transfer Objects.
//!
//! DTOs are organized by protocol:
//! - `websocket`: event frames exchanged on `/api/socket`
//! - `http`: HTTP API response bodies

pub mod conversion;
pub mod http;
pub mod websocket;
