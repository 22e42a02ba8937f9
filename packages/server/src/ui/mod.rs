//! UI layer: axum router, request handlers and shared application state.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::{SOCKET_PATH, Server};
pub use state::AppState;
