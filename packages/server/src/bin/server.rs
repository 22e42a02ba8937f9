//! relaychat server: presence tracking and message relay over WebSocket.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin relaychat-server
//! cargo run --bin relaychat-server -- --host 0.0.0.0 --port 8080 --max-file-bytes 1048576
//! ```

use std::sync::Arc;

use clap::Parser;
use relaychat_server::{
    config::ServerConfig,
    infrastructure::{message_pusher::WebSocketMessagePusher, registry::InMemoryPresenceRegistry},
    ui::{AppState, Server},
};
use relaychat_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "relaychat-server")]
#[command(about = "Realtime chat relay with online presence", long_about = None)]
struct Args {
    #[command(flatten)]
    config: ServerConfig,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Presence registry
    // 2. MessagePusher
    // 3. AppState (use cases)
    // 4. Server

    // 1. Create the presence registry (in-memory, lives as long as the server)
    let registry = Arc::new(InMemoryPresenceRegistry::new());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Wire the use cases
    let state = AppState::new(registry, message_pusher, &args.config);

    // 4. Create and run the server
    let server = Server::new(state, args.config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
