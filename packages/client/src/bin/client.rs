//! relaychat terminal client.
//!
//! Joins the chat under a display name, prints messages, presence and
//! typing notices, and sends whatever is typed at the prompt.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin relaychat-client -- --name Alice
//! cargo run --bin relaychat-client -- -n Bob -u ws://127.0.0.1:3000/api/socket
//! ```

use clap::Parser;

use relaychat_client::run_client_session;
use relaychat_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "relaychat-client")]
#[command(about = "Terminal client for the relaychat server", long_about = None)]
struct Args {
    /// Display name shown to other users
    #[arg(short = 'n', long)]
    name: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:3000/api/socket")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if args.name.trim().is_empty() {
        eprintln!("--name must not be blank");
        std::process::exit(2);
    }

    if let Err(e) = run_client_session(&args.url, args.name.trim()).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
