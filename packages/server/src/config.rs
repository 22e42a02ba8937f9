//! Server configuration.
//!
//! Parsed from the command line by the `relaychat-server` binary.

use clap::Args;

/// Default cap on the encoded `fileData` of a single message (5 MiB)
pub const DEFAULT_MAX_FILE_BYTES: usize = 5 * 1024 * 1024;

/// Room left in a frame for the event envelope and the non-file fields
pub const FRAME_OVERHEAD_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct ServerConfig {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value_t = 3000)]
    pub port: u16,

    /// Largest accepted file payload, counted in base64-encoded bytes
    #[arg(long, default_value_t = DEFAULT_MAX_FILE_BYTES)]
    pub max_file_bytes: usize,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Largest WebSocket message accepted from a client
    pub fn max_frame_bytes(&self) -> usize {
        self.max_file_bytes.saturating_add(FRAME_OVERHEAD_BYTES)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }
}
