//! Utilities shared by the relaychat server and client binaries.

pub mod logger;
pub mod time;
