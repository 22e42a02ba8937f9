//! Domain logic for client-side operations.
//!
//! Pure functions without side effects: input parsing and building outgoing
//! messages.

use std::path::PathBuf;

use relaychat_server::infrastructure::dto::websocket::MessagePayload;
use relaychat_shared::time::{Clock, message_time_now};

use crate::{attachment::OutgoingFile, error::ClientError};

pub const HELP_TEXT: &str = "\
Commands:
  <text>               send a message
  /file <path>         send a file
  /save <n> [dir]      save received attachment #n (default dir: .)
  /users               show who is online
  /help                show this help
  /quit                leave the chat";

/// What the user asked for on one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Say(String),
    SendFile(PathBuf),
    Save { index: usize, dir: PathBuf },
    Users,
    Help,
    Quit,
}

/// Parse one input line.
///
/// # Returns
///
/// * `Ok(None)` - blank line, nothing to do
/// * `Ok(Some(command))` - a command or a plain message
/// * `Err(ClientError::InvalidCommand)` - unknown command or bad arguments
pub fn parse_command(line: &str) -> Result<Option<Command>, ClientError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    if !line.starts_with('/') {
        return Ok(Some(Command::Say(line.to_string())));
    }

    let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let command = match name {
        "/file" if !rest.is_empty() => Command::SendFile(PathBuf::from(rest)),
        "/file" => return Err(ClientError::InvalidCommand("usage: /file <path>".to_string())),
        "/save" => parse_save(rest)?,
        "/users" => Command::Users,
        "/help" => Command::Help,
        "/quit" => Command::Quit,
        other => {
            return Err(ClientError::InvalidCommand(format!(
                "unknown command '{}', try /help",
                other
            )));
        }
    };
    Ok(Some(command))
}

fn parse_save(args: &str) -> Result<Command, ClientError> {
    let usage = || ClientError::InvalidCommand("usage: /save <n> [dir]".to_string());
    let (index, dir) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
    let index: usize = index.parse().map_err(|_| usage())?;
    if index == 0 {
        return Err(usage());
    }
    let dir = match dir.trim() {
        "" => PathBuf::from("."),
        dir => PathBuf::from(dir),
    };
    Ok(Command::Save { index, dir })
}

/// Whether a relayed message was sent by this client.
///
/// The relay echoes every message to its sender, so the `user` field is the
/// only way to tell.
pub fn is_own_message(message: &MessagePayload, own_name: &str) -> bool {
    message.user == own_name
}

pub fn build_text_message(own_name: &str, text: String, clock: &dyn Clock) -> MessagePayload {
    MessagePayload {
        user: own_name.to_string(),
        text: Some(text),
        file_name: None,
        file_type: None,
        file_data: None,
        time: message_time_now(clock),
    }
}

pub fn build_file_message(own_name: &str, file: OutgoingFile, clock: &dyn Clock) -> MessagePayload {
    MessagePayload {
        user: own_name.to_string(),
        text: None,
        file_name: Some(file.file_name),
        file_type: Some(file.file_type),
        file_data: Some(file.file_data),
        time: message_time_now(clock),
    }
}
