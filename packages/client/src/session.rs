//! WebSocket client session management.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use futures_util::{SinkExt, StreamExt};
use relaychat_server::infrastructure::dto::websocket::{
    ClientEvent, MessagePayload, ServerEvent, UserPayload,
};
use relaychat_shared::time::{Clock, SystemClock};
use rustyline::{Editor, error::ReadlineError, history::DefaultHistory};
use tokio::{
    sync::{Mutex, mpsc},
    task::{JoinError, JoinHandle},
};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::{
    attachment::{AttachmentStore, ReceivedAttachment, load_file},
    domain::{Command, HELP_TEXT, build_file_message, build_text_message, parse_command},
    error::ClientError,
    formatter::MessageFormatter,
    render::{AttachmentView, attachment_view},
    typing::TypingIndicator,
    ui::{InputEvent, TypingHelper, redisplay_prompt},
};

/// How often an expired typing indicator is looked for
const TYPING_EXPIRY_TICK: Duration = Duration::from_millis(250);

/// What one input line amounts to
#[derive(Debug, Clone, PartialEq, Eq)]
enum LineOutcome {
    /// Send this message to the server
    Send(MessagePayload),
    /// Show this text locally
    Print(String),
    /// Nothing to do
    Ignore,
    Quit,
}

/// Everything the client has seen in this session.
///
/// Server frames and input lines are turned into text to print here; the
/// session tasks only move bytes and print.
struct ChatView {
    own_name: String,
    users: Vec<UserPayload>,
    attachments: AttachmentStore,
    typing: TypingIndicator,
}

impl ChatView {
    fn new(own_name: &str) -> Self {
        Self {
            own_name: own_name.to_string(),
            users: Vec::new(),
            attachments: AttachmentStore::new(),
            typing: TypingIndicator::default(),
        }
    }

    /// Apply one server frame received at `now`; returns what to print
    fn on_frame(&mut self, text: &str, now: Instant) -> Option<String> {
        let event = match ServerEvent::from_json(text) {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!("Unrecognised frame: {}", e);
                return Some(MessageFormatter::format_raw_message(text));
            }
        };

        match event {
            ServerEvent::OnlineUsers(users) => {
                let rendered = MessageFormatter::format_online_users(&users, &self.own_name);
                self.users = users;
                Some(rendered)
            }
            ServerEvent::ReceiveMessage(message) => {
                let attachment = self.store_attachment(&message);
                Some(MessageFormatter::format_chat_message(
                    &message,
                    &self.own_name,
                    attachment,
                ))
            }
            ServerEvent::Typing(name) => {
                if name == self.own_name || !self.typing.notice(&name, now) {
                    return None;
                }
                Some(MessageFormatter::format_typing(&name))
            }
        }
    }

    /// Clear the typing indicator if it ran out by `now`
    fn on_tick(&mut self, now: Instant) -> Option<String> {
        self.typing
            .expire(now)
            .map(|name| MessageFormatter::format_typing_stopped(&name))
    }

    fn store_attachment(&mut self, message: &MessagePayload) -> Option<(AttachmentView, usize)> {
        let presentation = attachment_view(message)?;
        let attachment = ReceivedAttachment::from_message(message)?;
        Some((presentation, self.attachments.push(attachment)))
    }

    fn on_line(&self, line: &str, clock: &dyn Clock) -> LineOutcome {
        let command = match parse_command(line) {
            Ok(Some(command)) => command,
            Ok(None) => return LineOutcome::Ignore,
            Err(e) => return LineOutcome::Print(format!("{}\n", e)),
        };

        match command {
            Command::Say(text) => LineOutcome::Send(build_text_message(&self.own_name, text, clock)),
            Command::SendFile(path) => match load_file(&path) {
                Ok(file) => LineOutcome::Send(build_file_message(&self.own_name, file, clock)),
                Err(e) => LineOutcome::Print(format!("Cannot send '{}': {}\n", path.display(), e)),
            },
            Command::Save { index, dir } => match self.attachments.save(index, &dir) {
                Ok(path) => LineOutcome::Print(MessageFormatter::format_saved(&path)),
                Err(e) => LineOutcome::Print(format!("{}\n", e)),
            },
            Command::Users => LineOutcome::Print(MessageFormatter::format_online_users(
                &self.users,
                &self.own_name,
            )),
            Command::Help => LineOutcome::Print(format!("{}\n", HELP_TEXT)),
            Command::Quit => LineOutcome::Quit,
        }
    }
}

/// Run one chat session until the user quits or the connection drops
pub async fn run_client_session(url: &str, name: &str) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to chat server!");
    println!(
        "\nYou are '{}'. Type messages and press Enter to send, /help for commands.\n",
        name
    );

    let (mut write, mut read) = ws_stream.split();

    let join = ClientEvent::Join(name.to_string()).to_json()?;
    write
        .send(Message::Text(join.into()))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    let view = Arc::new(Mutex::new(ChatView::new(name)));

    // Spawn a task to handle incoming events
    let name_for_read = name.to_string();
    let view_for_read = view.clone();
    let mut read_task: JoinHandle<Result<(), ClientError>> = tokio::spawn(async move {
        let mut expiry = tokio::time::interval(TYPING_EXPIRY_TICK);

        loop {
            let output = tokio::select! {
                frame = read.next() => {
                    let Some(frame) = frame else {
                        return Err(ClientError::ConnectionError("Connection lost".to_string()));
                    };
                    match frame {
                        Ok(Message::Text(text)) => {
                            view_for_read.lock().await.on_frame(text.as_str(), Instant::now())
                        }
                        Ok(Message::Close(_)) => {
                            tracing::info!("Server closed the connection");
                            return Err(ClientError::ConnectionError("Connection closed".to_string()));
                        }
                        Ok(_) => None,
                        Err(e) => {
                            tracing::warn!("WebSocket read error: {}", e);
                            return Err(ClientError::ConnectionError(e.to_string()));
                        }
                    }
                }
                _ = expiry.tick() => view_for_read.lock().await.on_tick(Instant::now()),
            };

            if let Some(output) = output {
                print!("{}", output);
                redisplay_prompt(&name_for_read);
            }
        }
    });

    // Spawn a blocking thread for rustyline (synchronous readline)
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<InputEvent>();
    let prompt = format!("{}> ", name);
    std::thread::spawn(move || read_input_lines(prompt, input_tx));

    // Spawn a task that turns input into outgoing frames
    let name_for_write = name.to_string();
    let view_for_write = view.clone();
    let mut write_task = tokio::spawn(async move {
        let clock = SystemClock;

        while let Some(input) = input_rx.recv().await {
            let event = match input {
                InputEvent::Typing => ClientEvent::Typing(name_for_write.clone()),
                InputEvent::Line(line) => {
                    let outcome = view_for_write.lock().await.on_line(&line, &clock);
                    match outcome {
                        LineOutcome::Send(message) => ClientEvent::SendMessage(message),
                        LineOutcome::Print(output) => {
                            print!("{}", output);
                            redisplay_prompt(&name_for_write);
                            continue;
                        }
                        LineOutcome::Ignore => continue,
                        LineOutcome::Quit => break,
                    }
                }
            };

            let json = match event.to_json() {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize event: {}", e);
                    continue;
                }
            };

            if let Err(e) = write.send(Message::Text(json.into())).await {
                tracing::warn!("Failed to send: {}", e);
                return Err(ClientError::ConnectionError(e.to_string()));
            }
        }

        write.close().await.ok();
        Ok(())
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            flatten(read_result)
        }
        write_result = &mut write_task => {
            read_task.abort();
            flatten(write_result)
        }
    }
}

fn flatten(result: Result<Result<(), ClientError>, JoinError>) -> Result<(), ClientError> {
    result.map_err(|e| ClientError::ConnectionError(e.to_string()))?
}

/// Blocking readline loop; ends on Ctrl+C, Ctrl+D or when the session is gone
fn read_input_lines(prompt: String, events: mpsc::UnboundedSender<InputEvent>) {
    let mut rl: Editor<TypingHelper, DefaultHistory> = match Editor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Failed to initialize readline: {}", e);
            return;
        }
    };
    rl.set_helper(Some(TypingHelper::new(events.clone())));

    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line).ok();
                if events.send(InputEvent::Line(line.to_string())).is_err() {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                tracing::info!("Interrupted");
                events.send(InputEvent::Line("/quit".to_string())).ok();
                break;
            }
            Err(ReadlineError::Eof) => {
                tracing::info!("EOF");
                events.send(InputEvent::Line("/quit".to_string())).ok();
                break;
            }
            Err(err) => {
                tracing::error!("Readline error: {}", err);
                break;
            }
        }
    }
}
