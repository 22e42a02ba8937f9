//! Message formatting utilities for client display.

use std::path::Path;

use relaychat_server::infrastructure::dto::websocket::{MessagePayload, UserPayload};

use crate::{attachment::decoded_len, domain::is_own_message, render::AttachmentView};

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the online-users list, marking the local user
    pub fn format_online_users(users: &[UserPayload], own_name: &str) -> String {
        if users.is_empty() {
            return "\n* Online: (nobody)\n".to_string();
        }

        let names: Vec<String> = users
            .iter()
            .map(|user| {
                if user.name == own_name {
                    format!("[{}]", user.name)
                } else {
                    user.name.clone()
                }
            })
            .collect();
        format!("\n* Online ({}): {}\n", users.len(), names.join(", "))
    }

    /// Format a relayed chat message.
    ///
    /// # Arguments
    ///
    /// * `message` - The relayed message
    /// * `own_name` - This client's display name, to mark own messages
    /// * `attachment` - How to present the file payload and the number it
    ///   was stored under, if the message has one
    pub fn format_chat_message(
        message: &MessagePayload,
        own_name: &str,
        attachment: Option<(AttachmentView, usize)>,
    ) -> String {
        let sender = if is_own_message(message, own_name) {
            format!("{} (me)", message.user)
        } else {
            message.user.clone()
        };

        let mut output = format!("\n[{}] {}:", message.time, sender);
        if let Some(text) = &message.text {
            output.push(' ');
            output.push_str(text);
        }
        output.push('\n');

        if let Some((view, index)) = attachment {
            output.push_str(&Self::format_attachment(message, view, index));
        }
        output
    }

    fn format_attachment(message: &MessagePayload, view: AttachmentView, index: usize) -> String {
        let name = message.file_name.as_deref().unwrap_or("(unnamed)");
        let file_type = message
            .file_type
            .as_deref()
            .unwrap_or("application/octet-stream");
        let size = message.file_data.as_deref().map_or(0, decoded_len);

        match view {
            AttachmentView::InlineImage => format!(
                "    [image #{}] {} ({}, {} bytes)\n",
                index, name, file_type, size
            ),
            AttachmentView::DownloadLink => format!(
                "    [file #{}] {} ({}, {} bytes) - /save {} to download\n",
                index, name, file_type, size, index
            ),
        }
    }

    /// Format a typing indicator
    pub fn format_typing(name: &str) -> String {
        format!("\n{} is typing...\n", name)
    }

    /// Format the line shown when a typing indicator runs out
    pub fn format_typing_stopped(name: &str) -> String {
        format!("\n({} stopped typing)\n", name)
    }

    /// Format the confirmation after saving an attachment
    pub fn format_saved(path: &Path) -> String {
        format!("Saved to {}\n", path.display())
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n<- Received: {}\n", text)
    }
}
