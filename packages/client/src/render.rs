//! How a received message is presented.

use relaychat_server::infrastructure::dto::websocket::MessagePayload;

/// Presentation of a message's file payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentView {
    /// Shown in place (`image/*` types)
    InlineImage,
    /// Offered for saving
    DownloadLink,
}

/// Pick the presentation for the file in `message`.
///
/// Returns `None` when the message carries no file payload. The decision
/// uses the declared `fileType` only.
pub fn attachment_view(message: &MessagePayload) -> Option<AttachmentView> {
    message.file_data.as_ref()?;

    match message.file_type.as_deref() {
        Some(file_type) if file_type.starts_with("image/") => Some(AttachmentView::InlineImage),
        _ => Some(AttachmentView::DownloadLink),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(file_type: Option<&str>, file_data: Option<&str>) -> MessagePayload {
        MessagePayload {
            user: "Alice".to_string(),
            text: None,
            file_name: Some("file".to_string()),
            file_type: file_type.map(str::to_string),
            file_data: file_data.map(str::to_string),
            time: "10:00".to_string(),
        }
    }

    #[test]
    fn test_png_is_shown_inline() {
        let msg = message(Some("image/png"), Some("iVBORw0KGgo="));
        assert_eq!(attachment_view(&msg), Some(AttachmentView::InlineImage));
    }

    #[test]
    fn test_non_image_is_a_download_link() {
        let msg = message(Some("application/pdf"), Some("JVBERi0="));
        assert_eq!(attachment_view(&msg), Some(AttachmentView::DownloadLink));
    }

    #[test]
    fn test_missing_type_is_a_download_link() {
        let msg = message(None, Some("aGk="));
        assert_eq!(attachment_view(&msg), Some(AttachmentView::DownloadLink));
    }

    #[test]
    fn test_text_only_message_has_no_attachment() {
        let msg = message(Some("image/png"), None);
        assert_eq!(attachment_view(&msg), None);
    }
}
