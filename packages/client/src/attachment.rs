//! File attachments: reading files to send, keeping received ones and
//! saving them to disk.

use std::path::{Path, PathBuf};

use base64::{Engine, engine::general_purpose::STANDARD};
use relaychat_server::infrastructure::dto::websocket::MessagePayload;

use crate::error::ClientError;

/// A local file encoded for sending
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingFile {
    pub file_name: String,
    pub file_type: String,
    /// Base64-encoded content
    pub file_data: String,
}

/// Read `path` and encode it for a `send-message` payload
pub fn load_file(path: &Path) -> Result<OutgoingFile, ClientError> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| ClientError::Attachment(format!("'{}' is not a file", path.display())))?
        .to_string();
    let bytes = std::fs::read(path)?;

    Ok(OutgoingFile {
        file_name,
        file_type: guess_mime_type(path).to_string(),
        file_data: STANDARD.encode(bytes),
    })
}

/// MIME type from the file extension, `application/octet-stream` if unknown
pub fn guess_mime_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("txt" | "log") => "text/plain",
        Some("md") => "text/markdown",
        Some("json") => "application/json",
        Some("pdf") => "application/pdf",
        Some("zip") => "application/zip",
        _ => "application/octet-stream",
    }
}

/// Approximate decoded size of a base64 payload
pub fn decoded_len(file_data: &str) -> usize {
    let padding = file_data.bytes().rev().take_while(|b| *b == b'=').count();
    (file_data.len() / 4 * 3).saturating_sub(padding)
}

/// A file received in a message, kept so the user can save it later
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedAttachment {
    pub file_name: Option<String>,
    pub file_type: Option<String>,
    pub file_data: String,
}

impl ReceivedAttachment {
    /// Take the file part out of a message, if it has one
    pub fn from_message(message: &MessagePayload) -> Option<Self> {
        Some(Self {
            file_name: message.file_name.clone(),
            file_type: message.file_type.clone(),
            file_data: message.file_data.clone()?,
        })
    }
}

/// Attachments received during this session, numbered from 1
#[derive(Debug, Default)]
pub struct AttachmentStore {
    items: Vec<ReceivedAttachment>,
}

impl AttachmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `attachment`; returns its number
    pub fn push(&mut self, attachment: ReceivedAttachment) -> usize {
        self.items.push(attachment);
        self.items.len()
    }

    pub fn get(&self, index: usize) -> Option<&ReceivedAttachment> {
        index.checked_sub(1).and_then(|i| self.items.get(i))
    }

    /// Decode attachment `index` and write it into `dir`.
    ///
    /// Only the final component of the sender's file name is used, so a
    /// name cannot point outside `dir`.
    pub fn save(&self, index: usize, dir: &Path) -> Result<PathBuf, ClientError> {
        let attachment = self
            .get(index)
            .ok_or_else(|| ClientError::Attachment(format!("no attachment #{}", index)))?;
        let bytes = STANDARD
            .decode(&attachment.file_data)
            .map_err(|e| ClientError::Attachment(format!("corrupt attachment #{}: {}", index, e)))?;

        let file_name = attachment
            .file_name
            .as_deref()
            .and_then(|name| Path::new(name).file_name())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(format!("attachment-{}", index)));

        std::fs::create_dir_all(dir)?;
        let path = dir.join(file_name);
        std::fs::write(&path, bytes)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_mime_type() {
        assert_eq!(guess_mime_type(Path::new("cat.PNG")), "image/png");
        assert_eq!(guess_mime_type(Path::new("a/b/photo.jpeg")), "image/jpeg");
        assert_eq!(guess_mime_type(Path::new("report.pdf")), "application/pdf");
        assert_eq!(guess_mime_type(Path::new("Makefile")), "application/octet-stream");
    }

    #[test]
    fn test_decoded_len_accounts_for_padding() {
        assert_eq!(decoded_len("aGVsbG8="), 5);
        assert_eq!(decoded_len("aGk="), 2);
        assert_eq!(decoded_len("aGV5"), 3);
        assert_eq!(decoded_len(""), 0);
    }

    #[test]
    fn test_load_file_encodes_content() {
        // given:
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.txt");
        std::fs::write(&path, b"hello").unwrap();

        // when:
        let file = load_file(&path).unwrap();

        // then:
        assert_eq!(file.file_name, "hello.txt");
        assert_eq!(file.file_type, "text/plain");
        assert_eq!(file.file_data, "aGVsbG8=");
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = load_file(Path::new("/definitely/not/here.png"));
        assert!(matches!(result, Err(ClientError::Io(_))));
    }

    #[test]
    fn test_received_attachment_requires_file_data() {
        // given:
        let mut message = MessagePayload {
            user: "Bob".to_string(),
            text: Some("see attached".to_string()),
            file_name: Some("notes.txt".to_string()),
            file_type: None,
            file_data: None,
            time: "10:00".to_string(),
        };

        // when / then:
        assert_eq!(ReceivedAttachment::from_message(&message), None);
        message.file_data = Some("aGk=".to_string());
        assert!(ReceivedAttachment::from_message(&message).is_some());
    }

    #[test]
    fn test_save_writes_decoded_bytes() {
        // given:
        let dir = tempfile::tempdir().unwrap();
        let mut store = AttachmentStore::new();
        let index = store.push(ReceivedAttachment {
            file_name: Some("greeting.txt".to_string()),
            file_type: Some("text/plain".to_string()),
            file_data: "aGVsbG8=".to_string(),
        });

        // when:
        let path = store.save(index, dir.path()).unwrap();

        // then:
        assert_eq!(index, 1);
        assert_eq!(path, dir.path().join("greeting.txt"));
        assert_eq!(std::fs::read(&path).unwrap(), b"hello");
    }

    #[test]
    fn test_save_strips_directories_from_sender_file_name() {
        // given:
        let dir = tempfile::tempdir().unwrap();
        let mut store = AttachmentStore::new();
        store.push(ReceivedAttachment {
            file_name: Some("../../etc/evil.txt".to_string()),
            file_type: None,
            file_data: "aGk=".to_string(),
        });

        // when:
        let path = store.save(1, dir.path()).unwrap();

        // then:
        assert_eq!(path, dir.path().join("evil.txt"));
    }

    #[test]
    fn test_save_unknown_index_fails() {
        let store = AttachmentStore::new();
        assert!(matches!(
            store.save(1, Path::new(".")),
            Err(ClientError::Attachment(_))
        ));
        assert!(store.get(0).is_none());
    }

    #[test]
    fn test_save_corrupt_payload_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = AttachmentStore::new();
        store.push(ReceivedAttachment {
            file_name: None,
            file_type: None,
            file_data: "***".to_string(),
        });
        assert!(matches!(
            store.save(1, dir.path()),
            Err(ClientError::Attachment(_))
        ));
    }
}
