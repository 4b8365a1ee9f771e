use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ChatLogError;
use crate::schema::{Message, Sender};

/// Ordered, append-only record of exchanged turns, mirrored to one durable
/// file on every mutation. The in-memory sequence and the persisted payload
/// never diverge observably: a failed write rolls the append back, and
/// `clear` erases the file before the sequence.
pub struct ChatLog {
    path: PathBuf,
    messages: Vec<Message>,
}

impl ChatLog {
    /// Opens the log backed by `path`, restoring any persisted history.
    ///
    /// A missing file yields an empty log. A payload that fails to parse is
    /// discarded: the file is erased and the log starts empty rather than
    /// surfacing a startup error.
    pub fn open(path: &Path) -> Result<Self, ChatLogError> {
        let path = path.to_path_buf();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                return Ok(Self {
                    path,
                    messages: Vec::new(),
                });
            }
            Err(source) => return Err(ChatLogError::io("reading chat history", path, source)),
        };

        match parse_history(&raw) {
            Some(messages) => Ok(Self { path, messages }),
            None => {
                tracing::warn!(path = %path.display(), "discarding malformed chat history");
                fs::remove_file(&path).map_err(|source| {
                    ChatLogError::io("erasing malformed chat history", &path, source)
                })?;

                Ok(Self {
                    path,
                    messages: Vec::new(),
                })
            }
        }
    }

    /// Appends one turn stamped with the current instant, persists the full
    /// log, and returns the created message for rendering.
    pub fn append(
        &mut self,
        text: impl Into<String>,
        sender: Sender,
    ) -> Result<Message, ChatLogError> {
        let message = Message::now(text, sender)?;

        self.messages.push(message.clone());
        if let Err(error) = self.persist() {
            self.messages.pop();
            return Err(error);
        }

        Ok(message)
    }

    /// Empties the sequence and erases persisted storage.
    pub fn clear(&mut self) -> Result<(), ChatLogError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(source) if source.kind() == io::ErrorKind::NotFound => {}
            Err(source) => return Err(ChatLogError::io("erasing chat history", &self.path, source)),
        }

        self.messages.clear();
        Ok(())
    }

    /// Read-only view of the transcript in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), ChatLogError> {
        let payload = serde_json::to_string(&self.messages)
            .map_err(|source| ChatLogError::serialize(&self.path, source))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| {
                ChatLogError::io("creating chat history directory", parent, source)
            })?;
        }

        fs::write(&self.path, payload)
            .map_err(|source| ChatLogError::io("writing chat history", &self.path, source))
    }
}

fn parse_history(raw: &str) -> Option<Vec<Message>> {
    let messages = serde_json::from_str::<Vec<Message>>(raw).ok()?;
    if messages.iter().all(Message::is_well_formed) {
        Some(messages)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::ChatLog;
    use crate::schema::Sender;

    fn history_path(dir: &TempDir) -> PathBuf {
        dir.path().join("chat_history.json")
    }

    #[test]
    fn open_missing_file_starts_empty() {
        let dir = TempDir::new().expect("temp dir should be created");
        let log = ChatLog::open(&history_path(&dir)).expect("open should succeed");

        assert!(log.is_empty());
        assert!(!history_path(&dir).exists());
    }

    #[test]
    fn append_preserves_insertion_order() {
        let dir = TempDir::new().expect("temp dir should be created");
        let mut log = ChatLog::open(&history_path(&dir)).expect("open should succeed");

        log.append("one", Sender::User).expect("append should succeed");
        log.append("two", Sender::Bot).expect("append should succeed");
        log.append("three", Sender::User)
            .expect("append should succeed");

        let texts: Vec<&str> = log
            .snapshot()
            .iter()
            .map(|message| message.text.as_str())
            .collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[test]
    fn append_returns_the_created_message() {
        let dir = TempDir::new().expect("temp dir should be created");
        let mut log = ChatLog::open(&history_path(&dir)).expect("open should succeed");

        let message = log
            .append("hello", Sender::User)
            .expect("append should succeed");

        assert_eq!(message.text, "hello");
        assert_eq!(message.sender, Sender::User);
        assert_eq!(log.snapshot().last(), Some(&message));
    }

    #[test]
    fn append_writes_wire_format_with_lowercase_senders() {
        let dir = TempDir::new().expect("temp dir should be created");
        let mut log = ChatLog::open(&history_path(&dir)).expect("open should succeed");

        log.append("hello", Sender::User)
            .expect("append should succeed");
        log.append("Hi there!", Sender::Bot)
            .expect("append should succeed");

        let raw = fs::read_to_string(history_path(&dir)).expect("history file should exist");
        let decoded: serde_json::Value = serde_json::from_str(&raw).expect("payload should parse");

        assert_eq!(decoded[0]["text"], "hello");
        assert_eq!(decoded[0]["sender"], "user");
        assert_eq!(decoded[1]["sender"], "bot");
        assert!(decoded[1]["timestamp"].is_string());
    }

    #[test]
    fn reopen_restores_messages_in_order() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = history_path(&dir);

        let mut log = ChatLog::open(&path).expect("open should succeed");
        log.append("hello", Sender::User)
            .expect("append should succeed");
        log.append("Hi there!", Sender::Bot)
            .expect("append should succeed");
        let before = log.snapshot().to_vec();

        let restored = ChatLog::open(&path).expect("reopen should succeed");
        assert_eq!(restored.snapshot(), before.as_slice());
    }

    #[test]
    fn clear_empties_log_and_removes_persisted_file() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = history_path(&dir);

        let mut log = ChatLog::open(&path).expect("open should succeed");
        log.append("hello", Sender::User)
            .expect("append should succeed");
        assert!(path.exists());

        log.clear().expect("clear should succeed");

        assert!(log.is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn clear_on_empty_log_is_not_an_error() {
        let dir = TempDir::new().expect("temp dir should be created");
        let mut log = ChatLog::open(&history_path(&dir)).expect("open should succeed");

        log.clear().expect("clear should succeed");
        assert!(log.is_empty());
    }

    #[test]
    fn malformed_payload_resets_to_empty_log() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = history_path(&dir);
        fs::write(&path, "{not json").expect("fixture write should succeed");

        let log = ChatLog::open(&path).expect("open should recover");

        assert!(log.is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn truncated_payload_resets_to_empty_log() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = history_path(&dir);
        fs::write(
            &path,
            "[{\"text\":\"hello\",\"sender\":\"user\",\"timestamp\":\"2024-",
        )
        .expect("fixture write should succeed");

        let log = ChatLog::open(&path).expect("open should recover");
        assert!(log.is_empty());
    }

    #[test]
    fn payload_with_invalid_timestamp_resets_to_empty_log() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = history_path(&dir);
        fs::write(
            &path,
            "[{\"text\":\"hello\",\"sender\":\"user\",\"timestamp\":\"yesterday\"}]",
        )
        .expect("fixture write should succeed");

        let log = ChatLog::open(&path).expect("open should recover");

        assert!(log.is_empty());
        assert!(!path.exists());
    }
}
