use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::ChatLogError;
use crate::store::ChatLog;

impl ChatLog {
    /// Renders the full transcript as plain text, one `[timestamp] SENDER:
    /// text` line per turn, turns separated by a blank line.
    ///
    /// Fails with [`ChatLogError::EmptyLog`] when there is nothing to
    /// export; callers treat this as a user-facing guard, not a crash path.
    pub fn export(&self) -> Result<String, ChatLogError> {
        if self.is_empty() {
            return Err(ChatLogError::EmptyLog);
        }

        let lines: Vec<String> = self
            .snapshot()
            .iter()
            .map(|message| {
                format!(
                    "[{}] {}: {}",
                    display_timestamp(&message.timestamp),
                    message.sender.export_label(),
                    message.text
                )
            })
            .collect();

        Ok(lines.join("\n\n"))
    }
}

fn display_timestamp(raw: &str) -> String {
    match OffsetDateTime::parse(raw, &Rfc3339) {
        Ok(parsed) => format!(
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            parsed.year(),
            u8::from(parsed.month()),
            parsed.day(),
            parsed.hour(),
            parsed.minute(),
            parsed.second()
        ),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::error::ChatLogError;
    use crate::schema::Sender;
    use crate::store::ChatLog;

    #[test]
    fn export_on_empty_log_fails_with_empty_log() {
        let dir = TempDir::new().expect("temp dir should be created");
        let log = ChatLog::open(&dir.path().join("chat_history.json")).expect("open should succeed");

        let error = log.export().expect_err("empty log must not export");
        assert!(matches!(error, ChatLogError::EmptyLog));
    }

    #[test]
    fn export_formats_one_line_per_turn() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("chat_history.json");
        std::fs::write(
            &path,
            concat!(
                "[{\"text\":\"hi\",\"sender\":\"user\",\"timestamp\":\"2024-01-15T10:30:00Z\"},",
                "{\"text\":\"Hi there!\",\"sender\":\"bot\",\"timestamp\":\"2024-01-15T10:30:05Z\"}]",
            ),
        )
        .expect("fixture write should succeed");

        let log = ChatLog::open(&path).expect("open should succeed");
        let exported = log.export().expect("export should succeed");

        assert_eq!(
            exported,
            "[2024-01-15 10:30:00] USER: hi\n\n[2024-01-15 10:30:05] BOT: Hi there!"
        );
    }

    #[test]
    fn export_preserves_log_order() {
        let dir = TempDir::new().expect("temp dir should be created");
        let mut log = ChatLog::open(&dir.path().join("chat_history.json")).expect("open should succeed");

        log.append("first", Sender::User)
            .expect("append should succeed");
        log.append("second", Sender::Bot)
            .expect("append should succeed");

        let exported = log.export().expect("export should succeed");
        let first_at = exported.find("first").expect("first turn present");
        let second_at = exported.find("second").expect("second turn present");
        assert!(first_at < second_at);
    }
}
