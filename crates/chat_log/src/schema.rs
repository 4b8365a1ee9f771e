use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::ChatLogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// Upper-case label used by transcript export lines.
    #[must_use]
    pub fn export_label(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Bot => "BOT",
        }
    }
}

/// One conversational turn. Immutable once created; turns are only appended
/// or bulk-cleared, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
    pub timestamp: String,
}

impl Message {
    /// Constructs a turn stamped with the current UTC instant.
    pub fn now(text: impl Into<String>, sender: Sender) -> Result<Self, ChatLogError> {
        let timestamp = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(ChatLogError::ClockFormat)?;

        Ok(Self {
            text: text.into(),
            sender,
            timestamp,
        })
    }

    pub(crate) fn is_well_formed(&self) -> bool {
        !self.text.trim().is_empty() && OffsetDateTime::parse(&self.timestamp, &Rfc3339).is_ok()
    }
}
