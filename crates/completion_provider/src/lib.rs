//! Minimal provider-agnostic contract for one remote completion call.
//!
//! This crate intentionally defines only the shared completion trait and its
//! failure taxonomy. It excludes transport details, wire payloads, and
//! session lifecycle concerns.

use std::fmt;

use async_trait::async_trait;

/// Failure taxonomy for one completion attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    /// Network-level failure reaching the remote endpoint.
    Transport(String),
    /// The endpoint responded with a non-success status. The message comes
    /// from the endpoint's structured error body when present, else a
    /// generic fallback.
    Rejected(String),
    /// A success status arrived without a usable reply field.
    MalformedResponse,
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(message) => {
                write!(f, "failed to reach the completion endpoint: {message}")
            }
            Self::Rejected(message) => f.write_str(message),
            Self::MalformedResponse => f.write_str("completion response did not contain a reply"),
        }
    }
}

impl std::error::Error for CompletionError {}

/// Provider interface for executing one single-turn completion.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Returns the stable provider identifier used for startup selection.
    fn provider_id(&self) -> &'static str;

    /// Sends one prompt and resolves to the reply text.
    ///
    /// The call suspends while the remote endpoint works; callers enforce
    /// their own single-flight policy around it. Implementations perform no
    /// automatic retries.
    async fn complete(&self, prompt: &str, api_key: &str) -> Result<String, CompletionError>;
}
