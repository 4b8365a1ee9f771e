use chat_log::{ChatLog, ChatLogError, Message, Sender};
use completion_provider::{CompletionError, CompletionProvider};
use thiserror::Error;

use crate::credentials::{CredentialError, CredentialStore};
use crate::frontend::SessionFrontend;

/// Controller state for the request lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Idle,
    AwaitingCredential,
    Sending,
    Error(String),
}

/// Derived status projection handed to front ends; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Uninitialized,
    Ready,
    Sending,
    Error,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Log(#[from] ChatLogError),
}

/// One accepted submission: the trimmed prompt and the credential that will
/// authorize it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub prompt: String,
    pub api_key: String,
}

/// Session state constructed once at startup and handed to front ends by
/// reference. Owns the conversation log and the credential store; all
/// mutation flows through its methods.
pub struct ChatSession {
    mode: Mode,
    log: ChatLog,
    credentials: CredentialStore,
}

impl ChatSession {
    /// Starts in `Idle` when a credential is already present, else in
    /// `AwaitingCredential`.
    #[must_use]
    pub fn new(log: ChatLog, credentials: CredentialStore) -> Self {
        let mode = if credentials.get().is_some() {
            Mode::Idle
        } else {
            Mode::AwaitingCredential
        };

        Self {
            mode,
            log,
            credentials,
        }
    }

    #[must_use]
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        match &self.mode {
            Mode::Sending => SessionStatus::Sending,
            Mode::Error(_) => SessionStatus::Error,
            Mode::AwaitingCredential => SessionStatus::Uninitialized,
            Mode::Idle if self.credentials.get().is_some() => SessionStatus::Ready,
            Mode::Idle => SessionStatus::Uninitialized,
        }
    }

    /// Read-only view of the transcript in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> &[Message] {
        self.log.snapshot()
    }

    /// Submits one prompt through the provider, appending the user turn and
    /// the reply (or surfacing one error) before returning.
    ///
    /// Composes [`ChatSession::begin_submit`] and
    /// [`ChatSession::complete_submit`] around the provider call; the
    /// session sits in `Sending` for exactly the span of the await.
    pub async fn submit(
        &mut self,
        text: &str,
        provider: &dyn CompletionProvider,
        frontend: &mut dyn SessionFrontend,
    ) {
        let Some(pending) = self.begin_submit(text, frontend) else {
            return;
        };

        let outcome = provider.complete(&pending.prompt, &pending.api_key).await;
        self.complete_submit(outcome, frontend);
    }

    /// First half of the submit lifecycle: precondition checks, the
    /// user-turn append, and the transition into `Sending`.
    ///
    /// Returns `None` when the submission is ignored (empty text, or a
    /// request already in flight) or blocked on a missing credential. A
    /// blocked submission drops the text; it is not retried once a
    /// credential arrives.
    pub fn begin_submit(
        &mut self,
        text: &str,
        frontend: &mut dyn SessionFrontend,
    ) -> Option<PendingRequest> {
        let prompt = text.trim();
        if prompt.is_empty() || matches!(self.mode, Mode::Sending) {
            return None;
        }

        let Some(api_key) = self.credentials.get().map(str::to_string) else {
            self.mode = Mode::AwaitingCredential;
            frontend.on_credential_requested();
            frontend.on_status_changed(self.status());
            return None;
        };

        match self.log.append(prompt, Sender::User) {
            Ok(message) => frontend.on_message_appended(&message),
            Err(error) => {
                let message = error.to_string();
                frontend.on_error(&message);
                self.mode = Mode::Error(message);
                frontend.on_status_changed(self.status());
                return None;
            }
        }

        self.mode = Mode::Sending;
        frontend.on_status_changed(self.status());

        Some(PendingRequest {
            prompt: prompt.to_string(),
            api_key,
        })
    }

    /// Second half of the submit lifecycle: applies the provider outcome
    /// once the in-flight request resolves.
    ///
    /// On failure the user's turn stays in the log with no rollback, and
    /// `Error` is not terminal; the next submit attempts again.
    pub fn complete_submit(
        &mut self,
        outcome: Result<String, CompletionError>,
        frontend: &mut dyn SessionFrontend,
    ) {
        match outcome {
            Ok(reply) => match self.log.append(reply, Sender::Bot) {
                Ok(message) => {
                    frontend.on_message_appended(&message);
                    self.mode = Mode::Idle;
                }
                Err(error) => {
                    let message = error.to_string();
                    frontend.on_error(&message);
                    self.mode = Mode::Error(message);
                }
            },
            Err(error) => {
                let message = error.to_string();
                frontend.on_error(&message);
                self.mode = Mode::Error(message);
            }
        }

        frontend.on_status_changed(self.status());
    }

    /// Stores the API key; on success an `AwaitingCredential` session
    /// becomes ready to send.
    pub fn set_credential(
        &mut self,
        key: &str,
        remember: bool,
        frontend: &mut dyn SessionFrontend,
    ) -> Result<(), SessionError> {
        self.credentials.set(key, remember)?;

        if matches!(self.mode, Mode::AwaitingCredential) {
            self.mode = Mode::Idle;
        }
        frontend.on_status_changed(self.status());

        Ok(())
    }

    /// Empties the conversation log and its persisted storage.
    pub fn clear_log(&mut self) -> Result<(), SessionError> {
        self.log.clear()?;
        Ok(())
    }

    /// Renders the transcript for export; fails on an empty log.
    pub fn export_log(&self) -> Result<String, SessionError> {
        Ok(self.log.export()?)
    }
}
