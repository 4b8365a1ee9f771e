//! Deterministic mock implementation of the shared `completion_provider`
//! contract.
//!
//! This crate contains no transport logic and is intended for local runs and
//! contract-level integration testing.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use completion_provider::{CompletionError, CompletionProvider};

/// Stable provider identifier used for explicit startup selection.
pub const MOCK_PROVIDER_ID: &str = "mock";

const DEFAULT_REPLY: &str = "Hello! I'm Gemini, your AI assistant. How can I help you today?";

/// Scripted provider that cycles through canned outcomes and records how it
/// was called.
#[derive(Debug)]
pub struct MockProvider {
    outcomes: Vec<Result<String, CompletionError>>,
    state: Mutex<CallState>,
}

#[derive(Debug, Default)]
struct CallState {
    calls: usize,
    last_prompt: Option<String>,
}

impl MockProvider {
    /// Creates a provider that cycles through `outcomes` in order.
    ///
    /// An empty script falls back to one default reply so the provider
    /// always resolves.
    #[must_use]
    pub fn new(outcomes: Vec<Result<String, CompletionError>>) -> Self {
        let outcomes = if outcomes.is_empty() {
            vec![Ok(DEFAULT_REPLY.to_string())]
        } else {
            outcomes
        };

        Self {
            outcomes,
            state: Mutex::new(CallState::default()),
        }
    }

    /// Creates a provider that answers every prompt with the same reply.
    #[must_use]
    pub fn replying(reply: impl Into<String>) -> Self {
        Self::new(vec![Ok(reply.into())])
    }

    /// Creates a provider that fails every prompt with the same error.
    #[must_use]
    pub fn failing(error: CompletionError) -> Self {
        Self::new(vec![Err(error)])
    }

    /// Number of `complete` calls observed so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        lock_unpoisoned(&self.state).calls
    }

    /// Prompt handed to the most recent `complete` call, if any.
    #[must_use]
    pub fn last_prompt(&self) -> Option<String> {
        lock_unpoisoned(&self.state).last_prompt.clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    fn provider_id(&self) -> &'static str {
        MOCK_PROVIDER_ID
    }

    async fn complete(&self, prompt: &str, _api_key: &str) -> Result<String, CompletionError> {
        let mut state = lock_unpoisoned(&self.state);
        let outcome = self.outcomes[state.calls % self.outcomes.len()].clone();
        state.calls += 1;
        state.last_prompt = Some(prompt.to_string());
        outcome
    }
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
