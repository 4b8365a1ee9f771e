use std::time::Duration;

use crate::url::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};

/// Transport configuration for Gemini completion requests.
#[derive(Debug, Clone)]
pub struct GeminiApiConfig {
    /// Model identifier appended to the endpoint path.
    pub model: String,
    /// Base URL for generative-language model endpoints.
    pub base_url: String,
    /// Optional request timeout.
    pub timeout: Option<Duration>,
}

impl Default for GeminiApiConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl GeminiApiConfig {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
