use async_trait::async_trait;
use completion_provider::{CompletionError, CompletionProvider};
use reqwest::Client;

use crate::config::GeminiApiConfig;
use crate::error::parse_error_message;
use crate::payload::{reply_text, GenerateContentRequest, GenerateContentResponse};
use crate::url::completion_url;

/// Stable provider identifier used for explicit startup selection.
pub const GEMINI_PROVIDER_ID: &str = "gemini";

/// Stateless request/response mapping to the `generateContent` endpoint.
#[derive(Debug)]
pub struct GeminiApiClient {
    http: Client,
    config: GeminiApiConfig,
}

impl GeminiApiClient {
    pub fn new(config: GeminiApiConfig) -> Result<Self, CompletionError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|error| CompletionError::Transport(error.to_string()))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &GeminiApiConfig {
        &self.config
    }

    /// Sends one single-turn prompt and resolves to the reply text.
    pub async fn generate_content(
        &self,
        prompt: &str,
        api_key: &str,
    ) -> Result<String, CompletionError> {
        let url = completion_url(&self.config.base_url, &self.config.model, api_key);
        let payload = GenerateContentRequest::single_turn(prompt);

        tracing::debug!(model = %self.config.model, "dispatching generateContent request");

        let response = self
            .http
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(|error| CompletionError::Transport(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
            return Err(CompletionError::Rejected(parse_error_message(
                status, &body,
            )));
        }

        let decoded = match response.json::<GenerateContentResponse>().await {
            Ok(decoded) => decoded,
            Err(error) if error.is_decode() => return Err(CompletionError::MalformedResponse),
            Err(error) => return Err(CompletionError::Transport(error.to_string())),
        };

        reply_text(decoded).ok_or(CompletionError::MalformedResponse)
    }
}

#[async_trait]
impl CompletionProvider for GeminiApiClient {
    fn provider_id(&self) -> &'static str {
        GEMINI_PROVIDER_ID
    }

    async fn complete(&self, prompt: &str, api_key: &str) -> Result<String, CompletionError> {
        self.generate_content(prompt, api_key).await
    }
}
