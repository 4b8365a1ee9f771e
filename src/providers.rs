//! Startup provider selection.

use std::env;
use std::sync::Arc;

use completion_provider::CompletionProvider;
use completion_provider_mock::{MockProvider, MOCK_PROVIDER_ID};
use gemini_api::{GeminiApiClient, GeminiApiConfig, GEMINI_PROVIDER_ID};

/// Environment variable selecting the completion provider.
pub const PROVIDER_ENV_VAR: &str = "GEMINI_CHAT_PROVIDER";
/// Environment variable overriding the Gemini model id.
pub const MODEL_ENV_VAR: &str = "GEMINI_CHAT_MODEL";

/// Builds the provider selected through the environment, defaulting to the
/// live Gemini transport when the variable is unset.
pub fn provider_from_env() -> Result<Arc<dyn CompletionProvider>, String> {
    let selected = env::var(PROVIDER_ENV_VAR).unwrap_or_default();

    let provider: Arc<dyn CompletionProvider> = match selected.trim() {
        "" | GEMINI_PROVIDER_ID => {
            let mut config = GeminiApiConfig::default();
            if let Ok(model) = env::var(MODEL_ENV_VAR) {
                if !model.trim().is_empty() {
                    config = config.with_model(model.trim());
                }
            }

            Arc::new(GeminiApiClient::new(config).map_err(|error| error.to_string())?)
        }
        MOCK_PROVIDER_ID => Arc::new(MockProvider::default()),
        other => {
            return Err(format!(
                "Unknown provider '{other}'; expected '{GEMINI_PROVIDER_ID}' or '{MOCK_PROVIDER_ID}'"
            ))
        }
    };

    tracing::debug!(provider = provider.provider_id(), "selected completion provider");
    Ok(provider)
}
