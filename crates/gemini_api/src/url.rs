/// Default base URL for generative-language model endpoints.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1/models";

/// Default model identifier used when no override is configured.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Build the completion endpoint URL for one request.
///
/// The API key travels as a `key` query parameter rather than a header,
/// matching the generative-language authentication convention. An empty base
/// URL or model falls back to the defaults; trailing slashes are trimmed.
pub fn completion_url(base_url: &str, model: &str, api_key: &str) -> String {
    let base = if base_url.trim().is_empty() {
        DEFAULT_GEMINI_BASE_URL
    } else {
        base_url.trim()
    };
    let base = base.trim_end_matches('/');

    let model = if model.trim().is_empty() {
        DEFAULT_GEMINI_MODEL
    } else {
        model.trim()
    };

    format!("{base}/{model}:generateContent?key={api_key}")
}
