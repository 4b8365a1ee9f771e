use serde::{Deserialize, Serialize};

/// Fixed generation parameters applied to every request. These are
/// implementation constants, not user-configurable.
pub const TEMPERATURE: f64 = 0.7;
pub const TOP_K: u32 = 40;
pub const TOP_P: f64 = 0.95;
pub const MAX_OUTPUT_TOKENS: u32 = 1024;

/// Canonical request payload shape for the `generateContent` endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// Builds a single-turn request carrying only the current prompt; prior
    /// turns are never included.
    #[must_use]
    pub fn single_turn(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.into(),
                }],
            }],
            generation_config: GenerationConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: TEMPERATURE,
            top_k: TOP_K,
            top_p: TOP_P,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

/// Extracts the reply text from a decoded response body.
///
/// Returns `None` when the first candidate carries no non-empty text part;
/// callers map that to a malformed-response failure.
#[must_use]
pub fn reply_text(response: GenerateContentResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{reply_text, GenerateContentRequest, GenerateContentResponse};

    #[test]
    fn single_turn_request_matches_wire_shape() {
        let request = GenerateContentRequest::single_turn("hello");
        let encoded = serde_json::to_value(&request).expect("request should serialize");

        assert_eq!(
            encoded,
            json!({
                "contents": [{ "parts": [{ "text": "hello" }] }],
                "generationConfig": {
                    "temperature": 0.7,
                    "topK": 40,
                    "topP": 0.95,
                    "maxOutputTokens": 1024,
                },
            })
        );
    }

    #[test]
    fn reply_text_reads_the_first_candidate() {
        let decoded: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "Hi there!" }] } },
                { "content": { "parts": [{ "text": "ignored" }] } },
            ],
        }))
        .expect("response should decode");

        assert_eq!(reply_text(decoded), Some("Hi there!".to_string()));
    }

    #[test]
    fn reply_text_skips_non_text_leading_parts() {
        let decoded: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{}, { "text": "found" }] } }],
        }))
        .expect("response should decode");

        assert_eq!(reply_text(decoded), Some("found".to_string()));
    }

    #[test]
    fn reply_text_is_none_without_candidates() {
        let decoded: GenerateContentResponse =
            serde_json::from_value(json!({})).expect("response should decode");
        assert_eq!(reply_text(decoded), None);
    }

    #[test]
    fn reply_text_is_none_for_empty_text() {
        let decoded: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "" }] } }],
        }))
        .expect("response should decode");

        assert_eq!(reply_text(decoded), None);
    }
}
