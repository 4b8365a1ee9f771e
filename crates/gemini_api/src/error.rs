use reqwest::StatusCode;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    error: Option<ErrorPayloadFields>,
}

#[derive(Debug, Deserialize)]
struct ErrorPayloadFields {
    message: Option<String>,
}

/// Extract a user-facing message from a non-success response body.
///
/// Prefers the structured `error.message` field; falls back to the raw body,
/// then to the status line's canonical reason.
pub fn parse_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorPayload>(body) {
        if let Some(message) = parsed
            .error
            .and_then(|error| error.message)
            .map(|message| message.trim().to_string())
            .filter(|message| !message.is_empty())
        {
            return message;
        }
    }

    if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::parse_error_message;

    #[test]
    fn extracts_structured_error_message() {
        let body = "{\"error\":{\"code\":400,\"message\":\"API key not valid\",\"status\":\"INVALID_ARGUMENT\"}}";
        assert_eq!(
            parse_error_message(StatusCode::BAD_REQUEST, body),
            "API key not valid"
        );
    }

    #[test]
    fn falls_back_to_raw_body_when_unstructured() {
        assert_eq!(
            parse_error_message(StatusCode::BAD_GATEWAY, "upstream exploded"),
            "upstream exploded"
        );
    }

    #[test]
    fn falls_back_to_canonical_reason_for_empty_body() {
        assert_eq!(
            parse_error_message(StatusCode::SERVICE_UNAVAILABLE, ""),
            "Service Unavailable"
        );
    }

    #[test]
    fn blank_structured_message_falls_through_to_body() {
        let body = "{\"error\":{\"message\":\"  \"}}";
        assert_eq!(parse_error_message(StatusCode::BAD_REQUEST, body), body);
    }
}
