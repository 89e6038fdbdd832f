//! Helpers for turning upstream error bodies into readable messages

use serde::Deserialize;

/// Extract the provider's error message from a response body.
///
/// OpenAI nests it as `{"error": {"message": ...}}`; some compatible gateways
/// return a flat `{"message": ...}` or `{"error": "..."}`. Anything else is
/// passed through as raw text.
pub fn parse_error_body(body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        if let Some(message) = envelope.message() {
            return message;
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "empty error response".to_string()
    } else {
        trimmed.to_string()
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorField>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorField {
    Detailed {
        message: Option<String>,
        #[serde(rename = "type")]
        error_type: Option<String>,
    },
    Plain(String),
}

impl ErrorEnvelope {
    fn message(self) -> Option<String> {
        match self.error {
            Some(ErrorField::Plain(message)) => Some(message),
            Some(ErrorField::Detailed {
                message: Some(message),
                ..
            }) => Some(message),
            Some(ErrorField::Detailed {
                error_type: Some(error_type),
                ..
            }) => Some(error_type),
            _ => self.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_nested_error() {
        let body = r#"{"error":{"message":"rate limited","type":"requests","code":null}}"#;
        assert_eq!(parse_error_body(body), "rate limited");
    }

    #[test]
    fn test_flat_error_variants() {
        assert_eq!(parse_error_body(r#"{"error":"bad model"}"#), "bad model");
        assert_eq!(parse_error_body(r#"{"message":"nope"}"#), "nope");
    }

    #[test]
    fn test_type_only_error() {
        let body = r#"{"error":{"type":"insufficient_quota"}}"#;
        assert_eq!(parse_error_body(body), "insufficient_quota");
    }

    #[test]
    fn test_raw_text_fallback() {
        assert_eq!(parse_error_body("  Bad Gateway \n"), "Bad Gateway");
        assert_eq!(parse_error_body(""), "empty error response");
    }
}
