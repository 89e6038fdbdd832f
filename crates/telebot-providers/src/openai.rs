//! OpenAI client implementation

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use telebot_protocol::{Completion, CompletionSpec, TokenUsage};
use tracing::debug;

use crate::{
    response_handling::parse_error_body, CompletionClient, ProviderConfig, ProviderError,
    ProviderResult,
};

/// OpenAI `chat/completions` client
pub struct OpenAIClient {
    client: Client,
    config: ProviderConfig,
}

impl OpenAIClient {
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let api_key = config
            .api_key
            .as_ref()
            .ok_or_else(|| ProviderError::Configuration("API key required for OpenAI".into()))?;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Authorization",
            format!("Bearer {}", api_key.expose_secret())
                .parse()
                .map_err(|_| ProviderError::Configuration("Invalid API key format".into()))?,
        );
        headers.insert(
            "content-type",
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let mut builder = Client::builder().default_headers(headers);
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    fn build_request<'a>(&self, spec: &'a CompletionSpec) -> OpenAIRequest<'a> {
        OpenAIRequest {
            model: &spec.model,
            messages: spec
                .messages
                .iter()
                .map(|m| OpenAIMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            max_tokens: spec.max_tokens,
            temperature: spec.temperature,
        }
    }

    fn convert_response(response: OpenAIResponse) -> Completion {
        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        Completion {
            text,
            model: response.model,
            usage: response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u
                    .total_tokens
                    .unwrap_or(u.prompt_tokens + u.completion_tokens),
            }),
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAIClient {
    async fn complete(&self, spec: &CompletionSpec) -> ProviderResult<Completion> {
        let request = self.build_request(spec);
        let url = format!("{}/v1/chat/completions", self.config.base_url_trimmed());

        debug!(
            model = %spec.model,
            messages = spec.messages.len(),
            max_tokens = spec.max_tokens,
            "sending completion request"
        );

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::from_status(status, parse_error_body(&body)));
        }

        let body = response.text().await?;
        let api_response: OpenAIResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        Ok(Self::convert_response(api_response))
    }

    fn provider(&self) -> &str {
        "openai"
    }
}

// API request/response types
#[derive(Debug, Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAIMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    model: String,
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    prompt_tokens: u64,
    completion_tokens: u64,
    total_tokens: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use telebot_protocol::ChatMessage;

    #[test]
    fn test_new_requires_api_key() {
        let result = OpenAIClient::new(ProviderConfig::default());
        assert!(matches!(result, Err(ProviderError::Configuration(_))));
    }

    #[test]
    fn test_build_request_preserves_order() {
        let client = OpenAIClient::new(ProviderConfig::openai("sk-test")).unwrap();
        let spec = CompletionSpec {
            model: "gpt-4o".to_string(),
            messages: vec![
                ChatMessage::system("persona"),
                ChatMessage::user("hello"),
                ChatMessage::assistant("hi"),
            ],
            max_tokens: 4000,
            temperature: 0.7,
        };

        let json = serde_json::to_value(client.build_request(&spec)).unwrap();
        assert_eq!(json["model"], "gpt-4o");
        assert_eq!(json["max_tokens"], 4000);
        let roles: Vec<&str> = json["messages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["role"].as_str().unwrap())
            .collect();
        assert_eq!(roles, vec!["system", "user", "assistant"]);
    }

    #[test]
    fn test_convert_response_null_content() {
        let response: OpenAIResponse = serde_json::from_str(
            r#"{"model":"gpt-4o","choices":[{"message":{"content":null}}]}"#,
        )
        .unwrap();
        let completion = OpenAIClient::convert_response(response);
        assert_eq!(completion.text, "");
        assert!(completion.usage.is_none());
    }

    #[test]
    fn test_convert_response_fills_total_tokens() {
        let response: OpenAIResponse = serde_json::from_str(
            r#"{"model":"gpt-4o","choices":[{"message":{"content":"ok"}}],
                "usage":{"prompt_tokens":10,"completion_tokens":5}}"#,
        )
        .unwrap();
        let completion = OpenAIClient::convert_response(response);
        assert_eq!(completion.text, "ok");
        assert_eq!(completion.usage.unwrap().total_tokens, 15);
    }
}
