//! Request pipeline: compose, complete, extract, classify.

use std::sync::Arc;

use telebot_protocol::{
    ChatMessage, ChatRequest, ChatResponse, Completion, CompletionRequest, CompletionSpec,
    GenerateRequest,
};
use telebot_providers::{CompletionClient, OpenAIClient, ProviderConfig};
use tracing::{error, info, warn};

use crate::{
    classify::classify, config::ProxyConfig, error::ProxyError, extract::extract,
    prompt::PromptComposer,
};

/// Generation parameters used when the caller does not supply them
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationDefaults {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl From<&ProxyConfig> for GenerationDefaults {
    fn from(config: &ProxyConfig) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

/// Stateless per request; safe to share across workers.
#[derive(Clone)]
pub struct ChatService {
    client: Option<Arc<dyn CompletionClient>>,
    composer: PromptComposer,
    defaults: GenerationDefaults,
}

impl ChatService {
    pub fn new(
        client: Option<Arc<dyn CompletionClient>>,
        composer: PromptComposer,
        defaults: GenerationDefaults,
    ) -> Self {
        Self {
            client,
            composer,
            defaults,
        }
    }

    /// Build the OpenAI client when an API key is present; otherwise the
    /// service runs unconfigured and every completion fails fast.
    pub fn from_config(config: &ProxyConfig) -> Result<Self, ProxyError> {
        let client: Option<Arc<dyn CompletionClient>> = match &config.openai_api_key {
            Some(key) => {
                let provider = ProviderConfig {
                    api_key: Some(key.clone()),
                    base_url: Some(config.openai_base_url.clone()),
                    timeout_seconds: Some(config.request_timeout_secs),
                };
                let client = OpenAIClient::new(provider)?;
                info!("OpenAI client initialized");
                Some(Arc::new(client))
            }
            None => {
                warn!("OPENAI_API_KEY not found; completion endpoints will fail");
                None
            }
        };

        Ok(Self::new(
            client,
            PromptComposer::new(config.context_char_limit),
            GenerationDefaults::from(config),
        ))
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    pub async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ProxyError> {
        let messages = self.composer.compose(&request);
        self.complete_and_classify(messages).await
    }

    pub async fn generate(&self, request: GenerateRequest) -> Result<ChatResponse, ProxyError> {
        let messages = self.composer.compose_generation(&request);
        self.complete_and_classify(messages).await
    }

    /// Caller messages go upstream verbatim: no persona, no context.
    pub async fn complete_raw(&self, request: CompletionRequest) -> Result<Completion, ProxyError> {
        let spec = CompletionSpec {
            model: request.model.unwrap_or_else(|| self.defaults.model.clone()),
            messages: request.messages,
            max_tokens: request.max_tokens.unwrap_or(self.defaults.max_tokens),
            temperature: request.temperature.unwrap_or(self.defaults.temperature),
        };
        self.invoke(&spec).await
    }

    async fn complete_and_classify(
        &self,
        messages: Vec<ChatMessage>,
    ) -> Result<ChatResponse, ProxyError> {
        let spec = CompletionSpec {
            model: self.defaults.model.clone(),
            messages,
            max_tokens: self.defaults.max_tokens,
            temperature: self.defaults.temperature,
        };
        let completion = self.invoke(&spec).await?;

        let blocks = extract(&completion.text);
        let files = classify(&blocks);
        info!(blocks = blocks.len(), files = files.len(), "classified reply");

        Ok(ChatResponse {
            message: completion.text,
            files,
        })
    }

    async fn invoke(&self, spec: &CompletionSpec) -> Result<Completion, ProxyError> {
        let client = self.client.as_ref().ok_or(ProxyError::NotConfigured)?;

        info!(
            provider = client.provider(),
            model = %spec.model,
            messages = spec.messages.len(),
            "sending request upstream"
        );

        client.complete(spec).await.map_err(|e| {
            error!(error = %e, "completion failed");
            ProxyError::Upstream(e)
        })
    }
}
