//! Completion client trait

use async_trait::async_trait;
use telebot_protocol::{Completion, CompletionSpec};

use crate::ProviderError;

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// A remote model that turns an ordered message list into one text completion
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Run a single, non-streaming completion. Never retries.
    async fn complete(&self, spec: &CompletionSpec) -> ProviderResult<Completion>;

    /// Get the provider name
    fn provider(&self) -> &str;
}
