//! TeleBot Providers - Completion client implementations
//!
//! The proxy talks to exactly one upstream: an OpenAI-compatible
//! `chat/completions` endpoint. The [`CompletionClient`] trait is the seam the
//! proxy depends on, so tests can substitute a scripted client.

mod config;
mod error;
mod openai;
mod response_handling;
mod traits;

pub use config::ProviderConfig;
pub use error::ProviderError;
pub use openai::OpenAIClient;
pub use traits::{CompletionClient, ProviderResult};
