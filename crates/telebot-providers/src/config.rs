//! Provider configuration

use secrecy::SecretString;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Connection settings for the upstream completion service.
///
/// Generation parameters (model, max tokens, temperature) travel with each
/// request instead; see [`telebot_protocol::CompletionSpec`].
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: Option<SecretString>,
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            timeout_seconds: Some(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ProviderConfig {
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(SecretString::from(api_key.into())),
            base_url: Some(DEFAULT_OPENAI_BASE_URL.to_string()),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    /// Base URL without a trailing slash
    pub fn base_url_trimmed(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_OPENAI_BASE_URL)
            .trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_defaults_and_trims() {
        assert_eq!(
            ProviderConfig::default().base_url_trimmed(),
            "https://api.openai.com"
        );
        let config = ProviderConfig::openai("sk-test").with_base_url("http://localhost:4000/");
        assert_eq!(config.base_url_trimmed(), "http://localhost:4000");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ProviderConfig::openai("sk-very-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sk-very-secret"));
    }
}
