//! Configuration from environment variables and an optional telebot.yml.
//!
//! Layering, later wins: built-in defaults, the YAML file, the environment,
//! then CLI flags (applied by the binary).
//!
//! ```yaml
//! port: 8001
//! model: "gpt-4o"
//! max_tokens: 4000
//! temperature: 0.7
//! context_char_limit: 500
//! ```
//!
//! **Environment variables:**
//! - `OPENAI_API_KEY`: upstream credential (env only; absence disables completions)
//! - `PROXY_AUTH_TOKEN`: shared secret for `Authorization: Bearer` (env only; unset = open mode)
//! - `HOST` / `PORT`: bind address (default: 0.0.0.0:8001)
//! - `OPENAI_BASE_URL`: upstream base URL (default: https://api.openai.com)
//! - `OPENAI_MODEL`: default model (default: gpt-4o)
//! - `REQUEST_TIMEOUT_SECS`: upstream request timeout (default: 120)

use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::prompt::DEFAULT_CONTEXT_LIMIT;

pub const DEFAULT_PORT: u16 = 8001;
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_MAX_TOKENS: u32 = 4000;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub host: String,
    pub port: u16,
    pub openai_api_key: Option<SecretString>,
    pub openai_base_url: String,
    pub auth_token: Option<SecretString>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub request_timeout_secs: u64,
    pub context_char_limit: usize,
}

/// Non-secret settings accepted from telebot.yml
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    host: Option<String>,
    port: Option<u16>,
    openai_base_url: Option<String>,
    model: Option<String>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
    request_timeout_secs: Option<u64>,
    context_char_limit: Option<usize>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            openai_api_key: None,
            openai_base_url: "https://api.openai.com".to_string(),
            auth_token: None,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            request_timeout_secs: 120,
            context_char_limit: DEFAULT_CONTEXT_LIMIT,
        }
    }
}

impl ProxyConfig {
    /// Defaults, then the optional YAML file, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        Ok(base.with_env(|key| env::var(key).ok()))
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: FileConfig = serde_yaml_ng::from_str(content)?;
        let defaults = Self::default();

        Ok(Self {
            host: file.host.unwrap_or(defaults.host),
            port: file.port.unwrap_or(defaults.port),
            openai_base_url: file.openai_base_url.unwrap_or(defaults.openai_base_url),
            model: file.model.unwrap_or(defaults.model),
            max_tokens: file.max_tokens.unwrap_or(defaults.max_tokens),
            temperature: file.temperature.unwrap_or(defaults.temperature),
            request_timeout_secs: file
                .request_timeout_secs
                .unwrap_or(defaults.request_timeout_secs),
            context_char_limit: file
                .context_char_limit
                .unwrap_or(defaults.context_char_limit),
            ..defaults
        })
    }

    /// Overlay values from `lookup`. Unparseable numbers keep the current value.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty("OPENAI_API_KEY") {
            self.openai_api_key = Some(SecretString::from(key));
        }
        // Header values arrive with surrounding whitespace stripped, so a
        // padded token could never match.
        if let Some(token) = non_empty("PROXY_AUTH_TOKEN") {
            let trimmed = token.trim();
            if trimmed.len() != token.len() {
                warn!("PROXY_AUTH_TOKEN has surrounding whitespace; trimming it");
            }
            self.auth_token = Some(SecretString::from(trimmed.to_string()));
        }
        if let Some(host) = non_empty("HOST") {
            self.host = host;
        }
        if let Some(port) = non_empty("PORT").and_then(|p| p.parse().ok()) {
            self.port = port;
        }
        if let Some(url) = non_empty("OPENAI_BASE_URL") {
            self.openai_base_url = url;
        }
        if let Some(model) = non_empty("OPENAI_MODEL") {
            self.model = model;
        }
        if let Some(secs) = non_empty("REQUEST_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            self.request_timeout_secs = secs;
        }
        self
    }

    pub fn api_key_present(&self) -> bool {
        self.openai_api_key.is_some()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
