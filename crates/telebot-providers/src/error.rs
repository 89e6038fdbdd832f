//! Provider error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ProviderError {
    /// Map a non-success HTTP status and the provider's message to an error
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => Self::AuthenticationFailed(message),
            429 => Self::RateLimited(message),
            _ => Self::Api { status, message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_classifies() {
        assert!(matches!(
            ProviderError::from_status(429, "slow down".into()),
            ProviderError::RateLimited(_)
        ));
        assert!(matches!(
            ProviderError::from_status(401, "bad key".into()),
            ProviderError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            ProviderError::from_status(500, "boom".into()),
            ProviderError::Api { status: 500, .. }
        ));
    }

    #[test]
    fn test_display_keeps_provider_message() {
        let err = ProviderError::from_status(429, "rate limited".into());
        assert_eq!(err.to_string(), "rate limit exceeded: rate limited");
    }
}
