//! Bearer-token gate in front of every mutating endpoint.

use secrecy::{ExposeSecret, SecretString};

use crate::error::ProxyError;

/// Authorizes callers against an optional shared secret.
///
/// Without a configured token the proxy runs in open mode and admits every
/// request, including ones without an `Authorization` header.
#[derive(Debug, Clone, Default)]
pub struct Gatekeeper {
    token: Option<SecretString>,
}

impl Gatekeeper {
    /// An empty or whitespace-only token disables the gate.
    pub fn new(token: Option<SecretString>) -> Self {
        let token = token.filter(|t| !t.expose_secret().trim().is_empty());
        Self { token }
    }

    pub fn open() -> Self {
        Self { token: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.token.is_some()
    }

    /// Exact match against `Bearer <token>`; no trimming, no case folding.
    pub fn authorize(&self, header_value: Option<&str>) -> bool {
        let Some(expected) = &self.token else {
            return true;
        };
        match header_value.and_then(|v| v.strip_prefix("Bearer ")) {
            Some(presented) => presented == expected.expose_secret(),
            None => false,
        }
    }

    pub fn check(&self, header_value: Option<&str>) -> Result<(), ProxyError> {
        if self.authorize(header_value) {
            Ok(())
        } else {
            Err(ProxyError::Forbidden)
        }
    }
}
