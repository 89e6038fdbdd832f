use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use telebot_providers::ProviderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("OpenAI API key not configured. Please add OPENAI_API_KEY to Secrets.")]
    NotConfigured,

    #[error("Forbidden")]
    Forbidden,

    #[error("AI service error: {0}")]
    Upstream(#[from] ProviderError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Error body, shaped like the `{"detail": ...}` envelope clients already parse
#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

impl ResponseError for ProxyError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            detail: self.to_string(),
        })
    }
}
