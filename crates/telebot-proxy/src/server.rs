//! Actix Web HTTP server.
//!
//! Endpoints:
//! - `GET /` and `GET /health` (never gated)
//! - `POST /ai/chat`
//! - `POST /ai/completions`
//! - `POST /ai/generate`
//!
//! The POST handlers take the raw body and run the gatekeeper before parsing
//! it, so a denied caller costs nothing beyond reading the request.

use std::time::Instant;

use actix_cors::Cors;
use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header,
    middleware::{from_fn, Next},
    web, App, HttpRequest, HttpResponse, HttpServer,
};
use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use telebot_protocol::{ChatRequest, CompletionRequest, GenerateRequest};
use tracing::{info, warn};

use crate::{
    config::ProxyConfig, error::ProxyError, gatekeeper::Gatekeeper, pipeline::ChatService,
};

const SERVICE_NAME: &str = "TeleBot AI Proxy";

pub struct AppState {
    pub config: ProxyConfig,
    pub gatekeeper: Gatekeeper,
    pub service: ChatService,
}

impl AppState {
    pub fn from_config(config: ProxyConfig) -> Result<Self, ProxyError> {
        let service = ChatService::from_config(&config)?;
        let gatekeeper = Gatekeeper::new(config.auth_token.clone());
        Ok(Self {
            config,
            gatekeeper,
            service,
        })
    }

    fn authorize(&self, req: &HttpRequest) -> Result<(), ProxyError> {
        let header_value = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        self.gatekeeper.check(header_value).inspect_err(|_| {
            warn!(path = %req.path(), "rejected request: bad or missing bearer token");
        })
    }
}

pub async fn serve(config: ProxyConfig) -> Result<()> {
    let addr = config.bind_addr();
    info!(
        addr = %addr,
        api_key_present = config.api_key_present(),
        auth_enabled = config.auth_token.is_some(),
        "telebot-proxy listening"
    );

    let state = AppState::from_config(config).context("failed to build app state")?;
    let state = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Cors::permissive())
            .wrap(from_fn(log_requests))
            .configure(routes)
    })
    .bind(&addr)
    .with_context(|| format!("failed to bind {}", addr))?
    .run()
    .await
    .context("server error")?;

    Ok(())
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/health", web::get().to(health_check))
        .route("/ai/chat", web::post().to(handle_chat))
        .route("/ai/completions", web::post().to(handle_completions))
        .route("/ai/generate", web::post().to(handle_generate));
}

async fn log_requests(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.path().to_string();

    let res = next.call(req).await?;

    info!(
        %method,
        %path,
        status = res.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request handled"
    );
    Ok(res)
}

#[derive(Debug, Serialize)]
struct RootResponse {
    message: &'static str,
    status: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    openai_configured: bool,
    api_key_present: bool,
    auth_enabled: bool,
}

async fn root() -> HttpResponse {
    HttpResponse::Ok().json(RootResponse {
        message: "TeleBot AI Proxy is running",
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        openai_configured: state.service.is_configured(),
        api_key_present: state.config.api_key_present(),
        auth_enabled: state.gatekeeper.is_enabled(),
    })
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ProxyError> {
    serde_json::from_slice(body).map_err(|e| ProxyError::InvalidRequest(e.to_string()))
}

async fn handle_chat(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, ProxyError> {
    state.authorize(&req)?;
    let request: ChatRequest = parse_body(&body)?;
    info!(
        messages = request.messages.len(),
        context_files = request.project_context.len(),
        "received chat request"
    );

    let response = state.service.chat(request).await?;
    Ok(HttpResponse::Ok().json(response))
}

async fn handle_completions(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, ProxyError> {
    state.authorize(&req)?;
    let request: CompletionRequest = parse_body(&body)?;
    info!(
        model = request.model.as_deref().unwrap_or("default"),
        messages = request.messages.len(),
        "received raw completion request"
    );

    let completion = state.service.complete_raw(request).await?;
    Ok(HttpResponse::Ok().json(completion))
}

async fn handle_generate(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, ProxyError> {
    state.authorize(&req)?;
    let request: GenerateRequest = parse_body(&body)?;
    info!(context_files = request.context.len(), "received generate request");

    let response = state.service.generate(request).await?;
    Ok(HttpResponse::Ok().json(response))
}
