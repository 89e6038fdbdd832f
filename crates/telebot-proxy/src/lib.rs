//! TeleBot Proxy - AI gateway for Telegram bot development.
//!
//! The client application sends chat-style requests; the proxy injects a
//! bot-development persona and the current project files, forwards the
//! conversation to an OpenAI-compatible completion service, and splits the
//! reply's fenced code blocks into named files.
//!
//! Pipeline per request:
//! - [`gatekeeper`] decides whether the caller may use the proxy at all.
//! - [`prompt`] builds the upstream message sequence.
//! - [`pipeline`] invokes the completion client.
//! - [`extract`] finds fenced code blocks in the reply.
//! - [`classify`] assigns each block a filename.

pub mod classify;
pub mod config;
pub mod error;
pub mod extract;
pub mod gatekeeper;
pub mod pipeline;
pub mod prompt;
pub mod server;

pub use config::ProxyConfig;
pub use error::ProxyError;
pub use pipeline::ChatService;
pub use server::{serve, AppState};
