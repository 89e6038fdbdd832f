//! TeleBot Protocol - Shared types for the TeleBot AI proxy
//!
//! This crate defines the wire types exchanged between the client application,
//! the proxy, and the completion provider:
//! - Chat messages and roles
//! - Chat / generation requests and the classified chat response
//! - Raw completion requests, completions, and token usage

mod completion;
mod messages;

pub use completion::*;
pub use messages::*;
