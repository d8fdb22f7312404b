//! chatgate - a minimal gateway that relays chat messages to a configurable
//! LLM provider.

pub mod config;
pub mod handlers;
pub mod llm;
pub mod response;
pub mod server;
