//! LLM provider dispatch for chat completions.

mod anthropic;
mod dispatcher;
mod error;
mod local;
mod openai;
mod provider;
mod types;

pub use anthropic::AnthropicProvider;
pub use dispatcher::Dispatcher;
pub use error::LlmError;
pub use local::LocalProvider;
pub use openai::OpenAiProvider;
pub use provider::{ChatProvider, ProviderKind};
pub use types::{Message, Role};
