//! Provider resolution and chat dispatch.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::anthropic::AnthropicProvider;
use super::error::LlmError;
use super::local::LocalProvider;
use super::openai::OpenAiProvider;
use super::provider::{ChatProvider, ProviderKind};
use super::types::Message;
use crate::config::LlmConfig;

/// Dispatches chat completions to the one provider resolved at construction.
///
/// Resolution happens exactly once; the dispatcher is immutable afterwards.
/// Each dispatch is an independent request/response cycle with no shared
/// state, so concurrent calls need no coordination.
#[derive(Clone)]
pub struct Dispatcher {
    provider: Arc<dyn ChatProvider>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("provider", &self.provider.name())
            .finish()
    }
}

impl Dispatcher {
    /// Wrap an already-built provider. Used by tests to inject mocks.
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self { provider }
    }

    /// Resolve the configured provider and build a dispatcher for it.
    ///
    /// Fails with [`LlmError::UnknownProvider`] when the selector names no
    /// registered provider kind. A missing credential is not an error here;
    /// it surfaces as [`LlmError::MissingCredential`] on the first dispatch,
    /// before any request is sent.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let kind: ProviderKind = config.provider.parse()?;
        let timeout = config.request_timeout_seconds.map(Duration::from_secs);
        let model = config.model.clone();

        let provider: Arc<dyn ChatProvider> = match kind {
            ProviderKind::OpenAi => Arc::new(OpenAiProvider::new(
                OpenAiProvider::DEFAULT_BASE_URL.to_string(),
                config.openai_api_key(),
                model,
                timeout,
            )),
            ProviderKind::Anthropic => Arc::new(AnthropicProvider::new(
                AnthropicProvider::DEFAULT_BASE_URL.to_string(),
                config.anthropic_api_key(),
                model,
                timeout,
            )),
            ProviderKind::Local => Arc::new(LocalProvider::new(
                config
                    .local_endpoint()
                    .unwrap_or_else(|| LocalProvider::DEFAULT_BASE_URL.to_string()),
                model,
                timeout,
            )),
        };

        info!(provider = %kind, "resolved chat provider");
        Ok(Self::new(provider))
    }

    /// Send the message sequence to the active provider and return the reply.
    pub async fn dispatch(&self, messages: &[Message]) -> Result<String, LlmError> {
        debug!(
            provider = self.provider.name(),
            messages = messages.len(),
            "dispatching chat completion"
        );

        match self.provider.chat(messages).await {
            Ok(reply) => Ok(reply),
            Err(e) => {
                warn!(provider = self.provider.name(), error = %e, "chat completion failed");
                Err(e)
            }
        }
    }
}
