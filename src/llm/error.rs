//! LLM error types.

use thiserror::Error;

/// Errors that can occur when dispatching a chat completion.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The configured provider selector matches no registered provider.
    #[error("unknown provider kind: {kind:?} (expected one of: openai, anthropic, local)")]
    UnknownProvider { kind: String },

    /// The provider requires an API key and none was configured.
    #[error("missing api key for provider {provider}")]
    MissingCredential { provider: &'static str },

    /// The HTTP request could not be completed.
    #[error("http request to {provider} failed: {source}")]
    Request {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The API returned a non-success status.
    #[error("{provider} api error (status {status}): {message}")]
    Api {
        provider: &'static str,
        status: u16,
        message: String,
    },

    /// The API returned a success status but the payload did not have the
    /// expected shape.
    #[error("unexpected response from {provider}: {detail}")]
    MalformedResponse {
        provider: &'static str,
        detail: String,
    },
}

impl LlmError {
    /// Whether this error came from the provider call itself (transport
    /// failure, error status, or unusable payload) as opposed to a
    /// configuration problem caught before any request was sent.
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            LlmError::Request { .. } | LlmError::Api { .. } | LlmError::MalformedResponse { .. }
        )
    }
}
