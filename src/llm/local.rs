//! Local self-hosted provider (Ollama-native chat API).
//!
//! Credential-exempt: the endpoint is assumed to be reachable without auth.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::error::LlmError;
use super::provider::ChatProvider;
use super::types::Message;

const NAME: &str = "local";

/// Provider for a locally running model server.
pub struct LocalProvider {
    client: Client,
    base_url: String,
    model: String,
    timeout: Option<Duration>,
}

impl LocalProvider {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:11434";
    pub const DEFAULT_MODEL: &'static str = "llama3.2";

    pub fn new(base_url: String, model: Option<String>, timeout: Option<Duration>) -> Self {
        Self {
            client: Client::new(),
            base_url,
            model: model.unwrap_or_else(|| Self::DEFAULT_MODEL.to_string()),
            timeout,
        }
    }
}

#[async_trait]
impl ChatProvider for LocalProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn chat(&self, messages: &[Message]) -> Result<String, LlmError> {
        let url = format!("{}/api/chat", self.base_url);
        let body = Request {
            model: &self.model,
            messages,
            stream: false,
        };

        let mut req = self
            .client
            .post(&url)
            .header("Content-Type", "application/json");
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        let response = req.json(&body).send().await.map_err(|e| LlmError::Request {
            provider: NAME,
            source: e,
        })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                provider: NAME,
                status,
                message,
            });
        }

        let raw = response.text().await.map_err(|e| LlmError::Request {
            provider: NAME,
            source: e,
        })?;
        let parsed: Response =
            serde_json::from_str(&raw).map_err(|e| LlmError::MalformedResponse {
                provider: NAME,
                detail: e.to_string(),
            })?;

        Ok(parsed.message.content)
    }
}

// --- Request/Response types ---

#[derive(serde::Serialize)]
struct Request<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
}

#[derive(serde::Deserialize)]
struct Response {
    message: ResponseMessage,
}

#[derive(serde::Deserialize)]
struct ResponseMessage {
    content: String,
}
