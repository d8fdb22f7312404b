//! OpenAI chat-completions provider.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::error::LlmError;
use super::provider::ChatProvider;
use super::types::Message;

const NAME: &str = "openai";

/// Provider speaking the OpenAI chat-completions API.
pub struct OpenAiProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    timeout: Option<Duration>,
}

impl OpenAiProvider {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com/v1";
    pub const DEFAULT_MODEL: &'static str = "gpt-4o-mini";
    const MAX_TOKENS: u32 = 1024;
    const TEMPERATURE: f32 = 0.7;

    pub fn new(
        base_url: String,
        api_key: Option<String>,
        model: Option<String>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key,
            model: model.unwrap_or_else(|| Self::DEFAULT_MODEL.to_string()),
            timeout,
        }
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn chat(&self, messages: &[Message]) -> Result<String, LlmError> {
        let Some(ref key) = self.api_key else {
            return Err(LlmError::MissingCredential { provider: NAME });
        };

        let url = format!("{}/chat/completions", self.base_url);
        let body = Request {
            model: &self.model,
            messages,
            max_tokens: Self::MAX_TOKENS,
            temperature: Self::TEMPERATURE,
            stream: false,
        };

        let mut req = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {key}"));
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

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| LlmError::MalformedResponse {
                provider: NAME,
                detail: "response contained no choices".to_string(),
            })
    }
}

// --- Request/Response types ---

#[derive(serde::Serialize)]
struct Request<'a> {
    model: &'a str,
    messages: &'a [Message],
    max_tokens: u32,
    temperature: f32,
    stream: bool,
}

#[derive(serde::Deserialize)]
struct Response {
    choices: Vec<Choice>,
}

#[derive(serde::Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(serde::Deserialize)]
struct ResponseMessage {
    content: String,
}
