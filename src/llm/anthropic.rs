//! Anthropic messages-API provider.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::error::LlmError;
use super::provider::ChatProvider;
use super::types::Message;

const NAME: &str = "anthropic";

/// Provider speaking the Anthropic messages API.
pub struct AnthropicProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    timeout: Option<Duration>,
}

impl AnthropicProvider {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.anthropic.com";
    pub const DEFAULT_MODEL: &'static str = "claude-3-5-haiku-20241022";
    const API_VERSION: &'static str = "2023-06-01";
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
impl ChatProvider for AnthropicProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn chat(&self, messages: &[Message]) -> Result<String, LlmError> {
        let Some(ref key) = self.api_key else {
            return Err(LlmError::MissingCredential { provider: NAME });
        };

        let url = format!("{}/v1/messages", self.base_url);
        let body = Request {
            model: &self.model,
            messages,
            max_tokens: Self::MAX_TOKENS,
            temperature: Self::TEMPERATURE,
        };

        let mut req = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-api-key", key)
            .header("anthropic-version", Self::API_VERSION);
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
            .content
            .into_iter()
            .find(|block| block.block_type == "text")
            .map(|block| block.text)
            .ok_or_else(|| LlmError::MalformedResponse {
                provider: NAME,
                detail: "response contained no text content block".to_string(),
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
}

#[derive(serde::Deserialize)]
struct Response {
    content: Vec<ContentBlock>,
}

#[derive(serde::Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::llm::types::Role;

    fn messages() -> Vec<Message> {
        vec![
            Message {
                role: Role::User,
                content: "Hello!".to_string(),
            },
            Message {
                role: Role::Assistant,
                content: "Hi there.".to_string(),
            },
            Message {
                role: Role::User,
                content: "How are you?".to_string(),
            },
        ]
    }

    fn provider(base_url: String) -> AnthropicProvider {
        AnthropicProvider::new(base_url, Some("test-key".to_string()), None, None)
    }

    #[tokio::test]
    async fn test_chat_extracts_reply() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .match_header("x-api-key", "test-key")
            .match_header("anthropic-version", "2023-06-01")
            .match_body(mockito::Matcher::PartialJson(json!({
                "model": "claude-3-5-haiku-20241022",
                "messages": [
                    {"role": "user", "content": "Hello!"},
                    {"role": "assistant", "content": "Hi there."},
                    {"role": "user", "content": "How are you?"}
                ]
            })))
            .with_status(200)
            .with_body(r#"{"content":[{"type":"text","text":"Doing well."}]}"#)
            .create_async()
            .await;

        let reply = provider(server.url()).chat(&messages()).await.unwrap();
        assert_eq!(reply, "Doing well.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_before_any_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .expect(0)
            .create_async()
            .await;

        let provider = AnthropicProvider::new(server.url(), None, None, None);
        let err = provider.chat(&messages()).await.unwrap_err();
        assert!(matches!(
            err,
            LlmError::MissingCredential { provider: "anthropic" }
        ));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_surfaces_remote_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/messages")
            .with_status(401)
            .with_body(r#"{"type":"error","error":{"type":"authentication_error"}}"#)
            .create_async()
            .await;

        let err = provider(server.url()).chat(&messages()).await.unwrap_err();
        match err {
            LlmError::Api {
                provider: "anthropic",
                status,
                message,
            } => {
                assert_eq!(status, 401);
                assert!(message.contains("authentication_error"));
            }
            other => panic!("expected Api error, got: {other}"),
        }
    }

    #[tokio::test]
    async fn test_missing_text_block_is_rejected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/messages")
            .with_status(200)
            .with_body(r#"{"content":[]}"#)
            .create_async()
            .await;

        let err = provider(server.url()).chat(&messages()).await.unwrap_err();
        assert!(matches!(
            err,
            LlmError::MalformedResponse { provider: "anthropic", .. }
        ));
    }
}
