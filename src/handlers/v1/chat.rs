//! Chat completion HTTP handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::llm::Message;
use crate::response;
use crate::server::AppState;

#[derive(Deserialize)]
pub struct ChatCompletionRequest {
    messages: Vec<Message>,
}

#[derive(Serialize)]
pub struct ChatCompletionResponse {
    reply: String,
}

/// POST /api/v1/chat
///
/// Relays the message sequence to the configured provider and returns the
/// extracted reply text. Provider-side failures map to 502; configuration
/// problems (missing credential) map to 500.
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatCompletionRequest>,
) -> Response {
    match state.dispatcher.dispatch(&req.messages).await {
        Ok(reply) => (StatusCode::OK, Json(ChatCompletionResponse { reply })).into_response(),
        Err(e) if e.is_provider_failure() => {
            response::bad_gateway(format!("chat request failed: {e}")).into_response()
        }
        // MissingCredential / UnknownProvider: a deployment problem, not an
        // upstream one.
        Err(e) => response::internal_error(e.to_string()).into_response(),
    }
}
