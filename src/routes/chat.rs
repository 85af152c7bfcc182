//! Chat endpoints
//!
//! - `POST /api/ai/chat` (and `POST /chat`): forward a conversation
//! - `POST /api/ai`: forward a single prompt
//!
//! Both hand the request to the gateway and translate its outcome into an
//! HTTP response. Request bodies are parsed by hand so that malformed JSON is
//! reported as a 400 with the usual `{"error": ...}` body.
//!
//! `/api/ai` serves two client contracts at once: replies carry both `text`
//! and `{success, result}`, and errors carry `success: false` next to `error`.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::{
    error::{AppError, AppResult},
    gateway::{ChatRequest, ChatTurn, GatewayResult},
    AppState,
};

/// Body of a conversation request
#[derive(Debug, Clone, Deserialize)]
pub struct ChatBody {
    #[serde(default, alias = "turns")]
    pub messages: Option<Vec<ChatTurn>>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
}

/// Successful conversation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    pub raw: Value,
}

/// Body of a single-prompt request
#[derive(Debug, Clone, Deserialize)]
pub struct PromptBody {
    #[serde(default, alias = "input")]
    pub prompt: Option<String>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
}

/// Successful single-prompt response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptReply {
    pub text: String,
    pub success: bool,
    pub result: String,
}

impl PromptReply {
    fn new(text: String) -> Self {
        Self {
            result: text.clone(),
            text,
            success: true,
        }
    }
}

/// Failed single-prompt response, rendered as `{"success": false, "error": ...}`
#[derive(Debug)]
pub struct PromptError(AppError);

impl From<AppError> for PromptError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PromptError {
    fn into_response(self) -> Response {
        let body = json!({"success": false, "error": self.0.to_string()});
        (self.0.status_code(), Json(body)).into_response()
    }
}

fn parse_body<T: for<'de> Deserialize<'de>>(body: &Bytes) -> AppResult<T> {
    serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, "Rejected request body");
        AppError::BadRequest("Invalid request body".to_string())
    })
}

/// Split a gateway result into reply text and raw payload, or an HTTP error
fn into_reply(result: GatewayResult) -> AppResult<(String, Value)> {
    if let Some(err) = AppError::from_gateway(&result) {
        return Err(err);
    }

    Ok((
        result.text.unwrap_or_default(),
        result.raw_provider_payload.unwrap_or(Value::Null),
    ))
}

/// Handle conversation requests
pub async fn chat(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> AppResult<Json<ChatReply>> {
    let body: ChatBody = parse_body(&body)?;

    let turns = body
        .messages
        .ok_or_else(|| AppError::BadRequest("messages array required".to_string()))?;

    debug!(turns = turns.len(), "Processing chat request");

    let result = state
        .gateway
        .dispatch(ChatRequest {
            turns,
            max_tokens: body.max_tokens,
            provider_override: body.provider,
            model_override: body.model,
        })
        .await;

    let (reply, raw) = into_reply(result)?;
    Ok(Json(ChatReply { reply, raw }))
}

/// Handle single-prompt requests
///
/// The prompt is sent as one `user` turn.
pub async fn prompt(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<PromptReply>, PromptError> {
    let body: PromptBody = parse_body(&body)?;

    let prompt = body
        .prompt
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("prompt required".to_string()))?;

    let result = state
        .gateway
        .dispatch(ChatRequest {
            turns: vec![ChatTurn::user(prompt)],
            max_tokens: body.max_tokens,
            provider_override: body.provider,
            model_override: body.model,
        })
        .await;

    let (text, _) = into_reply(result)?;
    Ok(Json(PromptReply::new(text)))
}
