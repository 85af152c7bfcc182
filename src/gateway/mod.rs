//! Provider gateway
//!
//! Owns provider selection, credential custody and response normalization.
//! A `Gateway` is built once at startup from `Config` and shared behind an
//! `Arc`; it holds no mutable state, so concurrent dispatches need no locking.
//!
//! Every call to [`Gateway::dispatch`] returns a [`GatewayResult`]. Failures
//! are reported through [`Outcome`], never as `Err` or a panic.

pub mod normalize;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use crate::config::Config;
use crate::proxy::{
    logging::RequestContext, CompletionPayload, ProviderConfig, ProviderKind, ProviderTransport,
    UpstreamResponse,
};
use crate::routes::metrics::record_dispatch;

pub use normalize::{normalize, ChatTurn, ProviderMessage, Role, ValidationError};

/// A conversation to forward upstream
#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub turns: Vec<ChatTurn>,
    pub max_tokens: Option<u32>,
    pub provider_override: Option<String>,
    pub model_override: Option<String>,
}

impl ChatRequest {
    pub fn new(turns: Vec<ChatTurn>) -> Self {
        Self {
            turns,
            ..Default::default()
        }
    }
}

/// How a dispatch ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Ok,
    ProviderError,
    TransportError,
    ValidationError,
    Misconfigured,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Ok => "ok",
            Outcome::ProviderError => "provider_error",
            Outcome::TransportError => "transport_error",
            Outcome::ValidationError => "validation_error",
            Outcome::Misconfigured => "misconfigured",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform result of a dispatch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GatewayResult {
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_provider_payload: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl GatewayResult {
    pub fn ok(text: String, raw: Value) -> Self {
        Self {
            outcome: Outcome::Ok,
            text: Some(text),
            raw_provider_payload: Some(raw),
            error_detail: None,
        }
    }

    pub fn failure(outcome: Outcome, detail: impl Into<String>) -> Self {
        Self {
            outcome,
            text: None,
            raw_provider_payload: None,
            error_detail: Some(detail.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.outcome == Outcome::Ok
    }
}

/// Lifecycle state of the gateway
///
/// The gateway is `Uninitialized` only while it is being built; construction
/// always ends in `Ready` or `Misconfigured`. `Misconfigured` is terminal until
/// the process restarts with a corrected configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayStatus {
    Uninitialized,
    Ready,
    Misconfigured { reason: String },
}

/// Provider gateway
pub struct Gateway {
    status: GatewayStatus,
    default_provider: ProviderKind,
    providers: HashMap<ProviderKind, ProviderConfig>,
    default_max_tokens: u32,
    transport: Arc<dyn ProviderTransport>,
}

impl Gateway {
    /// Build a gateway from application config
    ///
    /// Providers without a credential are left out. If the default provider
    /// has none, the gateway comes up `Misconfigured`.
    pub fn from_config(config: &Config, transport: Arc<dyn ProviderTransport>) -> Self {
        let providers = ProviderKind::ALL
            .iter()
            .filter_map(|kind| ProviderConfig::from_config(config, *kind))
            .collect();

        Self::new(
            config.provider,
            providers,
            config.default_max_tokens,
            transport,
        )
    }

    /// Build a gateway from already-resolved provider configs
    pub fn new(
        default_provider: ProviderKind,
        providers: Vec<ProviderConfig>,
        default_max_tokens: u32,
        transport: Arc<dyn ProviderTransport>,
    ) -> Self {
        let providers: HashMap<_, _> = providers.into_iter().map(|p| (p.name, p)).collect();

        let mut gateway = Self {
            status: GatewayStatus::Uninitialized,
            default_provider,
            providers,
            default_max_tokens,
            transport,
        };

        gateway.status = if default_max_tokens == 0 {
            GatewayStatus::Misconfigured {
                reason: "default token ceiling must be greater than zero".to_string(),
            }
        } else if gateway.providers.contains_key(&default_provider) {
            GatewayStatus::Ready
        } else {
            GatewayStatus::Misconfigured {
                reason: format!(
                    "no usable credential configured for provider {}",
                    default_provider
                ),
            }
        };

        let configured: Vec<&str> = gateway.providers.keys().map(|k| k.as_str()).collect();
        match &gateway.status {
            GatewayStatus::Ready => info!(
                provider = %default_provider,
                configured = ?configured,
                default_max_tokens = default_max_tokens,
                transport = gateway.transport.name(),
                "Gateway ready"
            ),
            GatewayStatus::Misconfigured { reason } => error!(
                provider = %default_provider,
                reason = %reason,
                "Gateway misconfigured; chat requests will be rejected until restart"
            ),
            GatewayStatus::Uninitialized => {}
        }

        gateway
    }

    pub fn status(&self) -> &GatewayStatus {
        &self.status
    }

    pub fn is_ready(&self) -> bool {
        self.status == GatewayStatus::Ready
    }

    pub fn default_provider(&self) -> ProviderKind {
        self.default_provider
    }

    pub fn default_max_tokens(&self) -> u32 {
        self.default_max_tokens
    }

    /// Forward a conversation to the selected provider
    pub async fn dispatch(&self, request: ChatRequest) -> GatewayResult {
        let provider_label = match request.provider_override.as_deref() {
            Some(name) => name
                .parse::<ProviderKind>()
                .map(|kind| kind.as_str())
                .unwrap_or("unknown"),
            None => self.default_provider.as_str(),
        };
        let ctx = RequestContext::new(provider_label).with_turns(request.turns.len());

        let (provider, payload) = match self.prepare(request) {
            Ok(prepared) => prepared,
            Err(result) => return self.finish(&ctx, result),
        };

        let ctx = ctx.with_model(payload.model.clone());
        let result = match self.transport.send(provider, &payload).await {
            Ok(response) => interpret_response(response),
            Err(failure) => GatewayResult::failure(Outcome::TransportError, failure.0),
        };

        self.finish(&ctx, result)
    }

    /// Validate the request and build the outbound payload
    fn prepare(
        &self,
        request: ChatRequest,
    ) -> Result<(&ProviderConfig, CompletionPayload), GatewayResult> {
        if let GatewayStatus::Misconfigured { reason } = &self.status {
            return Err(GatewayResult::failure(
                Outcome::Misconfigured,
                format!("gateway is misconfigured: {}", reason),
            ));
        }

        let messages = normalize(&request.turns).map_err(validation_failure)?;

        if request.max_tokens == Some(0) {
            return Err(validation_failure(ValidationError::InvalidMaxTokens));
        }

        let provider = match request.provider_override.as_deref() {
            Some(name) => name
                .parse::<ProviderKind>()
                .ok()
                .and_then(|kind| self.providers.get(&kind))
                .ok_or_else(|| validation_failure(ValidationError::UnknownProvider(name.to_string())))?,
            None => self
                .providers
                .get(&self.default_provider)
                .ok_or_else(|| {
                    GatewayResult::failure(Outcome::Misconfigured, "default provider unavailable")
                })?,
        };

        let model = request
            .model_override
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| provider.model_id.clone());

        Ok((
            provider,
            CompletionPayload {
                provider: provider.name,
                model,
                messages,
                max_tokens: request.max_tokens.unwrap_or(self.default_max_tokens),
            },
        ))
    }

    fn finish(&self, ctx: &RequestContext, result: GatewayResult) -> GatewayResult {
        ctx.log_outcome(result.outcome, result.error_detail.as_deref());
        record_dispatch(
            &ctx.provider,
            result.outcome.as_str(),
            ctx.start_time.elapsed().as_secs_f64(),
        );
        result
    }
}

fn validation_failure(err: ValidationError) -> GatewayResult {
    GatewayResult::failure(Outcome::ValidationError, err.to_string())
}

/// Map a raw provider response onto an outcome
fn interpret_response(response: UpstreamResponse) -> GatewayResult {
    let decoded: Option<Value> = serde_json::from_slice(&response.body).ok();

    if let Some(message) = decoded.as_ref().and_then(provider_error_message) {
        return GatewayResult::failure(Outcome::ProviderError, message);
    }

    if !response.is_success() {
        if let Some(message) = decoded
            .as_ref()
            .and_then(|body| body.get("message"))
            .and_then(Value::as_str)
        {
            return GatewayResult::failure(Outcome::ProviderError, message);
        }
        return GatewayResult::failure(
            Outcome::TransportError,
            format!("provider returned HTTP {}", response.status),
        );
    }

    let Some(body) = decoded else {
        return GatewayResult::failure(
            Outcome::ProviderError,
            "provider returned a body that is not valid JSON",
        );
    };

    match reply_text(&body) {
        Some(text) => GatewayResult::ok(text, body),
        None => GatewayResult::failure(Outcome::ProviderError, "provider returned an empty reply"),
    }
}

/// Message from a structured error body, if the body is one
///
/// Accepts `{"error": {"message": "..."}}` and `{"error": "..."}`.
fn provider_error_message(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::String(message) => Some(message.clone()),
        Value::Object(obj) => Some(
            obj.get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| Value::Object(obj.clone()).to_string()),
        ),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Reply text from the first choice, if present and not blank
fn reply_text(body: &Value) -> Option<String> {
    let first = body.get("choices")?.as_array()?.first()?;

    first
        .pointer("/message/content")
        .and_then(Value::as_str)
        .or_else(|| first.get("text").and_then(Value::as_str))
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
}
