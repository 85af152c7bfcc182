//! AI provider abstraction layer
//!
//! Defines the provider identity, the immutable per-provider configuration the
//! gateway holds, and the transport trait that carries one outbound call.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::config::{Config, Credential};
use crate::gateway::ProviderMessage;
use crate::proxy::headers::build_default_headers;

/// Upstream model providers the gateway knows how to reach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    Grok,
}

impl ProviderKind {
    /// All known providers
    pub const ALL: [ProviderKind; 2] = [ProviderKind::OpenAi, ProviderKind::Grok];

    /// Provider name for logging and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Grok => "grok",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "grok" | "xai" => Ok(ProviderKind::Grok),
            other => Err(format!("unknown provider '{}'", other)),
        }
    }
}

/// Everything needed to call one provider
///
/// Built once at startup and never mutated. Holds no per-request state.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub name: ProviderKind,
    pub model_id: String,
    pub credential: Credential,
    pub endpoint: String,
}

impl ProviderConfig {
    /// Build the config for `kind`, or `None` if it has no usable credential
    ///
    /// A credential that cannot be sent as a header value is logged here and
    /// the provider is left unconfigured.
    pub fn from_config(config: &Config, kind: ProviderKind) -> Option<Self> {
        let settings = config.provider_settings(kind);
        let credential = settings.api_key.clone()?;

        if build_default_headers(&credential).is_none() {
            warn!(
                provider = %kind,
                "Credential contains characters not allowed in a header; provider left unconfigured"
            );
            return None;
        }

        Some(Self {
            name: kind,
            model_id: settings.model.clone(),
            credential,
            endpoint: settings.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Chat completions URL for this provider
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint)
    }
}

/// Outbound chat-completion request
///
/// Only `model`, `messages` and `max_tokens` go on the wire; the provider id
/// selects where the request is sent.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionPayload {
    #[serde(skip)]
    pub provider: ProviderKind,
    pub model: String,
    pub messages: Vec<ProviderMessage>,
    pub max_tokens: u32,
}

/// Raw response from the provider, before any interpretation
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: Bytes,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The provider could not be reached or the response could not be read
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportFailure(pub String);

impl From<reqwest::Error> for TransportFailure {
    fn from(err: reqwest::Error) -> Self {
        // reqwest errors carry the URL, never headers
        TransportFailure(err.to_string())
    }
}

/// Carries one outbound chat-completion call
///
/// # Security
///
/// Implementations MUST:
/// - Take the credential only from the `ProviderConfig` they are handed
/// - Never log the credential or the message contents
#[async_trait]
pub trait ProviderTransport: Send + Sync {
    /// Transport name for logging
    fn name(&self) -> &'static str;

    /// Send `payload` to `provider` and return the raw response
    async fn send(
        &self,
        provider: &ProviderConfig,
        payload: &CompletionPayload,
    ) -> Result<UpstreamResponse, TransportFailure>;
}
