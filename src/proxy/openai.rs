//! OpenAI-compatible HTTP transport
//!
//! OpenAI and Grok (x.ai) expose the same chat-completions dialect, so one
//! reqwest-based transport serves both.

use tracing::{debug, instrument};

use async_trait::async_trait;

use crate::proxy::{
    headers::build_default_headers,
    provider::{CompletionPayload, ProviderConfig, ProviderTransport, TransportFailure, UpstreamResponse},
};

/// Sends chat completions over HTTP
pub struct OpenAICompatibleTransport {
    client: reqwest::Client,
}

impl OpenAICompatibleTransport {
    /// Create a new transport on top of a shared client
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProviderTransport for OpenAICompatibleTransport {
    fn name(&self) -> &'static str {
        "openai-compatible"
    }

    #[instrument(skip_all, fields(provider = %provider.name, model = %payload.model))]
    async fn send(
        &self,
        provider: &ProviderConfig,
        payload: &CompletionPayload,
    ) -> Result<UpstreamResponse, TransportFailure> {
        let url = provider.completions_url();
        let headers = build_default_headers(&provider.credential).ok_or_else(|| {
            TransportFailure(format!(
                "credential for provider {} is not a valid header value",
                provider.name
            ))
        })?;

        debug!(
            url = %url,
            messages = payload.messages.len(),
            max_tokens = payload.max_tokens,
            "Sending request to provider"
        );

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                debug!(url = %url, error = %e, "Failed to send request to provider");
                TransportFailure::from(e)
            })?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;

        debug!(
            url = %url,
            status = status,
            body_len = body.len(),
            "Received response from provider"
        );

        Ok(UpstreamResponse { status, body })
    }
}
