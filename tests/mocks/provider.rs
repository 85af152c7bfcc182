//! Mock chat-completions provider for testing
//!
//! Provides wiremock-based mocks for an OpenAI-compatible provider:
//! - POST /v1/chat/completions - success, structured errors, bare failures
//!
//! # Example
//!
//! ```rust,ignore
//! let provider = MockProvider::start().await;
//! provider.mock_chat_completion_success("hi there").await;
//! // Use provider.api_url() as OPENAI_API_URL
//! ```

use serde::Serialize;
use serde_json::Value;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use crate::common::constants::TEST_OPENAI_API_KEY;

/// Path the gateway posts to, relative to the mock server root
pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Mock provider server wrapper
pub struct MockProvider {
    server: MockServer,
}

/// OpenAI-style error body
#[derive(Debug, Serialize)]
pub struct ErrorResponseMock {
    pub error: ErrorMock,
}

#[derive(Debug, Serialize)]
pub struct ErrorMock {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: String,
    pub code: Option<String>,
}

impl MockProvider {
    /// Start a new mock provider server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Base URL to configure as the provider's API URL
    pub fn api_url(&self) -> String {
        format!("{}/v1", self.server.uri())
    }

    /// Mock a successful completion carrying `content`
    ///
    /// Only matches requests that carry the configured bearer credential.
    pub async fn mock_chat_completion_success(&self, content: &str) {
        let body = serde_json::json!({
            "id": "chatcmpl-test123",
            "object": "chat.completion",
            "created": 1706745600,
            "model": "gpt-4-turbo",
            "choices": [
                {
                    "index": 0,
                    "message": {"role": "assistant", "content": content},
                    "finish_reason": "stop"
                }
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 8, "total_tokens": 18}
        });

        Mock::given(method("POST"))
            .and(path(CHAT_COMPLETIONS_PATH))
            .and(header(
                "Authorization",
                format!("Bearer {}", TEST_OPENAI_API_KEY).as_str(),
            ))
            .and(header("Content-Type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mock a 200 response with an arbitrary JSON body
    pub async fn mock_chat_completion_body(&self, body: Value) {
        Mock::given(method("POST"))
            .and(path(CHAT_COMPLETIONS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mock 401 Unauthorized with a structured error body
    pub async fn mock_chat_completion_unauthorized(&self) {
        let response = ErrorResponseMock {
            error: ErrorMock {
                message: "Invalid API key provided".to_string(),
                error_type: "invalid_request_error".to_string(),
                code: Some("invalid_api_key".to_string()),
            },
        };

        Mock::given(method("POST"))
            .and(path(CHAT_COMPLETIONS_PATH))
            .respond_with(ResponseTemplate::new(401).set_body_json(&response))
            .mount(&self.server)
            .await;
    }

    /// Mock 500 with an empty body
    pub async fn mock_chat_completion_bare_500(&self) {
        Mock::given(method("POST"))
            .and(path(CHAT_COMPLETIONS_PATH))
            .respond_with(ResponseTemplate::new(500))
            .mount(&self.server)
            .await;
    }

    /// Requests received on the chat completions path
    pub async fn chat_requests(&self) -> Vec<wiremock::Request> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.url.path() == CHAT_COMPLETIONS_PATH)
            .collect()
    }

    /// JSON bodies of the requests received on the chat completions path
    pub async fn chat_request_bodies(&self) -> Vec<Value> {
        self.chat_requests()
            .await
            .iter()
            .map(|r| serde_json::from_slice(&r.body).expect("request body is JSON"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_records_requests() {
        let provider = MockProvider::start().await;
        provider.mock_chat_completion_bare_500().await;

        let client = reqwest::Client::new();
        let response = client
            .post(format!("{}/chat/completions", provider.api_url()))
            .json(&serde_json::json!({"model": "m"}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 500);
        assert_eq!(provider.chat_request_bodies().await, vec![serde_json::json!({"model": "m"})]);
    }
}
