//! OpenRouter API client for chat completions.

use std::env;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::transcript::ChatMessage;
use crate::{Error, Result};

const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1";

/// Completion sampling parameters, sent verbatim in the request payload.
#[derive(Debug, Clone)]
pub struct CompletionParams {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: Option<f32>,
}

impl CompletionParams {
    pub fn from_config(config: &Config) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            top_p: config.top_p,
        }
    }
}

/// OpenRouter client.
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl OpenRouterClient {
    /// Create client from environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("OPENROUTER_API_KEY").map_err(|_| Error::MissingApiKey)?;
        Self::new(api_key, OPENROUTER_API_URL, Duration::from_secs(30))
    }

    /// Create client from loaded configuration.
    /// A missing credential is a hard error before any chat happens.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.api_key.clone(),
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Create client with an API key, base URL and request timeout.
    /// The timeout is a fixed wall-clock limit; requests are never retried.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::MissingApiKey);
        }

        let http = Client::builder()
            .user_agent("fraoula_chatbot/0.1.0")
            .timeout(timeout)
            .build()
            .map_err(|e| Error::ConnectionError(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            http,
            api_key,
            base_url: base_url.into(),
        })
    }

    /// Chat completion.
    pub async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
        params: &CompletionParams,
    ) -> Result<String> {
        let request = ChatRequest {
            model: params.model.clone(),
            messages,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::ConnectionError(format!("OpenRouter request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::ConnectionError(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(Error::ApiError(format!(
                "OpenRouter error {}: {}",
                status, text
            )));
        }

        let chat_response: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| Error::ApiError(format!("Invalid response: {}", e)))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| Error::ApiError("Empty response from OpenRouter".to_string()))
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn params() -> CompletionParams {
        CompletionParams {
            model: "mistralai/mistral-7b-instruct".to_string(),
            max_tokens: 64,
            temperature: 0.2,
            top_p: None,
        }
    }

    fn client(server: &MockServer) -> OpenRouterClient {
        let mut client =
            OpenRouterClient::new("test_key", OPENROUTER_API_URL, Duration::from_secs(5))
                .expect("client");
        client.base_url = server.base_url();
        client
    }

    #[test]
    fn test_new_rejects_empty_key() {
        let err =
            OpenRouterClient::new("   ", OPENROUTER_API_URL, Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, Error::MissingApiKey));
    }

    #[tokio::test]
    async fn chat_completion_returns_first_choice_content() {
        let server = MockServer::start_async().await;

        let completion_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("Authorization", "Bearer test_key");
            then.status(200).json_body(json!({
                "choices": [
                    { "message": { "role": "assistant", "content": "Hello!" } }
                ]
            }));
        });

        let reply = client(&server)
            .chat_completion(vec![ChatMessage::user("Hi")], &params())
            .await
            .unwrap();

        assert_eq!(reply, "Hello!");
        completion_mock.assert_calls(1);
    }

    #[tokio::test]
    async fn chat_completion_returns_error_on_non_success_status() {
        let server = MockServer::start_async().await;

        let completion_mock = server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(429).body("rate limited");
        });

        let err = client(&server)
            .chat_completion(vec![], &params())
            .await
            .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("429"));
        assert!(msg.contains("rate limited"));
        completion_mock.assert_calls(1);
    }

    #[tokio::test]
    async fn chat_completion_returns_error_on_invalid_json() {
        let server = MockServer::start_async().await;

        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).body("not json");
        });

        let err = client(&server)
            .chat_completion(vec![], &params())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Invalid response"));
    }

    #[tokio::test]
    async fn chat_completion_returns_error_on_empty_choices() {
        let server = MockServer::start_async().await;

        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(json!({ "choices": [] }));
        });

        let err = client(&server)
            .chat_completion(vec![], &params())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Empty response from OpenRouter"));
    }

    #[tokio::test]
    async fn chat_completion_returns_error_on_missing_message_content() {
        let server = MockServer::start_async().await;

        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(json!({
                "choices": [
                    { "message": { "role": "assistant", "content": null } }
                ]
            }));
        });

        let err = client(&server)
            .chat_completion(vec![], &params())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Empty response from OpenRouter"));
    }

    #[tokio::test]
    async fn payload_omits_top_p_when_unset() {
        let server = MockServer::start_async().await;

        let completion_mock = server.mock(|when, then| {
            when.method(POST).path("/chat/completions").is_true(|req| {
                let body = String::from_utf8_lossy(req.body().as_ref());
                !body.contains("top_p") && body.contains("max_tokens")
            });
            then.status(200).json_body(json!({
                "choices": [
                    { "message": { "role": "assistant", "content": "Ok" } }
                ]
            }));
        });

        client(&server)
            .chat_completion(vec![ChatMessage::user("q")], &params())
            .await
            .unwrap();

        completion_mock.assert_calls(1);
    }

    #[tokio::test]
    async fn payload_includes_top_p_when_set() {
        let server = MockServer::start_async().await;

        let completion_mock = server.mock(|when, then| {
            when.method(POST).path("/chat/completions").is_true(|req| {
                let body = String::from_utf8_lossy(req.body().as_ref());
                body.contains("top_p") && body.contains("mistralai/mistral-7b-instruct")
            });
            then.status(200).json_body(json!({
                "choices": [
                    { "message": { "role": "assistant", "content": "Ok" } }
                ]
            }));
        });

        let mut with_top_p = params();
        with_top_p.top_p = Some(0.9);

        client(&server)
            .chat_completion(vec![ChatMessage::user("q")], &with_top_p)
            .await
            .unwrap();

        completion_mock.assert_calls(1);
    }

    #[tokio::test]
    async fn connection_failure_is_reported_not_retried() {
        // Point at a closed port: the request fails fast and surfaces
        // as a connection error without retrying.
        let client = OpenRouterClient::new(
            "test_key",
            "http://127.0.0.1:9",
            Duration::from_secs(1),
        )
        .unwrap();

        let err = client
            .chat_completion(vec![ChatMessage::user("q")], &params())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::ConnectionError(_)));
    }
}
