//! OpenAI-compatible chat completions adapter
//!
//! Implements the reasoning gateway against any endpoint that speaks the
//! OpenAI chat completions protocol. The per-call timeout is enforced by
//! the pipeline, so the HTTP client itself carries a generous ceiling.

use async_trait::async_trait;
use council_application::{GatewayError, ReasoningGateway};
use council_domain::Model;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Ceiling on a single HTTP request, above any pipeline-level timeout
const CLIENT_TIMEOUT: Duration = Duration::from_secs(600);

/// Errors constructing a provider adapter
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("API key not configured: environment variable {0} is not set")]
    MissingApiKey(String),

    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}

/// Sanitize API error messages so credentials never reach logs or output
fn sanitize_api_error(error: &str) -> String {
    let lower = error.to_lowercase();

    if lower.contains("api key")
        || lower.contains("unauthorized")
        || lower.contains("authentication")
    {
        return "API authentication error. Check the configured API key.".to_string();
    }

    if lower.contains("rate limit") || lower.contains("quota") {
        return "Provider rate limit exceeded. Try again later.".to_string();
    }

    if error.len() > 300 {
        let mut end = 300;
        while !error.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...(truncated)", &error[..end])
    } else {
        error.to_string()
    }
}

/// Adapter configuration
#[derive(Clone)]
pub struct OpenAiCompatConfig {
    pub api_key: String,
    pub base_url: String,
}

// Custom Debug implementation so the API key never appears in debug output
impl fmt::Debug for OpenAiCompatConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiCompatConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl OpenAiCompatConfig {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Read the API key from the named environment variable
    pub fn from_env(api_key_env: &str, base_url: impl Into<String>) -> Result<Self, ProviderError> {
        let api_key = std::env::var(api_key_env)
            .map_err(|_| ProviderError::MissingApiKey(api_key_env.to_string()))?;
        Ok(Self::new(api_key, base_url))
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Gateway to an OpenAI-compatible chat completions endpoint
pub struct OpenAiCompatGateway {
    client: Client,
    config: OpenAiCompatConfig,
}

impl OpenAiCompatGateway {
    pub fn new(config: OpenAiCompatConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(CLIENT_TIMEOUT)
            .build()
            .map_err(|e| ProviderError::Client(e.to_string()))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl ReasoningGateway for OpenAiCompatGateway {
    async fn complete(
        &self,
        model: &Model,
        system: &str,
        prompt: &str,
    ) -> Result<String, GatewayError> {
        let request = ChatRequest {
            model: model.as_str().to_string(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt.to_string(),
                },
            ],
            // Low temperature: assessments should be reproducible, not creative
            temperature: 0.2,
        };

        debug!(model = %model, "Sending chat completion request");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    GatewayError::ConnectionError(sanitize_api_error(&e.to_string()))
                } else if e.is_timeout() {
                    GatewayError::Timeout
                } else {
                    GatewayError::RequestFailed(sanitize_api_error(&e.to_string()))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status == StatusCode::NOT_FOUND {
                return Err(GatewayError::ModelNotAvailable(model.to_string()));
            }
            return Err(GatewayError::RequestFailed(format!(
                "{status}: {}",
                sanitize_api_error(&body)
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::RequestFailed(format!("invalid response body: {e}")))?;

        let content = chat_response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| GatewayError::RequestFailed("no choices in response".to_string()))?;

        Ok(content)
    }
}
