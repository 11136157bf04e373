//! Chat-completions client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::{
    LlmConfig, LlmError, Result,
    types::{ChatMessage, ChatRequest, ChatResponse},
};

/// A model that can answer a chat request.
///
/// [`LlmClient`] talks to a real endpoint; tests substitute scripted models.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send the conversation and return the model's reply.
    async fn complete(&self, request: ChatRequest) -> Result<ChatMessage>;

    /// Model name, for logging.
    fn model(&self) -> &str;
}

/// Client for an OpenAI-compatible chat-completions API.
#[derive(Debug, Clone)]
pub struct LlmClient {
    client: Client,
    config: LlmConfig,
}

#[derive(Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    #[serde(flatten)]
    request: &'a ChatRequest,
}

impl LlmClient {
    /// Create a client from explicit settings.
    #[must_use]
    pub fn new(config: LlmConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Create a client from `VALORA_LLM_*` environment variables.
    ///
    /// # Errors
    ///
    /// See [`LlmConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(LlmConfig::from_env()?))
    }

    /// The settings in use.
    #[must_use]
    pub const fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    async fn post(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let body = WireRequest {
            model: &self.config.model,
            request,
        };
        let response = self
            .client
            .post(self.url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::Api(format!("HTTP {status}: {text}")));
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            LlmError::Api(format!("Failed to parse response: {e}. Response: {text}"))
        })
    }
}

#[async_trait]
impl ChatModel for LlmClient {
    async fn complete(&self, request: ChatRequest) -> Result<ChatMessage> {
        debug!(
            model = %self.config.model,
            messages = request.messages.len(),
            tools = request.tools.len(),
            "sending chat request"
        );
        let response = self.post(&request).await?;
        if let Some(usage) = response.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "chat response received"
            );
        }
        response.into_message()
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChatMessage, ToolChoice};
    use serde_json::json;

    #[test]
    fn test_url_joins_base() {
        let mut config = LlmConfig::new("k");
        config.base_url = "http://localhost:1234/v1/".to_string();
        let client = LlmClient::new(config);
        assert_eq!(client.url(), "http://localhost:1234/v1/chat/completions");
    }

    #[test]
    fn test_wire_request_includes_model() {
        let request = ChatRequest::new(vec![ChatMessage::user("hello")])
            .with_tools(vec![json!({"type": "function"})], ToolChoice::Auto)
            .with_temperature(0.1);
        let value = serde_json::to_value(WireRequest {
            model: "m",
            request: &request,
        })
        .unwrap();
        assert_eq!(value["model"], "m");
        assert_eq!(value["tool_choice"], "auto");
        assert_eq!(value["messages"][0]["role"], "user");
    }
}
