//! Connection settings for the chat-completions service.

use std::env;

use serde::{Deserialize, Serialize};

use crate::{LlmError, Result};

/// OpenAI-compatible endpoint of the Gemini API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Tool-calling rounds allowed before a summary is forced.
pub const DEFAULT_MAX_TURNS: usize = 20;

/// Settings for [`LlmClient`](crate::LlmClient) and the valuation session.
///
/// The API key has no default and must be supplied through
/// `VALORA_LLM_API_KEY` or explicitly.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Bearer token for the API.
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Base URL; `/chat/completions` is appended.
    pub base_url: String,
    /// Model name sent with every request.
    pub model: String,
    /// Maximum tool-calling rounds per session.
    pub max_turns: usize,
}

impl LlmConfig {
    /// Create a config with the given API key and default endpoint, model and
    /// turn limit.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    /// Load the config from the environment.
    ///
    /// This will also load from a `.env` file if present. Reads
    /// `VALORA_LLM_API_KEY` (required), `VALORA_LLM_BASE_URL`,
    /// `VALORA_LLM_MODEL` and `VALORA_LLM_MAX_TURNS`.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::MissingApiKey`] if no key is set, or
    /// [`LlmError::InvalidConfig`] if the turn limit is not a positive
    /// integer.
    pub fn from_env() -> Result<Self> {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key-value source.
    ///
    /// # Errors
    ///
    /// See [`Self::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("VALORA_LLM_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(LlmError::MissingApiKey)?;

        let mut config = Self::new(api_key);
        if let Some(base_url) = lookup("VALORA_LLM_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(model) = lookup("VALORA_LLM_MODEL") {
            config.model = model;
        }
        if let Some(max_turns) = lookup("VALORA_LLM_MAX_TURNS") {
            config.max_turns = match max_turns.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(LlmError::InvalidConfig {
                        key: "VALORA_LLM_MAX_TURNS",
                        reason: format!("expected a positive integer, got '{max_turns}'"),
                    });
                }
            };
        }
        Ok(config)
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_turns", &self.max_turns)
            .finish()
    }
}
