//! Error types for the language-model boundary.

use thiserror::Error;
use valora_traits::ValoraError;

/// Errors that can occur when talking to the language model or preparing
/// its inputs.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Missing API key.
    #[error("VALORA_LLM_API_KEY environment variable not set")]
    MissingApiKey,

    /// A configuration value could not be parsed.
    #[error("Invalid configuration for {key}: {reason}")]
    InvalidConfig {
        /// The environment variable or setting name.
        key: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The API returned an error.
    #[error("LLM API error: {0}")]
    Api(String),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded by the LLM API")]
    RateLimitExceeded,

    /// The API returned no choices, or a message with no content.
    #[error("LLM returned an empty response")]
    EmptyResponse,

    /// The disclosure document is missing or incomplete.
    #[error("No document content found for {0}")]
    MissingDocument(String),

    /// The model's forecast could not be used.
    #[error("Invalid forecast: {0}")]
    InvalidForecast(String),

    /// A valuation calculation failed.
    #[error(transparent)]
    Valuation(#[from] ValoraError),

    /// Environment variable error.
    #[error("Environment error: {0}")]
    Env(#[from] dotenvy::Error),

    /// Reading a local file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
