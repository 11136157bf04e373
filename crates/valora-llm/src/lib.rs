//! Language-model boundary for Valora.
//!
//! This crate connects the valuation tools to a chat-completions model:
//!
//! - [`LlmClient`] talks to any OpenAI-compatible `/chat/completions`
//!   endpoint and implements [`ChatModel`].
//! - [`ValuationSession`] lets the model call the tools in a
//!   [`ToolRegistry`](valora_tools::ToolRegistry) until it can report a
//!   valuation.
//! - [`Forecaster`] asks the model for a five-year operating forecast and
//!   recomputes the FCFF schedule from it.
//! - [`DocumentStore`] supplies the disclosure text and Q&A both flows read.
//!
//! # Usage
//!
//! ```rust,ignore
//! use valora_llm::{DocumentStore, InMemoryDocumentStore, LlmClient, ValuationSession};
//! use valora_tools::ToolRegistry;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = LlmClient::from_env()?;
//!     let store = InMemoryDocumentStore::from_path("documents.json")?;
//!     let document = store.fetch("acme")?;
//!
//!     let registry = ToolRegistry::with_defaults();
//!     let outcome = ValuationSession::new(&client, &registry).run(&document).await?;
//!     println!("{}", outcome.final_response);
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! Set `VALORA_LLM_API_KEY` in your environment or `.env` file:
//!
//! ```bash
//! VALORA_LLM_API_KEY=your_api_key_here
//! # optional
//! VALORA_LLM_BASE_URL=https://generativelanguage.googleapis.com/v1beta/openai
//! VALORA_LLM_MODEL=gemini-2.0-flash
//! VALORA_LLM_MAX_TURNS=20
//! ```

mod client;
mod config;
mod error;
mod forecast;
mod session;
mod store;
mod types;

#[cfg(test)]
mod test_support;

pub use client::{ChatModel, LlmClient};
pub use config::{DEFAULT_BASE_URL, DEFAULT_MAX_TURNS, DEFAULT_MODEL, LlmConfig};
pub use error::LlmError;
pub use forecast::{
    Forecast, ForecastAssumptions, ForecastReport, Forecaster, build_prompt, parse_forecast,
    strip_code_fences,
};
pub use session::{
    SUMMARY_PROMPT, SYSTEM_PROMPT, SessionConfig, SessionOutcome, ToolInvocation,
    ValuationSession, opening_message,
};
pub use store::{DisclosureDocument, DocumentStore, InMemoryDocumentStore, QuestionAnswer};
pub use types::*;

/// Result type for language-model operations.
pub type Result<T> = std::result::Result<T, LlmError>;
