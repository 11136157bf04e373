//! Model-driven commands: forecast extraction and valuation sessions.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use valora_llm::{
    DocumentStore, Forecaster, InMemoryDocumentStore, LlmClient, LlmConfig, SessionConfig,
    ValuationSession,
};
use valora_tools::ToolRegistry;

use super::banner;

fn load_document(path: &Path, id: &str) -> Result<valora_llm::DisclosureDocument> {
    let store = InMemoryDocumentStore::from_path(path)
        .with_context(|| format!("failed to load documents from {}", path.display()))?;
    Ok(store.fetch(id)?)
}

/// Ask the model for a forecast and print the recomputed projection.
pub(crate) async fn run_forecast(documents: &Path, id: &str, json: bool) -> Result<()> {
    let document = load_document(documents, id)?;
    let client = LlmClient::from_env()?;
    info!(model = %client.config().model, id, "requesting forecast");

    let report = Forecaster::new(&client).forecast(&document).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    banner("Five-Year Forecast");
    println!("{}", report.to_markdown());
    println!();

    Ok(())
}

/// Run a tool-calling valuation session and print the model's report.
pub(crate) async fn run_session(
    documents: &Path,
    id: &str,
    max_turns: Option<usize>,
    verbose: bool,
) -> Result<()> {
    let document = load_document(documents, id)?;
    let config = LlmConfig::from_env()?;
    let session_config = SessionConfig {
        max_turns: max_turns.unwrap_or(config.max_turns),
        ..SessionConfig::default()
    };
    let client = LlmClient::new(config);
    let registry = ToolRegistry::with_defaults();

    info!(
        model = %client.config().model,
        id,
        max_turns = session_config.max_turns,
        "starting valuation session"
    );
    let outcome = ValuationSession::new(&client, &registry)
        .with_config(session_config)
        .run(&document)
        .await?;

    banner("Valuation Report");

    if verbose {
        println!("Tool calls ({}):", outcome.invocations.len());
        for invocation in &outcome.invocations {
            println!("  {}({})", invocation.function, invocation.arguments);
            println!("    -> {}", invocation.response);
        }
        println!();
    }

    println!("{}", outcome.final_response);
    println!();
    if outcome.summarized {
        println!(
            "(turn limit of {} reached; report is a forced summary)",
            outcome.turns
        );
    }

    Ok(())
}
