//! Tool registry commands.

use anyhow::Result;
use valora_tools::ToolRegistry;

use super::banner;

/// List registered tools, optionally with their JSON schemas.
pub(crate) fn list_tools(verbose: bool) -> Result<()> {
    banner("Available Tools");

    let registry = ToolRegistry::with_defaults();
    for spec in registry.specs() {
        if verbose {
            println!("{}", spec.name);
            println!("  {}", spec.description);
            println!("{}", serde_json::to_string_pretty(&spec.parameters)?);
            println!();
        } else {
            println!("  {}", spec.name);
        }
    }

    if !verbose {
        println!("\nUse --verbose for descriptions and parameter schemas.\n");
    }

    Ok(())
}

/// Dispatch one tool call and print the payload.
///
/// Tool failures are printed as `{error, kind}` payloads, exactly as the
/// model would see them.
pub(crate) fn call_tool(name: &str, args: &str) -> Result<()> {
    let registry = ToolRegistry::with_defaults();
    let payload = registry.dispatch(name, args);
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
