//! Full-projection DCF command.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use valora_dcf::DcfRequest;

use super::banner;

/// Load a DCF request file, run it and print the report.
pub(crate) fn run_dcf(path: &Path, json: bool) -> Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let request: DcfRequest = serde_json::from_str(&text)
        .with_context(|| format!("invalid DCF request in {}", path.display()))?;
    let report = request.run()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    banner("DCF Valuation");
    let params = &request.parameters;
    println!("Horizon:        {} years", params.horizon());
    println!("Discount rate:  {:.2}%", params.discount_rate() * 100.0);
    println!("Tax rate:       {:.2}%", params.tax_rate() * 100.0);
    println!("Terminal value: {}", params.terminal().name());
    println!();
    println!("{}", report.to_markdown());
    println!();

    Ok(())
}
