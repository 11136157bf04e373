//! Stage weight and ROI commands.

use anyhow::Result;
use valora_combine::StageWeights;
use valora_methods::typical_roi;
use valora_traits::rounding::format_percent;
use valora_traits::{Stage, ValuationMethod};

use super::banner;

fn stages(filter: Option<&str>) -> Result<Vec<Stage>> {
    Ok(match filter {
        Some(name) => vec![name.parse()?],
        None => Stage::ALL.to_vec(),
    })
}

/// Print the weight table for one or all stages.
pub(crate) fn show_weights(stage: Option<&str>) -> Result<()> {
    banner("Valuation Method Weights");

    print!("{:<12}", "Stage");
    for method in ValuationMethod::ALL {
        print!("{:>18}", method.as_str());
    }
    println!();
    println!("{}", "-".repeat(12 + 18 * ValuationMethod::ALL.len()));

    for stage in stages(stage)? {
        let weights = StageWeights::for_stage(stage);
        print!("{:<12}", stage.as_str());
        for (_, weight) in weights.iter() {
            print!("{:>18}", format_percent(weight));
        }
        println!();
    }
    println!();

    Ok(())
}

/// Print the typical VC target return for one or all stages.
pub(crate) fn show_roi(stage: Option<&str>) -> Result<()> {
    banner("Typical VC Target Return");

    for stage in stages(stage)? {
        match typical_roi(stage) {
            Ok(roi) => println!("  {:<12} {:>8.2}%", stage.as_str(), roi * 100.0),
            Err(e) => println!("  {:<12} n/a ({e})", stage.as_str()),
        }
    }
    println!();

    Ok(())
}
