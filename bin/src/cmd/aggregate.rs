//! Weighted aggregation command.

use anyhow::Result;
use valora_combine::{Aggregator, AggregatorConfig, StageWeights, WeightedAggregator};
use valora_traits::rounding::format_cents;

use super::banner;

/// Parse a `NAME=VALUE` method result.
pub(crate) fn parse_result(s: &str) -> Result<(String, f64), String> {
    let (name, value) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing method name in '{s}'"));
    }
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid value in '{s}': {e}"))?;
    Ok((name.to_string(), value))
}

/// Blend method results with the weights for `stage`.
pub(crate) fn run_aggregate(stage: &str, results: &[(String, f64)], currency: String) -> Result<()> {
    let weights = StageWeights::lookup(stage)?;
    let aggregator = WeightedAggregator::new(AggregatorConfig { currency });

    banner("Weighted Valuation");
    println!("Stage:   {stage}");
    println!("Weights: {weights}");
    println!();

    let result = aggregator.aggregate(results, &weights);
    for line in result.breakdown() {
        println!("  {line}");
    }
    println!();
    println!(
        "Final weighted valuation: {} {}",
        aggregator.currency(),
        format_cents(result.final_valuation)
    );
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_result() {
        assert_eq!(
            parse_result("DCF w/ LTG=1200.5").unwrap(),
            ("DCF w/ LTG".to_string(), 1200.5)
        );
        assert_eq!(parse_result(" vc = 10 ").unwrap(), ("vc".to_string(), 10.0));
        assert!(parse_result("Scorecard").is_err());
        assert!(parse_result("=5").is_err());
        assert!(parse_result("Scorecard=lots").is_err());
    }
}
