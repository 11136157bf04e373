//! Final weighted valuation tool.

use serde::Deserialize;
use serde_json::{Map, Value, json};
use valora_combine::{Aggregator, AggregatorConfig, StageWeights, WeightedAggregator};
use valora_traits::{Result, ValoraError};

use crate::traits::{Tool, decode_args, object, string};

#[derive(Debug, Deserialize)]
struct AggregateArgs {
    individual_method_results: Map<String, Value>,
    #[serde(default)]
    weights: Option<StageWeights>,
    #[serde(default)]
    business_stage: Option<String>,
}

/// Blends individual method valuations with stage weights.
#[derive(Debug, Clone, Default)]
pub struct FinalValuationTool {
    aggregator: WeightedAggregator,
}

impl FinalValuationTool {
    /// Create the tool with the given aggregator configuration.
    #[must_use]
    pub const fn new(config: AggregatorConfig) -> Self {
        Self {
            aggregator: WeightedAggregator::new(config),
        }
    }
}

impl Tool for FinalValuationTool {
    fn name(&self) -> &str {
        "calculate_final_weighted_valuation"
    }

    fn description(&self) -> &str {
        "Calculates the final weighted average valuation using individual method valuations \
         and their corresponding weights. Call this after obtaining all individual valuations \
         and weights."
    }

    fn parameters_schema(&self) -> Value {
        object(
            json!({
                "individual_method_results": {
                    "type": "object",
                    "description": "A dictionary where keys are method names (e.g., 'Scorecard', 'VC Method') and values are their calculated valuation amounts."
                },
                "weights": {
                    "type": "object",
                    "description": "A dictionary where keys are method names and values are their respective weights."
                },
                "business_stage": string("Business stage whose predefined weights to use when 'weights' is omitted."),
            }),
            &["individual_method_results"],
        )
    }

    fn execute(&self, args: Value) -> Result<Value> {
        let args: AggregateArgs = decode_args(self.name(), args)?;

        let weights = match (args.weights, args.business_stage) {
            (Some(weights), _) => weights,
            (None, Some(stage)) => StageWeights::lookup(&stage)?,
            (None, None) => {
                return Err(ValoraError::InvalidArguments {
                    tool: self.name().to_string(),
                    reason: "either 'weights' or 'business_stage' is required".to_string(),
                });
            }
        };

        let mut results = Vec::with_capacity(args.individual_method_results.len());
        for (name, value) in args.individual_method_results {
            let value = value.as_f64().ok_or_else(|| ValoraError::InvalidArguments {
                tool: self.name().to_string(),
                reason: format!("valuation for '{name}' must be a number, got {value}"),
            })?;
            results.push((name, value));
        }

        let aggregated = self.aggregator.aggregate(&results, &weights);
        Ok(json!({
            "final_weighted_valuation": aggregated.final_valuation,
            "calculation_breakdown": aggregated.breakdown(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_valuation_with_weights() {
        let out = FinalValuationTool::default()
            .execute(json!({
                "individual_method_results": { "Scorecard": 1000, "DCF (LTG)": 2000 },
                "weights": { "Scorecard": 0.3, "DCF w/ LTG": 0.7 }
            }))
            .unwrap();

        assert_eq!(out["final_weighted_valuation"], 1700.0);
        assert_eq!(
            out["calculation_breakdown"][0],
            "Scorecard: EUR 1,000 * 30% = EUR 300"
        );
        assert_eq!(
            out["calculation_breakdown"][1],
            "DCF w/ LTG: EUR 2,000 * 70% = EUR 1,400"
        );
    }

    #[test]
    fn test_final_valuation_with_stage() {
        let out = FinalValuationTool::new(AggregatorConfig {
            currency: "USD".to_string(),
        })
        .execute(json!({
            "individual_method_results": { "Scorecard": 1000, "VC Method": 500 },
            "business_stage": "growth"
        }))
        .unwrap();

        assert_eq!(out["final_weighted_valuation"], 80.0);
        assert_eq!(
            out["calculation_breakdown"][0],
            "Scorecard: USD 1,000 (Weight is 0%, not included in total or N/A)"
        );
    }

    #[test]
    fn test_final_valuation_requires_weights_or_stage() {
        let err = FinalValuationTool::default()
            .execute(json!({ "individual_method_results": { "Scorecard": 1000 } }))
            .unwrap_err();
        assert_eq!(err.kind(), "invalid_arguments");
    }

    #[test]
    fn test_final_valuation_rejects_non_numeric_value() {
        let err = FinalValuationTool::default()
            .execute(json!({
                "individual_method_results": { "Scorecard": "a lot" },
                "business_stage": "Idea"
            }))
            .unwrap_err();
        assert!(err.to_string().contains("Scorecard"));
    }
}
