//! Stage lookup tools.

use serde::Deserialize;
use serde_json::{Value, json};
use valora_combine::StageWeights;
use valora_methods::typical_roi;
use valora_traits::{Result, Stage};

use crate::traits::{Tool, decode_args, object, string};

#[derive(Debug, Deserialize)]
struct StageArgs {
    business_stage: String,
}

const STAGE_HELP: &str =
    "The current stage of the business (Idea, Startup, Development, Expansion, Growth, Maturity).";

/// Method weights for a business stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetValuationWeights;

impl Tool for GetValuationWeights {
    fn name(&self) -> &str {
        "get_valuation_weights"
    }

    fn description(&self) -> &str {
        "Gets the predefined valuation method weights based on the business stage. \
         Call this first to understand method importance."
    }

    fn parameters_schema(&self) -> Value {
        object(json!({ "business_stage": string(STAGE_HELP) }), &["business_stage"])
    }

    fn execute(&self, args: Value) -> Result<Value> {
        let args: StageArgs = decode_args(self.name(), args)?;
        let weights = StageWeights::lookup(&args.business_stage)?;
        Ok(serde_json::to_value(weights)?)
    }
}

/// Typical VC target return for a business stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetTypicalRoi;

impl Tool for GetTypicalRoi {
    fn name(&self) -> &str {
        "get_typical_roi_for_stage"
    }

    fn description(&self) -> &str {
        "Retrieves the typical annual ROI (Return on Investment) or discount rate used in \
         the VC method for a given business stage."
    }

    fn parameters_schema(&self) -> Value {
        object(json!({ "business_stage": string(STAGE_HELP) }), &["business_stage"])
    }

    fn execute(&self, args: Value) -> Result<Value> {
        let args: StageArgs = decode_args(self.name(), args)?;
        let stage: Stage = args.business_stage.parse()?;
        Ok(json!({
            "business_stage": args.business_stage,
            "typical_roi": typical_roi(stage)?,
        }))
    }
}
