//! Valuation method tools.
//!
//! Each tool decodes its arguments straight into the method's input type and
//! returns the serialized [`MethodResult`](valora_traits::MethodResult).

use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use valora_dcf::{DcfLtgValuation, DcfMultipleValuation};
use valora_methods::{ChecklistValuation, ScorecardValuation, VcMethodValuation};
use valora_traits::{Result, Valuator};

use crate::traits::{Tool, decode_args, number, number_array, object};

fn run<T: DeserializeOwned + Valuator>(tool: &str, args: Value) -> Result<Value> {
    let valuator: T = decode_args(tool, args)?;
    Ok(serde_json::to_value(valuator.valuate()?)?)
}

/// Scorecard method.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScorecardTool;

impl Tool for ScorecardTool {
    fn name(&self) -> &str {
        "calculate_scorecard_valuation"
    }

    fn description(&self) -> &str {
        "Calculates valuation using the Scorecard method. Requires an average pre-money \
         valuation for the stage and scores for criteria (0.5-1.5 range, 1.0 is average)."
    }

    fn parameters_schema(&self) -> Value {
        object(
            json!({
                "average_pre_money_valuation": number("Typical pre-money valuation for companies at this stage."),
                "strength_of_team_score": number("Score multiplier for team strength (e.g., 0.7 for weak, 1.0 for average, 1.3 for strong)."),
                "size_of_opportunity_score": number("Score multiplier for market opportunity size."),
                "product_service_ip_score": number("Score multiplier for product, service, and IP protection."),
                "competitive_environment_score": number("Score multiplier for competitive landscape."),
                "strategic_relationships_score": number("Score multiplier for strategic relationships."),
                "funding_requirement_score": number("Score multiplier related to funding needs and use of funds."),
            }),
            &[
                "average_pre_money_valuation",
                "strength_of_team_score",
                "size_of_opportunity_score",
                "product_service_ip_score",
                "competitive_environment_score",
                "strategic_relationships_score",
                "funding_requirement_score",
            ],
        )
    }

    fn execute(&self, args: Value) -> Result<Value> {
        run::<ScorecardValuation>(self.name(), args)
    }
}

/// Checklist method.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChecklistTool;

impl Tool for ChecklistTool {
    fn name(&self) -> &str {
        "calculate_checklist_valuation"
    }

    fn description(&self) -> &str {
        "Calculates valuation using the Checklist method. Requires a maximum valuation \
         assumption and scores (0-100) for criteria."
    }

    fn parameters_schema(&self) -> Value {
        object(
            json!({
                "max_valuation_assumption": number("The maximum valuation assumed for a perfect score in all categories for this stage."),
                "idea_quality_score": number("Score (0-100) for idea quality."),
                "product_ip_score": number("Score (0-100) for product/IP strength."),
                "core_team_score": number("Score (0-100) for core team strength."),
                "operating_stage_score": number("Score (0-100) for current operating stage/traction."),
                "strategic_relations_score": number("Score (0-100) for strategic relationships."),
            }),
            &[
                "max_valuation_assumption",
                "idea_quality_score",
                "product_ip_score",
                "core_team_score",
                "operating_stage_score",
                "strategic_relations_score",
            ],
        )
    }

    fn execute(&self, args: Value) -> Result<Value> {
        run::<ChecklistValuation>(self.name(), args)
    }
}

/// DCF with a long-term growth terminal value.
#[derive(Debug, Clone, Copy, Default)]
pub struct DcfLtgTool;

impl Tool for DcfLtgTool {
    fn name(&self) -> &str {
        "calculate_dcf_ltg_valuation"
    }

    fn description(&self) -> &str {
        "Calculates valuation using DCF with Long-Term Growth. Requires FCF and survival rate \
         projections, WACC, and a long-term growth rate."
    }

    fn parameters_schema(&self) -> Value {
        object(
            json!({
                "free_cash_flows_projection": number_array("List of projected Free Cash Flows for N years (e.g., [10000, 20000, 30000])."),
                "survival_rates_projection": number_array("List of projected survival rates (0-1) for N years, matching FCF list length (e.g., [0.9, 0.85, 0.8]). Omit to assume certain survival."),
                "discount_rate": number("Weighted Average Cost of Capital (WACC) as a decimal (e.g., 0.2 for 20%)."),
                "long_term_growth_rate": number("Perpetual long-term growth rate for terminal value, as a decimal (e.g., 0.03 for 3%)."),
            }),
            &["free_cash_flows_projection", "discount_rate", "long_term_growth_rate"],
        )
    }

    fn execute(&self, args: Value) -> Result<Value> {
        run::<DcfLtgValuation>(self.name(), args)
    }
}

/// DCF with an exit-multiple terminal value.
#[derive(Debug, Clone, Copy, Default)]
pub struct DcfMultipleTool;

impl Tool for DcfMultipleTool {
    fn name(&self) -> &str {
        "calculate_dcf_multiple_valuation"
    }

    fn description(&self) -> &str {
        "Calculates valuation using DCF with Exit Multiple. Requires FCF and survival rate \
         projections, WACC, final year EBITDA, and an industry multiple."
    }

    fn parameters_schema(&self) -> Value {
        object(
            json!({
                "free_cash_flows_projection": number_array("List of projected Free Cash Flows for N years."),
                "survival_rates_projection": number_array("List of projected survival rates (0-1) for N years. Omit to assume certain survival."),
                "discount_rate": number("WACC as a decimal."),
                "final_year_ebitda": number("Projected EBITDA in the final year of detailed projection."),
                "industry_multiple": number("Applicable industry EBITDA multiple for terminal value."),
            }),
            &[
                "free_cash_flows_projection",
                "discount_rate",
                "final_year_ebitda",
                "industry_multiple",
            ],
        )
    }

    fn execute(&self, args: Value) -> Result<Value> {
        run::<DcfMultipleValuation>(self.name(), args)
    }
}

/// Venture Capital method.
#[derive(Debug, Clone, Copy, Default)]
pub struct VcMethodTool;

impl Tool for VcMethodTool {
    fn name(&self) -> &str {
        "calculate_vc_method_valuation"
    }

    fn description(&self) -> &str {
        "Calculates pre-money valuation using the Venture Capital method. First call \
         'get_typical_roi_for_stage' if ROI is not known."
    }

    fn parameters_schema(&self) -> Value {
        object(
            json!({
                "final_year_ebitda": number("Projected EBITDA in the target exit year."),
                "exit_multiple": number("Expected EBITDA multiple at exit."),
                "expected_roi": number("Required annual ROI for investors, as a decimal (e.g., 0.5 for 50%). Get this from 'get_typical_roi_for_stage' if unsure."),
                "years_to_exit": { "type": "integer", "description": "Whole number of years until expected exit (5 or 5.0; fractions are rejected)." },
                "capital_raised": number("Amount of capital raised in the current round (optional, default 0)."),
            }),
            &["final_year_ebitda", "exit_multiple", "expected_roi", "years_to_exit"],
        )
    }

    fn execute(&self, args: Value) -> Result<Value> {
        run::<VcMethodValuation>(self.name(), args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use valora_traits::ValoraError;

    #[test]
    fn test_vc_tool_scenario() {
        let out = VcMethodTool
            .execute(json!({
                "final_year_ebitda": 250000,
                "exit_multiple": 8,
                "expected_roi": 0.5,
                "years_to_exit": 5
            }))
            .unwrap();
        assert_eq!(out["method_name"], "VC Method");
        assert_eq!(out["valuation"], 263_374.49);
        assert_eq!(out["details"]["terminal_value_at_exit"], 2_000_000.0);
        assert_eq!(out["details"]["inputs"]["capital_raised"], 0.0);
    }

    #[test]
    fn test_vc_tool_whole_float_years() {
        let args = |years: Value| {
            json!({
                "final_year_ebitda": 250000,
                "exit_multiple": 8,
                "expected_roi": 0.5,
                "years_to_exit": years
            })
        };
        let out = VcMethodTool.execute(args(json!(5.0))).unwrap();
        assert_eq!(out["valuation"], 263_374.49);
        assert_eq!(out["details"]["inputs"]["years_to_exit"], 5);

        let err = VcMethodTool.execute(args(json!(5.5))).unwrap_err();
        assert_eq!(err.kind(), "invalid_arguments");
    }

    #[test]
    fn test_dcf_ltg_tool_rejects_growth_above_rate() {
        let err = DcfLtgTool
            .execute(json!({
                "free_cash_flows_projection": [1.0, 2.0],
                "survival_rates_projection": [1.0, 1.0],
                "discount_rate": 0.05,
                "long_term_growth_rate": 0.05
            }))
            .unwrap_err();
        assert_eq!(err.kind(), "invalid_parameter");
    }

    #[test]
    fn test_dcf_multiple_tool_length_mismatch() {
        let err = DcfMultipleTool
            .execute(json!({
                "free_cash_flows_projection": [1.0, 2.0, 3.0],
                "survival_rates_projection": [1.0],
                "discount_rate": 0.1,
                "final_year_ebitda": 10.0,
                "industry_multiple": 5.0
            }))
            .unwrap_err();
        assert!(matches!(err, ValoraError::LengthMismatch { .. }));
    }

    #[test]
    fn test_scorecard_tool_missing_field() {
        let err = ScorecardTool
            .execute(json!({ "average_pre_money_valuation": 1000000 }))
            .unwrap_err();
        assert!(matches!(err, ValoraError::InvalidArguments { .. }));
    }

    #[test]
    fn test_checklist_tool() {
        let out = ChecklistTool
            .execute(json!({
                "max_valuation_assumption": 1000000,
                "idea_quality_score": 50,
                "product_ip_score": 50,
                "core_team_score": 50,
                "operating_stage_score": 50,
                "strategic_relations_score": 50
            }))
            .unwrap();
        assert_eq!(out["valuation"], 500_000.0);
        assert_eq!(
            out["details"]["valuation_breakdown"]["Core Team Contribution"],
            150_000.0
        );
    }

    #[test]
    fn test_schemas_list_required_fields_as_properties() {
        let tools: [&dyn Tool; 5] = [
            &ScorecardTool,
            &ChecklistTool,
            &DcfLtgTool,
            &DcfMultipleTool,
            &VcMethodTool,
        ];
        for tool in tools {
            let schema = tool.parameters_schema();
            for key in schema["required"].as_array().unwrap() {
                let key = key.as_str().unwrap();
                assert!(
                    schema["properties"].get(key).is_some(),
                    "{} requires undeclared {key}",
                    tool.name()
                );
            }
        }
    }
}
