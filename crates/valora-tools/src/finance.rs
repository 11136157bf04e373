//! Cost-of-capital and full-projection DCF tools.

use serde::Deserialize;
use serde_json::{Value, json};
use valora_dcf::{
    DcfRequest, ProjectionInputs, RawValuationParameters, ValuationParameters,
    cost_of_equity_capm, wacc,
};
use valora_traits::Result;

use crate::traits::{Tool, decode_args, number, number_array, object, string};

#[derive(Debug, Deserialize)]
struct CapmArgs {
    risk_free_rate: f64,
    beta: f64,
    market_risk_premium: f64,
}

/// CAPM cost of equity.
#[derive(Debug, Clone, Copy, Default)]
pub struct CostOfEquityTool;

impl Tool for CostOfEquityTool {
    fn name(&self) -> &str {
        "calculate_cost_of_equity_capm"
    }

    fn description(&self) -> &str {
        "Calculates the cost of equity with the Capital Asset Pricing Model: \
         risk-free rate plus beta times the market risk premium."
    }

    fn parameters_schema(&self) -> Value {
        object(
            json!({
                "risk_free_rate": number("Risk-free rate as a decimal (e.g., 0.03)."),
                "beta": number("Equity beta relative to the market."),
                "market_risk_premium": number("Expected market return above the risk-free rate, as a decimal."),
            }),
            &["risk_free_rate", "beta", "market_risk_premium"],
        )
    }

    fn execute(&self, args: Value) -> Result<Value> {
        let args: CapmArgs = decode_args(self.name(), args)?;
        Ok(json!({
            "cost_of_equity": cost_of_equity_capm(args.risk_free_rate, args.beta, args.market_risk_premium),
        }))
    }
}

#[derive(Debug, Deserialize)]
struct WaccArgs {
    market_value_equity: f64,
    market_value_debt: f64,
    cost_of_equity: f64,
    cost_of_debt: f64,
    tax_rate: f64,
}

/// Weighted average cost of capital.
#[derive(Debug, Clone, Copy, Default)]
pub struct WaccTool;

impl Tool for WaccTool {
    fn name(&self) -> &str {
        "calculate_wacc"
    }

    fn description(&self) -> &str {
        "Calculates the Weighted Average Cost of Capital from market values of equity and \
         debt, their costs, and the corporate tax rate. Use the result as the DCF discount rate."
    }

    fn parameters_schema(&self) -> Value {
        object(
            json!({
                "market_value_equity": number("Market value of equity."),
                "market_value_debt": number("Market value of debt."),
                "cost_of_equity": number("Cost of equity as a decimal."),
                "cost_of_debt": number("Pre-tax cost of debt as a decimal."),
                "tax_rate": number("Corporate tax rate as a decimal."),
            }),
            &[
                "market_value_equity",
                "market_value_debt",
                "cost_of_equity",
                "cost_of_debt",
                "tax_rate",
            ],
        )
    }

    fn execute(&self, args: Value) -> Result<Value> {
        let args: WaccArgs = decode_args(self.name(), args)?;
        Ok(json!({
            "wacc": wacc(
                args.market_value_equity,
                args.market_value_debt,
                args.cost_of_equity,
                args.cost_of_debt,
                args.tax_rate,
            ),
        }))
    }
}

/// Full FCFF projection and DCF valuation.
#[derive(Debug, Clone, Copy, Default)]
pub struct FcffDcfTool;

/// Arguments of [`FcffDcfTool`]; parameters are validated after decoding.
#[derive(Debug, Deserialize)]
struct FcffDcfArgs {
    parameters: RawValuationParameters,
    #[serde(default)]
    initial_ppe: f64,
    inputs: ProjectionInputs,
}

impl Tool for FcffDcfTool {
    fn name(&self) -> &str {
        "calculate_fcff_dcf_valuation"
    }

    fn description(&self) -> &str {
        "Projects Free Cash Flow to the Firm from operating inputs, computes a terminal value \
         by perpetuity growth or exit multiple, and discounts both at the given rate."
    }

    fn parameters_schema(&self) -> Value {
        let series = |what: &str| number_array(&format!("{what}, one value per forecast year."));
        object(
            json!({
                "parameters": object(
                    json!({
                        "horizon": { "type": "integer", "description": "Forecast horizon in years (default 5)." },
                        "discount_rate": number("Discount rate (WACC) as a decimal; must be positive."),
                        "tax_rate": number("Corporate tax rate as a decimal."),
                        "terminal_value_method": {
                            "type": "string",
                            "enum": ["perpetuity_growth", "exit_multiple"],
                            "description": "Terminal value convention."
                        },
                        "terminal_growth_rate": number("Required for perpetuity_growth; must be below the discount rate."),
                        "exit_multiple": number("Required for exit_multiple; EBITDA multiple."),
                    }),
                    &["discount_rate", "tax_rate", "terminal_value_method"],
                ),
                "initial_ppe": number("Net and gross PP&E before the first forecast year (default 0)."),
                "inputs": object(
                    json!({
                        "revenue": series("Revenue"),
                        "cogs": series("Cost of goods sold"),
                        "opex": series("Operating expenses"),
                        "d_and_a": series("Depreciation and amortization"),
                        "capex": series("Capital expenditure"),
                        "delta_nwc": series("Change in net working capital"),
                    }),
                    &["revenue", "cogs", "opex", "d_and_a", "capex", "delta_nwc"],
                ),
                "currency": string("Optional currency label, echoed in the result."),
            }),
            &["parameters", "inputs"],
        )
    }

    fn execute(&self, args: Value) -> Result<Value> {
        let currency = args.get("currency").cloned();
        let args: FcffDcfArgs = decode_args(self.name(), args)?;
        let request = DcfRequest {
            parameters: ValuationParameters::try_from(args.parameters)?,
            initial_ppe: args.initial_ppe,
            inputs: args.inputs,
        };
        let report = request.run()?;

        let mut out = json!({
            "terminal_value": report.terminal_value,
            "pv_explicit": report.present_value.pv_explicit,
            "pv_terminal": report.present_value.pv_terminal,
            "npv": report.npv(),
            "projection": report.projection.years(),
        });
        if let Some(currency) = currency {
            out["currency"] = currency;
        }
        Ok(out)
    }
}
