//! Survival-adjusted DCF valuations for early-stage companies.
//!
//! These valuators take a short free-cash-flow projection directly (rather
//! than a full [`FcffProjection`](crate::FcffProjection)) and discount it with
//! an optional per-year survival probability. The two variants differ only in
//! how the terminal value is derived.

use serde::{Deserialize, Serialize};
use valora_traits::rounding::round_cents;
use valora_traits::{MethodResult, Result, ValuationMethod, Valuator};

use crate::discount::discount_with_survival;
use crate::terminal::{exit_multiple_value, perpetuity_growth_value};

/// DCF with a long-term growth (perpetuity) terminal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcfLtgValuation {
    /// Projected free cash flows, one per year.
    #[serde(rename = "free_cash_flows_projection", alias = "free_cash_flows")]
    pub free_cash_flows: Vec<f64>,

    /// Probability of surviving to each year; all ones when omitted.
    #[serde(
        rename = "survival_rates_projection",
        alias = "survival_rates",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub survival_rates: Option<Vec<f64>>,

    /// Discount rate (WACC) as a decimal.
    pub discount_rate: f64,

    /// Perpetual growth rate applied to the final year's cash flow.
    pub long_term_growth_rate: f64,
}

#[derive(Debug, Serialize)]
struct DcfLtgDetails<'a> {
    terminal_value_ltg: f64,
    inputs: &'a DcfLtgValuation,
}

impl Valuator for DcfLtgValuation {
    fn method(&self) -> ValuationMethod {
        ValuationMethod::DcfLtg
    }

    fn valuate(&self) -> Result<MethodResult> {
        let Some(&final_fcf) = self.free_cash_flows.last() else {
            return Err(valora_traits::ValoraError::invalid_parameter(
                "Free cash flow projection cannot be empty.",
            ));
        };
        let terminal_value =
            perpetuity_growth_value(final_fcf, self.long_term_growth_rate, self.discount_rate)?;

        let value = discount_with_survival(
            &self.free_cash_flows,
            self.survival_rates.as_deref(),
            self.discount_rate,
            terminal_value,
        )?;

        MethodResult::new(
            self.method(),
            value,
            &DcfLtgDetails {
                terminal_value_ltg: round_cents(terminal_value),
                inputs: self,
            },
        )
    }
}

/// DCF with an industry exit-multiple terminal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcfMultipleValuation {
    /// Projected free cash flows, one per year.
    #[serde(rename = "free_cash_flows_projection", alias = "free_cash_flows")]
    pub free_cash_flows: Vec<f64>,

    /// Probability of surviving to each year; all ones when omitted.
    #[serde(
        rename = "survival_rates_projection",
        alias = "survival_rates",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub survival_rates: Option<Vec<f64>>,

    /// Discount rate (WACC) as a decimal.
    pub discount_rate: f64,

    /// EBITDA in the final year of the explicit projection.
    pub final_year_ebitda: f64,

    /// Industry EBITDA multiple.
    pub industry_multiple: f64,
}

#[derive(Debug, Serialize)]
struct DcfMultipleDetails<'a> {
    terminal_value_multiple: f64,
    inputs: &'a DcfMultipleValuation,
}

impl Valuator for DcfMultipleValuation {
    fn method(&self) -> ValuationMethod {
        ValuationMethod::DcfMultiple
    }

    fn valuate(&self) -> Result<MethodResult> {
        if self.free_cash_flows.is_empty() {
            return Err(valora_traits::ValoraError::invalid_parameter(
                "Free cash flow projection cannot be empty.",
            ));
        }
        let terminal_value = exit_multiple_value(self.final_year_ebitda, self.industry_multiple);

        let value = discount_with_survival(
            &self.free_cash_flows,
            self.survival_rates.as_deref(),
            self.discount_rate,
            terminal_value,
        )?;

        MethodResult::new(
            self.method(),
            value,
            &DcfMultipleDetails {
                terminal_value_multiple: round_cents(terminal_value),
                inputs: self,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use valora_traits::ValoraError;

    fn ltg() -> DcfLtgValuation {
        DcfLtgValuation {
            free_cash_flows: vec![60_000.0, 90_000.0, 150_000.0],
            survival_rates: Some(vec![0.9, 0.8, 0.7]),
            discount_rate: 0.22,
            long_term_growth_rate: 0.03,
        }
    }

    #[test]
    fn test_ltg_valuation() {
        let result = ltg().valuate().unwrap();

        let tv = 150_000.0 * 1.03 / (0.22 - 0.03);
        let expected = 60_000.0 * 0.9 / 1.22
            + 90_000.0 * 0.8 / 1.22f64.powi(2)
            + 150_000.0 * 0.7 / 1.22f64.powi(3)
            + tv * 0.7 / 1.22f64.powi(3);

        assert_eq!(result.method, ValuationMethod::DcfLtg);
        assert_relative_eq!(result.valuation, round_cents(expected), epsilon = 1e-6);
        assert_relative_eq!(
            result.details["terminal_value_ltg"].as_f64().unwrap(),
            round_cents(tv),
            epsilon = 1e-6
        );
        assert_eq!(result.details["inputs"]["discount_rate"], 0.22);
    }

    #[test]
    fn test_ltg_rejects_growth_at_discount_rate() {
        let mut valuation = ltg();
        valuation.long_term_growth_rate = 0.22;
        assert!(matches!(
            valuation.valuate(),
            Err(ValoraError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_ltg_rejects_empty_series() {
        let mut valuation = ltg();
        valuation.free_cash_flows.clear();
        valuation.survival_rates = None;
        assert!(matches!(
            valuation.valuate(),
            Err(ValoraError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_ltg_length_mismatch() {
        let mut valuation = ltg();
        valuation.survival_rates = Some(vec![0.9, 0.8]);
        assert!(matches!(
            valuation.valuate(),
            Err(ValoraError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_multiple_valuation_without_survival() {
        let valuation = DcfMultipleValuation {
            free_cash_flows: vec![100.0, 100.0],
            survival_rates: None,
            discount_rate: 0.10,
            final_year_ebitda: 180.0,
            industry_multiple: 7.0,
        };
        let result = valuation.valuate().unwrap();

        let expected = 100.0 / 1.1 + 100.0 / 1.21 + 1260.0 / 1.21;
        assert_relative_eq!(result.valuation, round_cents(expected), epsilon = 1e-6);
        assert_eq!(result.details["terminal_value_multiple"], 1260.0);
    }

    #[test]
    fn test_deserialize_tool_argument_names() {
        let json = r#"{
            "free_cash_flows_projection": [10.0, 20.0],
            "survival_rates_projection": [1.0, 0.5],
            "discount_rate": 0.2,
            "final_year_ebitda": 30.0,
            "industry_multiple": 5.0
        }"#;
        let valuation: DcfMultipleValuation = serde_json::from_str(json).unwrap();
        assert_eq!(valuation.survival_rates, Some(vec![1.0, 0.5]));

        let json = r#"{
            "free_cash_flows_projection": [10.0],
            "discount_rate": 0.2,
            "long_term_growth_rate": 0.02
        }"#;
        let valuation: DcfLtgValuation = serde_json::from_str(json).unwrap();
        assert!(valuation.survival_rates.is_none());
    }
}
