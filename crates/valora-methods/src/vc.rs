//! Venture Capital method.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use valora_traits::rounding::round_cents;
use valora_traits::{MethodResult, Result, ValoraError, ValuationMethod, Valuator};

/// Venture Capital method valuation.
///
/// Values the company at exit as a multiple of final-year EBITDA, discounts
/// that exit value back to today at the investor's target return, and
/// subtracts the capital being raised to get the pre-money valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VcMethodValuation {
    /// EBITDA in the exit year.
    pub final_year_ebitda: f64,
    /// EBITDA multiple at exit.
    pub exit_multiple: f64,
    /// Investor's required annual return as a decimal.
    pub expected_roi: f64,
    /// Years from today until exit.
    ///
    /// Accepts any whole number, including integral floats such as `5.0`.
    #[serde(deserialize_with = "whole_years")]
    pub years_to_exit: i32,
    /// Capital raised in the current round.
    #[serde(default)]
    pub capital_raised: f64,
}

fn whole_years<'de, D>(deserializer: D) -> std::result::Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let years = f64::deserialize(deserializer)?;
    if years.fract() != 0.0 || years < f64::from(i32::MIN) || years > f64::from(i32::MAX) {
        return Err(D::Error::custom(format!(
            "years_to_exit must be a whole number of years, got {years}"
        )));
    }
    Ok(years as i32)
}

impl VcMethodValuation {
    /// Value of the company at exit.
    #[must_use]
    pub fn terminal_value_at_exit(&self) -> f64 {
        self.final_year_ebitda * self.exit_multiple
    }

    /// Post-money valuation today.
    ///
    /// # Errors
    ///
    /// Returns [`ValoraError::DegenerateMath`] if the discount factor
    /// `(1 + expected_roi)^years_to_exit` is zero.
    pub fn post_money_today(&self) -> Result<f64> {
        let factor = (1.0 + self.expected_roi).powi(self.years_to_exit);
        if factor == 0.0 {
            return Err(ValoraError::DegenerateMath(
                "Division by zero in VC method due to ROI and years to exit.".to_string(),
            ));
        }
        Ok(self.terminal_value_at_exit() / factor)
    }
}

#[derive(Debug, Serialize)]
struct VcDetails<'a> {
    terminal_value_at_exit: f64,
    post_money_valuation_today: f64,
    inputs: &'a VcMethodValuation,
}

impl Valuator for VcMethodValuation {
    fn method(&self) -> ValuationMethod {
        ValuationMethod::VcMethod
    }

    fn valuate(&self) -> Result<MethodResult> {
        let post_money = self.post_money_today()?;
        MethodResult::new(
            self.method(),
            post_money - self.capital_raised,
            &VcDetails {
                terminal_value_at_exit: round_cents(self.terminal_value_at_exit()),
                post_money_valuation_today: round_cents(post_money),
                inputs: self,
            },
        )
    }
}
