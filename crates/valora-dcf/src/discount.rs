//! Present-value discounting of explicit cash flows plus a terminal value.
//!
//! Both valuation paths share one discount factor. The survival-adjusted path
//! scales each year's cash flow, and the terminal value, by the probability
//! that the firm is still operating; omitting the survival series is the same
//! as supplying all ones.

use serde::{Deserialize, Serialize};
use valora_traits::{Result, ValoraError};

/// Present value breakdown of a DCF valuation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PresentValue {
    /// Present value of the explicit forecast cash flows.
    pub pv_explicit: f64,
    /// Present value of the terminal value.
    pub pv_terminal: f64,
    /// Sum of both components.
    pub npv: f64,
}

/// Compounding factor `(1 + rate)^periods`.
///
/// # Errors
///
/// Returns [`ValoraError::InvalidParameter`] if `periods` does not fit in an
/// `i32` exponent.
pub fn compound_factor(rate: f64, periods: usize) -> Result<f64> {
    let exponent = i32::try_from(periods).map_err(|_| {
        ValoraError::invalid_parameter(format!(
            "{periods} compounding periods exceed the supported maximum of {}.",
            i32::MAX
        ))
    })?;
    Ok((1.0 + rate).powi(exponent))
}

/// Discount an explicit FCFF series and a terminal value at a flat rate.
///
/// `pv_explicit = sum fcff[t-1] / (1+r)^t` for `t = 1..=horizon` and
/// `pv_terminal = terminal_value / (1+r)^horizon`.
///
/// # Errors
///
/// Returns [`ValoraError::InputShape`] if the series does not have exactly
/// `horizon` values.
pub fn discount_explicit_and_terminal(
    fcff: &[f64],
    discount_rate: f64,
    terminal_value: f64,
    horizon: usize,
) -> Result<PresentValue> {
    if fcff.len() != horizon {
        return Err(ValoraError::InputShape(format!(
            "fcff has {} values, expected {horizon} (projection horizon)",
            fcff.len()
        )));
    }

    let pv_explicit = fcff
        .iter()
        .enumerate()
        .map(|(i, cf)| Ok(cf / compound_factor(discount_rate, i + 1)?))
        .sum::<Result<f64>>()?;
    let pv_terminal = terminal_value / compound_factor(discount_rate, horizon)?;

    Ok(PresentValue {
        pv_explicit,
        pv_terminal,
        npv: pv_explicit + pv_terminal,
    })
}

/// Discount a cash-flow series and terminal value, weighting each year by
/// the probability of survival to that year.
///
/// `sum fcff[t-1] * s[t-1] / (1+r)^t + terminal_value * s[n-1] / (1+r)^n`
///
/// When `survival_rates` is `None` every year is weighted by one, which
/// reduces to plain time-value discounting.
///
/// # Errors
///
/// Returns [`ValoraError::InvalidParameter`] for an empty series and
/// [`ValoraError::LengthMismatch`] if the survival series length differs
/// from the cash-flow series length.
pub fn discount_with_survival(
    free_cash_flows: &[f64],
    survival_rates: Option<&[f64]>,
    discount_rate: f64,
    terminal_value: f64,
) -> Result<f64> {
    let n = free_cash_flows.len();
    if let Some(rates) = survival_rates
        && rates.len() != n
    {
        return Err(ValoraError::LengthMismatch {
            left_name: "free_cash_flows",
            left: n,
            right_name: "survival_rates",
            right: rates.len(),
        });
    }
    if n == 0 {
        return Err(ValoraError::invalid_parameter(
            "Free cash flow projection cannot be empty.",
        ));
    }

    let survival = |i: usize| survival_rates.map_or(1.0, |rates| rates[i]);

    let explicit = free_cash_flows
        .iter()
        .enumerate()
        .map(|(i, cf)| Ok(cf * survival(i) / compound_factor(discount_rate, i + 1)?))
        .sum::<Result<f64>>()?;

    Ok(explicit + terminal_value * survival(n - 1) / compound_factor(discount_rate, n)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_explicit_and_terminal_scenario() {
        let pv = discount_explicit_and_terminal(&[307.5; 3], 0.10, 3920.625, 3).unwrap();

        let expected_explicit = 307.5 / 1.1 + 307.5 / 1.21 + 307.5 / 1.331;
        let expected_terminal = 3920.625 / 1.331;
        assert_relative_eq!(pv.pv_explicit, expected_explicit, epsilon = 1e-9);
        assert_relative_eq!(pv.pv_terminal, expected_terminal, epsilon = 1e-9);
        assert_relative_eq!(pv.npv, expected_explicit + expected_terminal, epsilon = 1e-9);
    }

    #[test]
    fn test_explicit_requires_horizon_length() {
        let err = discount_explicit_and_terminal(&[1.0, 2.0], 0.1, 0.0, 3).unwrap_err();
        assert!(matches!(err, ValoraError::InputShape(_)));
    }

    #[test]
    fn test_survival_all_ones_matches_plain_discounting() {
        let fcf = [60_000.0, 90_000.0, 150_000.0];
        let tv = 1_000_000.0;

        let plain = discount_explicit_and_terminal(&fcf, 0.22, tv, fcf.len()).unwrap();
        let with_ones = discount_with_survival(&fcf, Some(&[1.0; 3]), 0.22, tv).unwrap();
        let without = discount_with_survival(&fcf, None, 0.22, tv).unwrap();

        assert_relative_eq!(with_ones, plain.npv, epsilon = 1e-9);
        assert_relative_eq!(without, plain.npv, epsilon = 1e-9);
    }

    #[test]
    fn test_survival_weighting() {
        let value =
            discount_with_survival(&[100.0, 100.0], Some(&[0.9, 0.5]), 0.0, 1000.0).unwrap();
        // Zero discount rate isolates the survival weighting.
        assert_relative_eq!(value, 90.0 + 50.0 + 500.0, epsilon = 1e-9);
    }

    #[test]
    fn test_survival_length_mismatch() {
        let err = discount_with_survival(&[1.0, 2.0, 3.0], Some(&[0.9, 0.8]), 0.1, 0.0)
            .unwrap_err();
        assert!(matches!(
            err,
            ValoraError::LengthMismatch {
                left: 3,
                right: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_survival_empty_series() {
        let err = discount_with_survival(&[], None, 0.1, 100.0).unwrap_err();
        assert!(matches!(err, ValoraError::InvalidParameter(_)));
    }

    #[test]
    fn test_compound_factor() {
        assert_relative_eq!(compound_factor(0.5, 5).unwrap(), 7.59375);
        assert_eq!(compound_factor(0.1, 0).unwrap(), 1.0);
    }

    #[test]
    fn test_compound_factor_rejects_oversized_exponent() {
        let just_over = usize::try_from(i32::MAX).unwrap() + 1;
        for periods in [just_over, usize::MAX] {
            let err = compound_factor(0.1, periods).unwrap_err();
            assert!(matches!(err, ValoraError::InvalidParameter(_)));
        }
        assert!(compound_factor(0.0, usize::try_from(i32::MAX).unwrap()).is_ok());
    }
}
