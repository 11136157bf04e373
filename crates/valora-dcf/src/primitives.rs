//! Cost-of-capital primitives.
//!
//! Closed-form helpers used to derive the discount rate fed into the DCF
//! valuators. No range validation is performed: callers are responsible for
//! supplying sane rates.

/// Cost of equity under the Capital Asset Pricing Model.
///
/// `risk_free_rate + beta * market_risk_premium`
///
/// # Examples
///
/// ```
/// use valora_dcf::cost_of_equity_capm;
///
/// let ke = cost_of_equity_capm(0.04, 1.2, 0.055);
/// assert!((ke - 0.106).abs() < 1e-12);
/// ```
#[must_use]
pub const fn cost_of_equity_capm(risk_free_rate: f64, beta: f64, market_risk_premium: f64) -> f64 {
    risk_free_rate + beta * market_risk_premium
}

/// Weighted Average Cost of Capital.
///
/// Weights the cost of equity and the after-tax cost of debt by their share
/// of total capital `V = equity + debt`. A firm with no capital (`V == 0`)
/// has a WACC of `0.0`.
#[must_use]
pub const fn wacc(
    market_value_equity: f64,
    market_value_debt: f64,
    cost_of_equity: f64,
    cost_of_debt: f64,
    tax_rate: f64,
) -> f64 {
    let total = market_value_equity + market_value_debt;
    if total == 0.0 {
        return 0.0;
    }
    (market_value_equity / total) * cost_of_equity
        + (market_value_debt / total) * cost_of_debt * (1.0 - tax_rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_capm() {
        assert_relative_eq!(cost_of_equity_capm(0.03, 1.5, 0.06), 0.12, epsilon = 1e-12);
        assert_relative_eq!(cost_of_equity_capm(0.03, 0.0, 0.06), 0.03);
    }

    #[test]
    fn test_capm_accepts_negative_beta() {
        assert_relative_eq!(cost_of_equity_capm(0.03, -0.5, 0.06), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_wacc() {
        // 60/40 split, Re = 12%, Rd = 6%, tax 25%
        let rate = wacc(600.0, 400.0, 0.12, 0.06, 0.25);
        assert_relative_eq!(rate, 0.6 * 0.12 + 0.4 * 0.06 * 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_wacc_all_equity() {
        assert_relative_eq!(wacc(1000.0, 0.0, 0.15, 0.05, 0.3), 0.15);
    }

    #[test]
    fn test_wacc_zero_capital() {
        assert_eq!(wacc(0.0, 0.0, 0.12, 0.06, 0.25), 0.0);
    }
}
