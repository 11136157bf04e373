//! Terminal value conventions.

use valora_traits::{Result, ValoraError};

use crate::params::{TerminalValueMethod, ValuationParameters};
use crate::projection::ProjectionYear;

const fn gordon(final_fcff: f64, growth_rate: f64, discount_rate: f64) -> f64 {
    final_fcff * (1.0 + growth_rate) / (discount_rate - growth_rate)
}

/// Terminal value under the perpetuity growth (Gordon) convention.
///
/// `final_fcff * (1 + g) / (r - g)`
///
/// # Errors
///
/// Returns [`ValoraError::InvalidParameter`] if `growth_rate` is not strictly
/// below `discount_rate`.
pub fn perpetuity_growth_value(final_fcff: f64, growth_rate: f64, discount_rate: f64) -> Result<f64> {
    if !(growth_rate < discount_rate) {
        return Err(ValoraError::invalid_parameter(
            "Discount rate must be greater than long-term growth rate for TV calculation.",
        ));
    }
    Ok(gordon(final_fcff, growth_rate, discount_rate))
}

/// Terminal value as a multiple of final-year EBITDA.
#[must_use]
pub const fn exit_multiple_value(final_ebitda: f64, multiple: f64) -> f64 {
    final_ebitda * multiple
}

/// Terminal value for a projection's final year under validated parameters.
///
/// The growth-below-discount-rate precondition is guaranteed by
/// [`ValuationParameters`] construction.
#[must_use]
pub const fn terminal_value(final_year: &ProjectionYear, params: &ValuationParameters) -> f64 {
    match params.terminal() {
        TerminalValueMethod::PerpetuityGrowth { growth_rate } => {
            gordon(final_year.fcff, growth_rate, params.discount_rate())
        }
        TerminalValueMethod::ExitMultiple { multiple } => {
            exit_multiple_value(final_year.ebitda, multiple)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn final_year(fcff: f64, ebitda: f64) -> ProjectionYear {
        ProjectionYear {
            year: 3,
            revenue: 0.0,
            cogs: 0.0,
            gross_profit: 0.0,
            opex: 0.0,
            ebitda,
            d_and_a: 0.0,
            ebit: 0.0,
            nopat: 0.0,
            capex: 0.0,
            delta_nwc: 0.0,
            fcff,
            net_ppe: 0.0,
            gross_ppe: 0.0,
        }
    }

    #[test]
    fn test_perpetuity_growth_scenario() {
        let tv = perpetuity_growth_value(307.5, 0.02, 0.10).unwrap();
        assert_relative_eq!(tv, 3920.625, epsilon = 1e-9);
    }

    #[test]
    fn test_perpetuity_growth_increasing_in_g() {
        let mut previous = f64::NEG_INFINITY;
        for g in [-0.02, 0.0, 0.01, 0.03, 0.05, 0.08, 0.099] {
            let tv = perpetuity_growth_value(100.0, g, 0.10).unwrap();
            assert!(tv > previous, "tv at g={g} should exceed {previous}");
            previous = tv;
        }
    }

    #[test]
    fn test_perpetuity_growth_rejects_g_at_or_above_r() {
        assert!(matches!(
            perpetuity_growth_value(100.0, 0.10, 0.10),
            Err(ValoraError::InvalidParameter(_))
        ));
        assert!(perpetuity_growth_value(100.0, 0.12, 0.10).is_err());
    }

    #[test]
    fn test_exit_multiple() {
        assert_relative_eq!(exit_multiple_value(500.0, 8.0), 4000.0);
    }

    #[test]
    fn test_terminal_value_dispatch() {
        let year = final_year(307.5, 500.0);

        let growth = ValuationParameters::new(
            3,
            0.10,
            0.25,
            TerminalValueMethod::PerpetuityGrowth { growth_rate: 0.02 },
        )
        .unwrap();
        assert_relative_eq!(terminal_value(&year, &growth), 3920.625, epsilon = 1e-9);

        let multiple = ValuationParameters::new(
            3,
            0.10,
            0.25,
            TerminalValueMethod::ExitMultiple { multiple: 6.0 },
        )
        .unwrap();
        assert_relative_eq!(terminal_value(&year, &multiple), 3000.0);
    }
}
