//! Validated DCF parameters.
//!
//! [`ValuationParameters`] is validated once, at construction. Every
//! downstream formula can then assume a positive discount rate and, for the
//! perpetuity-growth convention, a growth rate strictly below it.

use serde::{Deserialize, Serialize};
use valora_traits::{Result, ValoraError};

/// Default explicit forecast horizon in years.
pub const DEFAULT_HORIZON: usize = 5;

/// Terminal value convention, carrying its required companion parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TerminalValueMethod {
    /// Gordon growth: final FCFF grown at `growth_rate` in perpetuity.
    PerpetuityGrowth {
        /// Long-term growth rate as a decimal.
        growth_rate: f64,
    },
    /// Final-year EBITDA times an exit multiple.
    ExitMultiple {
        /// EBITDA multiple.
        multiple: f64,
    },
}

impl TerminalValueMethod {
    /// Name used in configuration files and tool arguments.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PerpetuityGrowth { .. } => "perpetuity_growth",
            Self::ExitMultiple { .. } => "exit_multiple",
        }
    }
}

/// Parameters for a full-projection DCF valuation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawValuationParameters", into = "RawValuationParameters")]
pub struct ValuationParameters {
    horizon: usize,
    discount_rate: f64,
    tax_rate: f64,
    terminal: TerminalValueMethod,
}

impl ValuationParameters {
    /// Create validated parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ValoraError::InvalidParameter`] if the horizon is zero, the
    /// discount rate is not positive, or the terminal growth rate is not
    /// strictly below the discount rate.
    pub fn new(
        horizon: usize,
        discount_rate: f64,
        tax_rate: f64,
        terminal: TerminalValueMethod,
    ) -> Result<Self> {
        if horizon == 0 {
            return Err(ValoraError::invalid_parameter(
                "Projection horizon must be at least one year.",
            ));
        }
        if !(discount_rate > 0.0) {
            return Err(ValoraError::invalid_parameter("Discount rate must be positive."));
        }
        if let TerminalValueMethod::PerpetuityGrowth { growth_rate } = terminal
            && !(growth_rate < discount_rate)
        {
            return Err(ValoraError::invalid_parameter(format!(
                "Terminal growth rate ({growth_rate}) must be less than the discount rate ({discount_rate})."
            )));
        }

        Ok(Self {
            horizon,
            discount_rate,
            tax_rate,
            terminal,
        })
    }

    /// Create parameters from loosely-typed fields, as supplied by tool
    /// arguments or configuration files.
    ///
    /// `method` accepts `perpetuity_growth` (alias `gordon_growth`) or
    /// `exit_multiple`. The companion field for the chosen method is
    /// required; the other is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ValoraError::InvalidParameter`] for an unknown method name, a
    /// missing companion field, or any check performed by [`Self::new`].
    pub fn from_parts(
        horizon: usize,
        discount_rate: f64,
        tax_rate: f64,
        method: &str,
        terminal_growth_rate: Option<f64>,
        exit_multiple: Option<f64>,
    ) -> Result<Self> {
        let terminal = match method.trim().to_ascii_lowercase().as_str() {
            "perpetuity_growth" | "gordon_growth" => TerminalValueMethod::PerpetuityGrowth {
                growth_rate: terminal_growth_rate.ok_or_else(|| {
                    ValoraError::invalid_parameter(
                        "terminal_growth_rate is required for the perpetuity_growth method.",
                    )
                })?,
            },
            "exit_multiple" => TerminalValueMethod::ExitMultiple {
                multiple: exit_multiple.ok_or_else(|| {
                    ValoraError::invalid_parameter(
                        "exit_multiple is required for the exit_multiple method.",
                    )
                })?,
            },
            other => {
                return Err(ValoraError::invalid_parameter(format!(
                    "terminal_value_method must be 'perpetuity_growth' or 'exit_multiple', got '{other}'."
                )));
            }
        };

        Self::new(horizon, discount_rate, tax_rate, terminal)
    }

    /// Explicit forecast horizon in years.
    #[must_use]
    pub const fn horizon(&self) -> usize {
        self.horizon
    }

    /// Discount rate (WACC) as a decimal.
    #[must_use]
    pub const fn discount_rate(&self) -> f64 {
        self.discount_rate
    }

    /// Corporate tax rate as a decimal.
    #[must_use]
    pub const fn tax_rate(&self) -> f64 {
        self.tax_rate
    }

    /// Terminal value convention.
    #[must_use]
    pub const fn terminal(&self) -> TerminalValueMethod {
        self.terminal
    }
}

const fn default_horizon() -> usize {
    DEFAULT_HORIZON
}

/// Unvalidated wire form of [`ValuationParameters`].
///
/// Decoding this never checks the rates; convert with
/// [`ValuationParameters::try_from`] to get an
/// [`InvalidParameter`](ValoraError::InvalidParameter) error on bad values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawValuationParameters {
    /// Projection horizon in years.
    #[serde(default = "default_horizon", alias = "projection_horizon_years")]
    pub horizon: usize,
    /// Discount rate.
    pub discount_rate: f64,
    /// Tax rate.
    pub tax_rate: f64,
    /// `perpetuity_growth` or `exit_multiple`.
    pub terminal_value_method: String,
    /// Growth rate for the perpetuity method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal_growth_rate: Option<f64>,
    /// Multiple for the exit multiple method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_multiple: Option<f64>,
}

impl TryFrom<RawValuationParameters> for ValuationParameters {
    type Error = ValoraError;

    fn try_from(raw: RawValuationParameters) -> Result<Self> {
        Self::from_parts(
            raw.horizon,
            raw.discount_rate,
            raw.tax_rate,
            &raw.terminal_value_method,
            raw.terminal_growth_rate,
            raw.exit_multiple,
        )
    }
}

impl From<ValuationParameters> for RawValuationParameters {
    fn from(params: ValuationParameters) -> Self {
        let (terminal_growth_rate, exit_multiple) = match params.terminal {
            TerminalValueMethod::PerpetuityGrowth { growth_rate } => (Some(growth_rate), None),
            TerminalValueMethod::ExitMultiple { multiple } => (None, Some(multiple)),
        };
        Self {
            horizon: params.horizon,
            discount_rate: params.discount_rate,
            tax_rate: params.tax_rate,
            terminal_value_method: params.terminal.name().to_string(),
            terminal_growth_rate,
            exit_multiple,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_perpetuity_parameters() {
        let params = ValuationParameters::new(
            5,
            0.10,
            0.25,
            TerminalValueMethod::PerpetuityGrowth { growth_rate: 0.02 },
        )
        .unwrap();
        assert_eq!(params.horizon(), 5);
        assert_eq!(params.discount_rate(), 0.10);
        assert_eq!(params.terminal().name(), "perpetuity_growth");
    }

    #[test]
    fn test_growth_at_or_above_discount_rate_rejected() {
        for g in [0.10, 0.15] {
            let err = ValuationParameters::new(
                5,
                0.10,
                0.25,
                TerminalValueMethod::PerpetuityGrowth { growth_rate: g },
            )
            .unwrap_err();
            assert!(matches!(err, ValoraError::InvalidParameter(_)));
        }
    }

    #[test]
    fn test_non_positive_discount_rate_rejected() {
        for r in [0.0, -0.05, f64::NAN] {
            let err = ValuationParameters::new(
                5,
                r,
                0.25,
                TerminalValueMethod::ExitMultiple { multiple: 8.0 },
            )
            .unwrap_err();
            assert!(matches!(err, ValoraError::InvalidParameter(_)));
        }
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let err = ValuationParameters::new(
            0,
            0.1,
            0.25,
            TerminalValueMethod::ExitMultiple { multiple: 8.0 },
        )
        .unwrap_err();
        assert!(matches!(err, ValoraError::InvalidParameter(_)));
    }

    #[test]
    fn test_from_parts_requires_companion_field() {
        let err =
            ValuationParameters::from_parts(5, 0.1, 0.25, "perpetuity_growth", None, Some(8.0))
                .unwrap_err();
        assert!(err.to_string().contains("terminal_growth_rate"));

        let err = ValuationParameters::from_parts(5, 0.1, 0.25, "exit_multiple", Some(0.02), None)
            .unwrap_err();
        assert!(err.to_string().contains("exit_multiple"));
    }

    #[test]
    fn test_from_parts_unknown_method() {
        let err = ValuationParameters::from_parts(5, 0.1, 0.25, "ebit_multiple", None, Some(8.0))
            .unwrap_err();
        assert!(matches!(err, ValoraError::InvalidParameter(_)));
    }

    #[test]
    fn test_from_parts_gordon_alias() {
        let params =
            ValuationParameters::from_parts(5, 0.1, 0.25, "Gordon_Growth", Some(0.02), None)
                .unwrap();
        assert_eq!(
            params.terminal(),
            TerminalValueMethod::PerpetuityGrowth { growth_rate: 0.02 }
        );
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{
            "discount_rate": 0.1,
            "tax_rate": 0.25,
            "terminal_value_method": "exit_multiple",
            "exit_multiple": 7.5
        }"#;
        let params: ValuationParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params.horizon(), DEFAULT_HORIZON);
        assert_eq!(
            params.terminal(),
            TerminalValueMethod::ExitMultiple { multiple: 7.5 }
        );

        let bad = r#"{
            "discount_rate": 0.1,
            "tax_rate": 0.25,
            "terminal_value_method": "perpetuity_growth",
            "terminal_growth_rate": 0.2
        }"#;
        assert!(serde_json::from_str::<ValuationParameters>(bad).is_err());
    }

    #[test]
    fn test_serialize_round_trip() {
        let params = ValuationParameters::from_parts(3, 0.12, 0.2, "perpetuity_growth", Some(0.03), None)
            .unwrap();
        let json = serde_json::to_value(params).unwrap();
        assert_eq!(json["terminal_value_method"], "perpetuity_growth");
        assert!(json.get("exit_multiple").is_none());

        let back: ValuationParameters = serde_json::from_value(json).unwrap();
        assert_eq!(back, params);
    }
}
