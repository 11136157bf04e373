//! Full-projection DCF: project FCFF, value the terminal year, discount.

use serde::{Deserialize, Serialize};
use tracing::debug;
use valora_traits::rounding::format_cents;
use valora_traits::{Result, ValoraError};

use crate::discount::{PresentValue, discount_explicit_and_terminal};
use crate::params::ValuationParameters;
use crate::projection::{FcffProjection, FcffProjector, ProjectionInputs};
use crate::terminal::terminal_value;

/// Output of a full-projection DCF valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcfReport {
    /// The computed FCFF schedule.
    pub projection: FcffProjection,
    /// Terminal value at the end of the horizon, undiscounted.
    pub terminal_value: f64,
    /// Present value breakdown.
    pub present_value: PresentValue,
}

impl DcfReport {
    /// Enterprise value implied by the projection.
    #[must_use]
    pub const fn npv(&self) -> f64 {
        self.present_value.npv
    }

    /// Render the projection table followed by a valuation summary.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        format!(
            "{}\n\n| Valuation | Amount |\n|---|---:|\n\
             | Terminal Value | {} |\n\
             | PV of Explicit FCFF | {} |\n\
             | PV of Terminal Value | {} |\n\
             | Net Present Value | {} |",
            self.projection.to_markdown(),
            format_cents(self.terminal_value),
            format_cents(self.present_value.pv_explicit),
            format_cents(self.present_value.pv_terminal),
            format_cents(self.present_value.npv),
        )
    }
}

/// Runs the projection and discounting steps under fixed parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DcfCalculator {
    params: ValuationParameters,
    initial_ppe: f64,
}

impl DcfCalculator {
    /// Create a calculator with no opening PP&E balance.
    #[must_use]
    pub const fn new(params: ValuationParameters) -> Self {
        Self {
            params,
            initial_ppe: 0.0,
        }
    }

    /// Set the opening PP&E balance.
    #[must_use]
    pub const fn with_initial_ppe(mut self, initial_ppe: f64) -> Self {
        self.initial_ppe = initial_ppe;
        self
    }

    /// The validated parameters.
    #[must_use]
    pub const fn params(&self) -> &ValuationParameters {
        &self.params
    }

    /// Value the business described by `inputs`.
    ///
    /// # Errors
    ///
    /// Returns [`ValoraError::InputShape`] if any input series does not match
    /// the parameter horizon.
    pub fn calculate(&self, inputs: &ProjectionInputs) -> Result<DcfReport> {
        let horizon = self.params.horizon();
        let projection = FcffProjector::new(horizon, self.params.tax_rate())
            .with_initial_ppe(self.initial_ppe)
            .project(inputs)?;

        let final_year = projection
            .final_year()
            .ok_or_else(|| ValoraError::InputShape("projection has no years".to_string()))?;
        let terminal_value = terminal_value(final_year, &self.params);

        let present_value = discount_explicit_and_terminal(
            &projection.fcff(),
            self.params.discount_rate(),
            terminal_value,
            horizon,
        )?;

        debug!(
            horizon,
            method = self.params.terminal().name(),
            terminal_value,
            npv = present_value.npv,
            "DCF valuation computed"
        );

        Ok(DcfReport {
            projection,
            terminal_value,
            present_value,
        })
    }
}

/// A self-contained DCF request, as read from an input file or tool call.
///
/// ```json
/// {
///   "parameters": {
///     "horizon": 3, "discount_rate": 0.1, "tax_rate": 0.25,
///     "terminal_value_method": "perpetuity_growth", "terminal_growth_rate": 0.02
///   },
///   "initial_ppe": 0,
///   "inputs": {
///     "revenue": [1000, 1000, 1000], "cogs": [400, 400, 400],
///     "opex": [100, 100, 100], "d_and_a": [50, 50, 50],
///     "capex": [60, 60, 60], "delta_nwc": [20, 20, 20]
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcfRequest {
    /// Validated valuation parameters.
    pub parameters: ValuationParameters,
    /// Opening PP&E balance.
    #[serde(default)]
    pub initial_ppe: f64,
    /// Operating input series.
    pub inputs: ProjectionInputs,
}

impl DcfRequest {
    /// Run the request.
    ///
    /// # Errors
    ///
    /// See [`DcfCalculator::calculate`].
    pub fn run(&self) -> Result<DcfReport> {
        DcfCalculator::new(self.parameters)
            .with_initial_ppe(self.initial_ppe)
            .calculate(&self.inputs)
    }
}
