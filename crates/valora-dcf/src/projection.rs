//! Free Cash Flow to the Firm projection.
//!
//! Turns six parallel operating series into a year-by-year FCFF schedule with
//! a PP&E roll-forward. The arithmetic is mechanical: negative revenue or
//! margins are carried through without complaint.

use ndarray::Array1;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use valora_traits::rounding::format_cents;
use valora_traits::{Result, ValoraError};

/// Operating inputs for an FCFF projection.
///
/// All six series must have exactly one value per forecast year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInputs {
    /// Revenue per year.
    #[serde(alias = "revenues")]
    pub revenue: Vec<f64>,

    /// Cost of goods sold per year.
    #[serde(alias = "cost_of_goods_sold")]
    pub cogs: Vec<f64>,

    /// Operating expenses per year.
    #[serde(alias = "operating_expenses")]
    pub opex: Vec<f64>,

    /// Depreciation and amortization per year.
    #[serde(alias = "depreciation_amortization")]
    pub d_and_a: Vec<f64>,

    /// Capital expenditure per year.
    pub capex: Vec<f64>,

    /// Change in net working capital per year.
    #[serde(alias = "change_in_net_working_capital")]
    pub delta_nwc: Vec<f64>,
}

impl ProjectionInputs {
    fn series(&self) -> [(&'static str, &[f64]); 6] {
        [
            ("revenue", &self.revenue),
            ("cogs", &self.cogs),
            ("opex", &self.opex),
            ("d_and_a", &self.d_and_a),
            ("capex", &self.capex),
            ("delta_nwc", &self.delta_nwc),
        ]
    }

    /// Check that every series has exactly `horizon` values.
    ///
    /// # Errors
    ///
    /// Returns [`ValoraError::InputShape`] naming the first offending series.
    pub fn validate(&self, horizon: usize) -> Result<()> {
        for (name, values) in self.series() {
            if values.len() != horizon {
                return Err(ValoraError::InputShape(format!(
                    "{name} has {} values, expected {horizon} (projection horizon)",
                    values.len()
                )));
            }
        }
        Ok(())
    }
}

/// One forecast year of an FCFF projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionYear {
    /// Forecast year, starting at 1.
    pub year: usize,
    /// Revenue.
    pub revenue: f64,
    /// Cost of goods sold.
    pub cogs: f64,
    /// Revenue less COGS.
    pub gross_profit: f64,
    /// Operating expenses.
    pub opex: f64,
    /// Gross profit less operating expenses.
    pub ebitda: f64,
    /// Depreciation and amortization.
    pub d_and_a: f64,
    /// EBITDA less D&A.
    pub ebit: f64,
    /// EBIT after tax.
    pub nopat: f64,
    /// Capital expenditure.
    pub capex: f64,
    /// Change in net working capital.
    pub delta_nwc: f64,
    /// Free cash flow to the firm.
    pub fcff: f64,
    /// Net PP&E at year end.
    pub net_ppe: f64,
    /// Gross PP&E at year end.
    pub gross_ppe: f64,
}

/// A computed FCFF schedule, one row per forecast year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FcffProjection {
    years: Vec<ProjectionYear>,
}

impl FcffProjection {
    /// Rows in forecast order.
    #[must_use]
    pub fn years(&self) -> &[ProjectionYear] {
        &self.years
    }

    /// Number of forecast years.
    #[must_use]
    pub fn len(&self) -> usize {
        self.years.len()
    }

    /// Whether the projection has no years.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// The last forecast year, if any.
    #[must_use]
    pub fn final_year(&self) -> Option<&ProjectionYear> {
        self.years.last()
    }

    /// FCFF series in forecast order.
    #[must_use]
    pub fn fcff(&self) -> Vec<f64> {
        self.years.iter().map(|y| y.fcff).collect()
    }

    /// EBITDA series in forecast order.
    #[must_use]
    pub fn ebitda(&self) -> Vec<f64> {
        self.years.iter().map(|y| y.ebitda).collect()
    }

    fn metric_rows(&self) -> Vec<(&'static str, Vec<f64>)> {
        let col = |f: fn(&ProjectionYear) -> f64| self.years.iter().map(f).collect::<Vec<_>>();
        vec![
            ("Revenues", col(|y| y.revenue)),
            ("Cost of Goods Sold", col(|y| y.cogs)),
            ("Gross Profit", col(|y| y.gross_profit)),
            ("Operating Expenses", col(|y| y.opex)),
            ("EBITDA", col(|y| y.ebitda)),
            ("Depreciation & Amortization", col(|y| y.d_and_a)),
            ("EBIT", col(|y| y.ebit)),
            ("NOPAT", col(|y| y.nopat)),
            ("CapEx", col(|y| y.capex)),
            ("Change in Net Working Capital", col(|y| y.delta_nwc)),
            ("FCFF", col(|y| y.fcff)),
            ("Net PP&E", col(|y| y.net_ppe)),
            ("Gross PP&E", col(|y| y.gross_ppe)),
        ]
    }

    /// Render the projection as a DataFrame with one row per year.
    ///
    /// # Errors
    ///
    /// Returns an error if the DataFrame cannot be constructed.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let mut columns = vec![Column::new(
            "year".into(),
            self.years.iter().map(|y| y.year as u32).collect::<Vec<_>>(),
        )];
        for (name, values) in self.metric_rows() {
            columns.push(Column::new(name.into(), values));
        }
        Ok(DataFrame::new(columns)?)
    }

    /// Render the projection as a markdown table with metrics as rows and
    /// forecast years as columns.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut header = format!("| {:<30} |", "Metric");
        let mut separator = format!("|{}|", "-".repeat(32));
        for year in &self.years {
            header.push_str(&format!(" {:>14} |", format!("Year {}", year.year)));
            separator.push_str(&format!("{}|", "-".repeat(16)));
        }

        let mut lines = vec![header, separator];
        for (name, values) in self.metric_rows() {
            let mut row = format!("| {name:<30} |");
            for value in values {
                row.push_str(&format!(" {:>14} |", format_cents(value)));
            }
            lines.push(row);
        }
        lines.join("\n")
    }
}

/// Builds FCFF projections for a fixed horizon and tax rate.
///
/// # Example
///
/// ```
/// use valora_dcf::{FcffProjector, ProjectionInputs};
///
/// let inputs = ProjectionInputs {
///     revenue: vec![1000.0; 3],
///     cogs: vec![400.0; 3],
///     opex: vec![100.0; 3],
///     d_and_a: vec![50.0; 3],
///     capex: vec![60.0; 3],
///     delta_nwc: vec![20.0; 3],
/// };
///
/// let projection = FcffProjector::new(3, 0.25).project(&inputs).unwrap();
/// assert_eq!(projection.fcff(), vec![307.5; 3]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FcffProjector {
    horizon: usize,
    tax_rate: f64,
    initial_ppe: f64,
}

impl FcffProjector {
    /// Create a projector with no opening PP&E balance.
    #[must_use]
    pub const fn new(horizon: usize, tax_rate: f64) -> Self {
        Self {
            horizon,
            tax_rate,
            initial_ppe: 0.0,
        }
    }

    /// Set the net and gross PP&E balance at the end of the period before
    /// the first forecast year.
    #[must_use]
    pub const fn with_initial_ppe(mut self, initial_ppe: f64) -> Self {
        self.initial_ppe = initial_ppe;
        self
    }

    /// Projection horizon in years.
    #[must_use]
    pub const fn horizon(&self) -> usize {
        self.horizon
    }

    /// Compute the FCFF schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ValoraError::InputShape`] if any input series does not have
    /// exactly `horizon` values, or [`ValoraError::InvalidParameter`] for a
    /// zero horizon.
    pub fn project(&self, inputs: &ProjectionInputs) -> Result<FcffProjection> {
        if self.horizon == 0 {
            return Err(ValoraError::invalid_parameter(
                "Projection horizon must be at least one year",
            ));
        }
        inputs.validate(self.horizon)?;

        let revenue = Array1::from_vec(inputs.revenue.clone());
        let cogs = Array1::from_vec(inputs.cogs.clone());
        let opex = Array1::from_vec(inputs.opex.clone());
        let d_and_a = Array1::from_vec(inputs.d_and_a.clone());
        let capex = Array1::from_vec(inputs.capex.clone());
        let delta_nwc = Array1::from_vec(inputs.delta_nwc.clone());

        let gross_profit = &revenue - &cogs;
        let ebitda = &gross_profit - &opex;
        let ebit = &ebitda - &d_and_a;
        let nopat = &ebit * (1.0 - self.tax_rate);
        let fcff = &nopat + &d_and_a - &capex - &delta_nwc;

        let mut net_ppe_prev = self.initial_ppe;
        let mut gross_ppe_prev = self.initial_ppe;
        let mut years = Vec::with_capacity(self.horizon);

        for i in 0..self.horizon {
            let net_ppe = net_ppe_prev + capex[i] - d_and_a[i];
            let gross_ppe = gross_ppe_prev + capex[i];

            years.push(ProjectionYear {
                year: i + 1,
                revenue: revenue[i],
                cogs: cogs[i],
                gross_profit: gross_profit[i],
                opex: opex[i],
                ebitda: ebitda[i],
                d_and_a: d_and_a[i],
                ebit: ebit[i],
                nopat: nopat[i],
                capex: capex[i],
                delta_nwc: delta_nwc[i],
                fcff: fcff[i],
                net_ppe,
                gross_ppe,
            });

            net_ppe_prev = net_ppe;
            gross_ppe_prev = gross_ppe;
        }

        Ok(FcffProjection { years })
    }
}
