#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

//! Discounted cash flow valuation.
//!
//! The crate is layered from leaf formulas upward:
//!
//! - [`primitives`]: CAPM cost of equity and WACC.
//! - [`projection`]: year-by-year FCFF schedule from operating inputs.
//! - [`terminal`]: perpetuity-growth and exit-multiple terminal values.
//! - [`discount`]: present value, optionally weighted by survival probability.
//! - [`startup`]: the two DCF [`Valuator`](valora_traits::Valuator)s used in
//!   the stage-weighted blend.
//! - [`calculator`]: the full projection-to-NPV flow.
//!
//! # Examples
//!
//! ```rust
//! use valora_dcf::{DcfCalculator, ProjectionInputs, TerminalValueMethod, ValuationParameters};
//!
//! let params = ValuationParameters::new(
//!     3,
//!     0.10,
//!     0.25,
//!     TerminalValueMethod::PerpetuityGrowth { growth_rate: 0.02 },
//! )
//! .unwrap();
//!
//! let inputs = ProjectionInputs {
//!     revenue: vec![1000.0; 3],
//!     cogs: vec![400.0; 3],
//!     opex: vec![100.0; 3],
//!     d_and_a: vec![50.0; 3],
//!     capex: vec![60.0; 3],
//!     delta_nwc: vec![20.0; 3],
//! };
//!
//! let report = DcfCalculator::new(params).calculate(&inputs).unwrap();
//! assert!((report.terminal_value - 3920.625).abs() < 1e-9);
//! ```

pub mod calculator;
pub mod discount;
pub mod params;
pub mod primitives;
pub mod projection;
pub mod startup;
pub mod terminal;

pub use calculator::{DcfCalculator, DcfReport, DcfRequest};
pub use discount::{PresentValue, discount_explicit_and_terminal, discount_with_survival};
pub use params::{
    DEFAULT_HORIZON, RawValuationParameters, TerminalValueMethod, ValuationParameters,
};
pub use primitives::{cost_of_equity_capm, wacc};
pub use projection::{FcffProjection, FcffProjector, ProjectionInputs, ProjectionYear};
pub use startup::{DcfLtgValuation, DcfMultipleValuation};
pub use terminal::{exit_multiple_value, perpetuity_growth_value, terminal_value};
