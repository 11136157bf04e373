#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! ## Architecture
//!
//! A valuation runs in three layers:
//!
//! 1. **Methods** each turn their own inputs into a [`MethodResult`]
//! 2. **Weights** for the company's [`Stage`] say how much each method counts
//! 3. **Aggregation** blends the results into one final valuation
//!
//! The [`tools`] registry exposes every step as a JSON function so a chat
//! model can drive the whole flow, which [`llm`] does.

/// Version information for the valora crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Traits
// ============================================================================

/// Core types and the [`Valuator`] trait.
pub mod traits {
    pub use valora_traits::*;
}

pub use valora_traits::{MethodResult, Result, Stage, ValoraError, ValuationMethod, Valuator};

// ============================================================================
// Valuation Methods
// ============================================================================

/// Discounted cash flow valuation.
///
/// - **FcffProjector**: six operating series to a year-by-year FCFF schedule
/// - **DcfCalculator**: projection, terminal value and discounting in one call
/// - **DcfLtgValuation** / **DcfMultipleValuation**: survival-adjusted DCF on
///   a short free-cash-flow series
///
/// # Example
///
/// ```
/// use valora::dcf::DcfLtgValuation;
/// use valora::Valuator;
///
/// let dcf = DcfLtgValuation {
///     free_cash_flows: vec![100.0, 100.0],
///     survival_rates: None,
///     discount_rate: 0.10,
///     long_term_growth_rate: 0.02,
/// };
/// assert!(dcf.valuate().unwrap().valuation > 0.0);
/// ```
pub mod dcf {
    pub use valora_dcf::*;
}

/// Qualitative and venture-capital methods.
///
/// ## Available Methods
///
/// - **ScorecardValuation**: comparable pre-money valuation times a weighted
///   composite of six criterion scores
/// - **ChecklistValuation**: maximum valuation split across five criteria
/// - **VcMethodValuation**: exit value discounted at the target return
pub mod methods {
    pub use valora_methods::*;
}

// ============================================================================
// Aggregation
// ============================================================================

/// Stage weights and weighted aggregation.
pub mod combine {
    pub use valora_combine::*;
}

// ============================================================================
// Model Integration
// ============================================================================

/// JSON tool registry.
pub mod tools {
    pub use valora_tools::*;
}

/// Chat-model client, valuation session and forecast extraction.
///
/// ## Setup
///
/// Set the `VALORA_LLM_API_KEY` environment variable or add it to a `.env`
/// file.
pub mod llm {
    pub use valora_llm::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use valora::prelude::*;
/// ```
pub mod prelude {
    pub use crate::traits::*;
    pub use valora_combine::{Aggregator, StageWeights, WeightedAggregator, named_results};
    pub use valora_dcf::{DcfLtgValuation, DcfMultipleValuation};
    pub use valora_methods::{ChecklistValuation, ScorecardValuation, VcMethodValuation};
}

// ============================================================================
// Tests
// ============================================================================
