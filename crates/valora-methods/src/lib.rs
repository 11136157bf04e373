//! Stage valuation methods for early-stage companies.
//!
//! This crate provides the valuation methods that do not need a multi-year
//! projection:
//! - Scorecard: comparable pre-money valuation scaled by weighted criteria
//! - Checklist: maximum valuation apportioned across scored criteria
//! - VC Method: exit value discounted at the investor's target return
//!
//! Each method implements [`Valuator`](valora_traits::Valuator) and echoes its
//! inputs and intermediate values in the result details.
//!
//! # Example
//!
//! ```
//! use valora_methods::{VcMethodValuation, typical_roi};
//! use valora_traits::{Stage, Valuator};
//!
//! let vc = VcMethodValuation {
//!     final_year_ebitda: 250_000.0,
//!     exit_multiple: 8.0,
//!     expected_roi: typical_roi(Stage::Expansion).unwrap(),
//!     years_to_exit: 5,
//!     capital_raised: 0.0,
//! };
//! let result = vc.valuate().unwrap();
//! assert!(result.valuation > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod checklist;
pub mod registry;
pub mod roi;
pub mod scorecard;
pub mod vc;

// Re-export key types
pub use checklist::{ChecklistBreakdown, ChecklistScores, ChecklistValuation, ChecklistWeights};
pub use registry::{MethodCategory, MethodInfo, methods_by_category};
pub use roi::typical_roi;
pub use scorecard::{ScorecardScores, ScorecardValuation, ScorecardWeights};
pub use vc::VcMethodValuation;
