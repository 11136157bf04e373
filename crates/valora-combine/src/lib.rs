//! Stage-weighted blending of valuation methods.
//!
//! This crate holds the static stage-to-weights table and the aggregator that
//! combines individual method valuations into one number, reporting each
//! method's contribution and which methods were left out.
//!
//! # Examples
//!
//! ```rust
//! use valora_combine::{Aggregator, StageWeights, WeightedAggregator};
//!
//! let weights = StageWeights::lookup("startup").unwrap();
//! let result = WeightedAggregator::default().aggregate(
//!     &[("Scorecard".to_string(), 1_000.0)],
//!     &weights,
//! );
//! assert_eq!(result.breakdown()[0], "Scorecard: EUR 1,000 * 30% = EUR 300");
//! ```

mod aggregator;
mod weights;

// Re-export main types
pub use aggregator::{
    AggregationResult, Aggregator, AggregatorConfig, Contribution, MethodFailure,
    WeightedAggregator, named_results,
};
pub use weights::StageWeights;
