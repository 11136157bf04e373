#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/valora-rs/valora/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and trait definitions for the Valora valuation framework.
//!
//! This crate provides the shared vocabulary of the valuation engine:
//! the error type, lifecycle stages, valuation methods, method results,
//! and the [`Valuator`] abstraction every stage method implements.

/// The version of the valora-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod rounding;
pub mod types;
pub mod valuator;

// Re-exports
pub use error::{Result, ValoraError};
pub use types::{MethodResult, Stage, ValuationMethod};
pub use valuator::Valuator;
