#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

//! Valuation functions exposed as named, schema-described tools.
//!
//! Every deterministic calculation in the workspace is wrapped in a [`Tool`]
//! and collected in a [`ToolRegistry`]. The registry hands its schemas to the
//! language model and dispatches the model's calls by name.
//!
//! # Examples
//!
//! ```rust
//! use valora_tools::ToolRegistry;
//!
//! let registry = ToolRegistry::with_defaults();
//! let out = registry.dispatch("get_typical_roi_for_stage", r#"{"business_stage": "idea"}"#);
//! assert_eq!(out["typical_roi"], 1.3593);
//!
//! let out = registry.dispatch("no_such_tool", "{}");
//! assert_eq!(out["kind"], "unknown_tool");
//! ```

pub mod aggregate;
pub mod finance;
pub mod methods;
pub mod registry;
pub mod stage;
pub mod traits;

pub use registry::ToolRegistry;
pub use traits::{Tool, ToolSpec, decode_args, error_payload};
