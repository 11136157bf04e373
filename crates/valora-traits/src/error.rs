//! Error types for the Valora framework.
//!
//! Every failure of the valuation core is a recoverable value. Callers at the
//! tool boundary turn these into structured `{error, kind}` payloads, and the
//! aggregator records them per method so a blended valuation can proceed with
//! partial results.

use thiserror::Error;

/// The main error type for Valora operations.
#[derive(Debug, Error)]
pub enum ValoraError {
    /// Parallel input series do not have the expected length.
    #[error("Input shape error: {0}")]
    InputShape(String),

    /// A parameter is missing, out of range, or inconsistent with another.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A lifecycle stage name did not match any known stage.
    #[error("Unknown business stage: '{stage}'. Valid stages are {}", valid.join(", "))]
    UnknownStage {
        /// The stage name as supplied by the caller.
        stage: String,
        /// The canonical names of all known stages.
        valid: Vec<&'static str>,
    },

    /// A formula hit a zero-valued denominator.
    #[error("Degenerate math: {0}")]
    DegenerateMath(String),

    /// Two series that must be aligned have different lengths.
    #[error("Length mismatch: {left_name} has {left} values but {right_name} has {right}")]
    LengthMismatch {
        /// Name of the first series.
        left_name: &'static str,
        /// Length of the first series.
        left: usize,
        /// Name of the second series.
        right_name: &'static str,
        /// Length of the second series.
        right: usize,
    },

    /// The method has no defined behavior for the requested input.
    #[error("Method not applicable: {0}")]
    MethodNotApplicable(String),

    /// A tool name was not found in the registry.
    #[error("Unknown function: {0}")]
    UnknownTool(String),

    /// Tool arguments could not be decoded into the expected shape.
    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments {
        /// The tool that rejected its arguments.
        tool: String,
        /// Why the arguments were rejected.
        reason: String,
    },

    /// Error from JSON encoding or decoding.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl ValoraError {
    /// Stable machine-readable identifier for the error variant.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InputShape(_) => "input_shape",
            Self::InvalidParameter(_) => "invalid_parameter",
            Self::UnknownStage { .. } => "unknown_stage",
            Self::DegenerateMath(_) => "degenerate_math",
            Self::LengthMismatch { .. } => "length_mismatch",
            Self::MethodNotApplicable(_) => "method_not_applicable",
            Self::UnknownTool(_) => "unknown_tool",
            Self::InvalidArguments { .. } => "invalid_arguments",
            Self::Json(_) => "json",
            Self::Polars(_) => "polars",
            Self::Other(_) => "other",
        }
    }

    /// Shorthand for [`ValoraError::InvalidParameter`].
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}

impl From<String> for ValoraError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for ValoraError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for Valora operations.
pub type Result<T> = std::result::Result<T, ValoraError>;
