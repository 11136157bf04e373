//! Valuator trait for stage valuation methods.
//!
//! A `Valuator` is a fully-parameterized invocation of one valuation method:
//! the inputs are captured at construction, and [`Valuator::valuate`] runs the
//! closed-form formula. Implementations are pure, so calling `valuate` twice
//! yields identical results and retrying after an external failure is safe.

use crate::{MethodResult, Result, ValuationMethod};

/// A valuation method bound to its inputs.
///
/// # Example
///
/// ```no_run
/// use valora_traits::{MethodResult, Result, ValuationMethod, Valuator};
///
/// #[derive(Debug)]
/// struct FixedValue(f64);
///
/// impl Valuator for FixedValue {
///     fn method(&self) -> ValuationMethod {
///         ValuationMethod::Scorecard
///     }
///
///     fn valuate(&self) -> Result<MethodResult> {
///         MethodResult::new(self.method(), self.0, &serde_json::json!({}))
///     }
/// }
/// ```
pub trait Valuator: Send + Sync + std::fmt::Debug {
    /// The method this valuator implements.
    fn method(&self) -> ValuationMethod;

    /// Run the method and return its valuation with a detail payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the inputs are inconsistent (mismatched series,
    /// growth rate at or above the discount rate, degenerate denominators).
    fn valuate(&self) -> Result<MethodResult>;
}
