//! Typical venture capital target returns by lifecycle stage.

use valora_traits::{Result, Stage, ValoraError};

/// Typical annual ROI a VC investor targets at `stage`, as a decimal.
///
/// Mature companies are not valued with the VC method and have no entry.
///
/// # Errors
///
/// Returns [`ValoraError::MethodNotApplicable`] for [`Stage::Maturity`].
///
/// # Example
///
/// ```
/// use valora_methods::typical_roi;
/// use valora_traits::Stage;
///
/// assert_eq!(typical_roi(Stage::Idea).unwrap(), 1.3593);
/// assert!(typical_roi(Stage::Maturity).is_err());
/// ```
pub fn typical_roi(stage: Stage) -> Result<f64> {
    match stage {
        Stage::Idea => Ok(1.3593),
        Stage::Startup => Ok(1.1474),
        Stage::Development => Ok(0.8912),
        Stage::Expansion => Ok(0.4860),
        Stage::Growth => Ok(0.3620),
        Stage::Maturity => Err(ValoraError::MethodNotApplicable(format!(
            "No typical ROI defined for stage '{stage}' in VC ROI table, or VC method not applicable."
        ))),
    }
}
