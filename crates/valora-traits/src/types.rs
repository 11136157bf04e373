//! Common types used throughout the Valora framework.
//!
//! This module defines the canonical vocabulary shared by every valuation
//! crate: business lifecycle stages, the five blendable valuation methods,
//! and the result record each method produces.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::rounding::round_cents;
use crate::{Result, ValoraError};

/// Lifecycle stage of the business being valued.
///
/// The stage drives which valuation methods carry weight in the final blend.
/// Parsing is case-insensitive and ignores surrounding whitespace, so
/// `"development"`, `"DEVELOPMENT"` and `" Development "` all resolve to
/// [`Stage::Development`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Stage {
    /// Concept only, no product.
    Idea,
    /// Early product, first customers.
    Startup,
    /// Product in development with some traction.
    Development,
    /// Proven product, scaling operations.
    Expansion,
    /// Rapid revenue growth.
    Growth,
    /// Stable, established business.
    Maturity,
}

impl Stage {
    /// All stages in lifecycle order.
    pub const ALL: [Self; 6] = [
        Self::Idea,
        Self::Startup,
        Self::Development,
        Self::Expansion,
        Self::Growth,
        Self::Maturity,
    ];

    /// Canonical display name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idea => "Idea",
            Self::Startup => "Startup",
            Self::Development => "Development",
            Self::Expansion => "Expansion",
            Self::Growth => "Growth",
            Self::Maturity => "Maturity",
        }
    }

    /// Canonical names of every stage, in lifecycle order.
    #[must_use]
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::as_str).collect()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = ValoraError;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|stage| stage.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ValoraError::UnknownStage {
                stage: s.to_string(),
                valid: Self::names(),
            })
    }
}

impl TryFrom<String> for Stage {
    type Error = ValoraError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Stage> for String {
    fn from(stage: Stage) -> Self {
        stage.as_str().to_string()
    }
}

/// One of the five valuation methods blended by stage weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ValuationMethod {
    /// Scorecard (Bill Payne) method.
    Scorecard,
    /// Checklist (Dave Berkus style) method.
    Checklist,
    /// Venture Capital method.
    VcMethod,
    /// Discounted cash flow with a long-term growth terminal value.
    DcfLtg,
    /// Discounted cash flow with an exit-multiple terminal value.
    DcfMultiple,
}

impl ValuationMethod {
    /// All methods in canonical reporting order.
    pub const ALL: [Self; 5] = [
        Self::Scorecard,
        Self::Checklist,
        Self::VcMethod,
        Self::DcfLtg,
        Self::DcfMultiple,
    ];

    /// Canonical display name, as used in weight tables and reports.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scorecard => "Scorecard",
            Self::Checklist => "Checklist",
            Self::VcMethod => "VC Method",
            Self::DcfLtg => "DCF w/ LTG",
            Self::DcfMultiple => "DCF w/ Multiple",
        }
    }

    /// Position in [`ValuationMethod::ALL`].
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::Scorecard => 0,
            Self::Checklist => 1,
            Self::VcMethod => 2,
            Self::DcfLtg => 3,
            Self::DcfMultiple => 4,
        }
    }
}

/// Lowercase alphanumeric form of a method name.
///
/// Punctuation, whitespace and case are cosmetic in method names supplied at
/// the boundary: `"DCF (LTG)"`, `"dcf_ltg"` and `"DCF w/ LTG"` must compare
/// equal after canonicalization.
fn canonical_key(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

impl fmt::Display for ValuationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValuationMethod {
    type Err = ValoraError;

    fn from_str(s: &str) -> Result<Self> {
        match canonical_key(s).as_str() {
            "scorecard" | "scorecardmethod" => Ok(Self::Scorecard),
            "checklist" | "checklistmethod" => Ok(Self::Checklist),
            "vc" | "vcmethod" | "venturecapital" | "venturecapitalmethod" => Ok(Self::VcMethod),
            "dcfwltg" | "dcfltg" | "dcfwithltg" | "dcflongtermgrowth" | "dcfwlongtermgrowth"
            | "dcfperpetuitygrowth" => Ok(Self::DcfLtg),
            "dcfwmultiple" | "dcfwmultiples" | "dcfmultiple" | "dcfmultiples"
            | "dcfwithmultiple" | "dcfexitmultiple" => Ok(Self::DcfMultiple),
            _ => Err(ValoraError::InvalidParameter(format!(
                "Unknown valuation method: '{s}'"
            ))),
        }
    }
}

impl TryFrom<String> for ValuationMethod {
    type Error = ValoraError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ValuationMethod> for String {
    fn from(method: ValuationMethod) -> Self {
        method.as_str().to_string()
    }
}

/// Output of a single valuation method invocation.
///
/// The `details` payload echoes the raw inputs and every intermediate value
/// (terminal value, composite score, per-criterion contributions) so that an
/// auditor can reconstruct how the valuation was derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodResult {
    /// Which method produced this result.
    #[serde(rename = "method_name")]
    pub method: ValuationMethod,

    /// Valuation in currency units, rounded to cents.
    pub valuation: f64,

    /// Inputs and intermediate values.
    pub details: serde_json::Value,
}

impl MethodResult {
    /// Build a result, rounding the valuation to cents and serializing the
    /// typed detail record.
    ///
    /// # Errors
    ///
    /// Returns an error if `details` cannot be represented as JSON.
    pub fn new<D: Serialize>(method: ValuationMethod, valuation: f64, details: &D) -> Result<Self> {
        Ok(Self {
            method,
            valuation: round_cents(valuation),
            details: serde_json::to_value(details)?,
        })
    }
}
