//! Catalog of the valuation methods that take part in the stage blend.

use serde::{Deserialize, Serialize};
use valora_traits::ValuationMethod;

/// Broad family a valuation method belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MethodCategory {
    /// Scores the company against comparables on qualitative criteria.
    Qualitative,
    /// Works back from an investor's required return at exit.
    VentureCapital,
    /// Discounts projected cash flows.
    Intrinsic,
}

impl MethodCategory {
    /// Get a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &str {
        match self {
            Self::Qualitative => "Qualitative scoring against comparable pre-revenue companies",
            Self::VentureCapital => "Exit value discounted at the investor's target return",
            Self::Intrinsic => "Discounted projected free cash flows",
        }
    }
}

/// Metadata about a valuation method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodInfo {
    /// The method.
    pub method: ValuationMethod,

    /// Category classification.
    pub category: MethodCategory,

    /// Human-readable description.
    pub description: &'static str,

    /// Whether the method needs a multi-year cash-flow projection.
    pub requires_projection: bool,
}

/// Get information about all blendable methods, in canonical order.
#[must_use]
pub fn available_methods() -> Vec<MethodInfo> {
    vec![
        MethodInfo {
            method: ValuationMethod::Scorecard,
            category: MethodCategory::Qualitative,
            description: "Average regional pre-money valuation scaled by six weighted criteria",
            requires_projection: false,
        },
        MethodInfo {
            method: ValuationMethod::Checklist,
            category: MethodCategory::Qualitative,
            description: "Maximum valuation apportioned across five scored criteria",
            requires_projection: false,
        },
        MethodInfo {
            method: ValuationMethod::VcMethod,
            category: MethodCategory::VentureCapital,
            description: "EBITDA exit value discounted at the stage's typical VC ROI",
            requires_projection: false,
        },
        MethodInfo {
            method: ValuationMethod::DcfLtg,
            category: MethodCategory::Intrinsic,
            description: "Survival-adjusted DCF with a perpetuity-growth terminal value",
            requires_projection: true,
        },
        MethodInfo {
            method: ValuationMethod::DcfMultiple,
            category: MethodCategory::Intrinsic,
            description: "Survival-adjusted DCF with an industry exit-multiple terminal value",
            requires_projection: true,
        },
    ]
}

/// Get all methods in a specific category.
#[must_use]
pub fn methods_by_category(category: &MethodCategory) -> Vec<MethodInfo> {
    available_methods()
        .into_iter()
        .filter(|info| &info.category == category)
        .collect()
}

/// Get information about a method by any accepted spelling of its name.
#[must_use]
pub fn get_method_info(name: &str) -> Option<MethodInfo> {
    let method = name.parse::<ValuationMethod>().ok()?;
    available_methods()
        .into_iter()
        .find(|info| info.method == method)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_every_method_in_order() {
        let methods: Vec<_> = available_methods().iter().map(|i| i.method).collect();
        assert_eq!(methods, ValuationMethod::ALL.to_vec());
    }

    #[test]
    fn test_methods_by_category() {
        assert_eq!(methods_by_category(&MethodCategory::Qualitative).len(), 2);
        assert_eq!(methods_by_category(&MethodCategory::VentureCapital).len(), 1);
        assert_eq!(methods_by_category(&MethodCategory::Intrinsic).len(), 2);
    }

    #[test]
    fn test_get_method_info_by_alias() {
        let info = get_method_info("dcf_ltg").unwrap();
        assert_eq!(info.method, ValuationMethod::DcfLtg);
        assert!(info.requires_projection);

        assert!(get_method_info("book_to_price").is_none());
    }

    #[test]
    fn test_category_descriptions() {
        for category in [
            MethodCategory::Qualitative,
            MethodCategory::VentureCapital,
            MethodCategory::Intrinsic,
        ] {
            assert!(!category.description().is_empty());
        }
    }
}
