//! Scorecard (Bill Payne) method.

use serde::{Deserialize, Serialize};
use valora_traits::rounding::round_to;
use valora_traits::{MethodResult, Result, ValuationMethod, Valuator};

/// Criterion weights for the scorecard composite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScorecardWeights {
    /// Strength of the management team.
    pub team: f64,
    /// Size of the opportunity.
    pub opportunity: f64,
    /// Product, service and IP protection.
    pub product_ip: f64,
    /// Competitive environment.
    pub competition: f64,
    /// Strategic relationships.
    pub strategic_relationships: f64,
    /// Need for additional funding.
    pub funding_requirement: f64,
}

impl ScorecardWeights {
    /// The standard scorecard weighting.
    pub const STANDARD: Self = Self {
        team: 0.30,
        opportunity: 0.25,
        product_ip: 0.15,
        competition: 0.10,
        strategic_relationships: 0.10,
        funding_requirement: 0.10,
    };
}

impl Default for ScorecardWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Per-criterion score multipliers, where 1.0 is the regional average.
///
/// No range is enforced. Values around 0.5 to 1.5 are typical.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScorecardScores {
    /// Team strength multiplier.
    pub strength_of_team_score: f64,
    /// Market opportunity multiplier.
    pub size_of_opportunity_score: f64,
    /// Product, service and IP multiplier.
    pub product_service_ip_score: f64,
    /// Competitive environment multiplier.
    pub competitive_environment_score: f64,
    /// Strategic relationships multiplier.
    pub strategic_relationships_score: f64,
    /// Funding requirement multiplier.
    pub funding_requirement_score: f64,
}

impl ScorecardScores {
    /// Weighted sum of the scores.
    #[must_use]
    pub fn composite(&self, weights: &ScorecardWeights) -> f64 {
        self.strength_of_team_score * weights.team
            + self.size_of_opportunity_score * weights.opportunity
            + self.product_service_ip_score * weights.product_ip
            + self.competitive_environment_score * weights.competition
            + self.strategic_relationships_score * weights.strategic_relationships
            + self.funding_requirement_score * weights.funding_requirement
    }
}

/// Scorecard valuation: the average pre-money valuation of comparable
/// companies scaled by a weighted composite of criterion scores.
///
/// # Example
///
/// ```
/// use valora_methods::{ScorecardScores, ScorecardValuation};
/// use valora_traits::Valuator;
///
/// let valuation = ScorecardValuation::new(
///     2_000_000.0,
///     ScorecardScores {
///         strength_of_team_score: 1.0,
///         size_of_opportunity_score: 1.0,
///         product_service_ip_score: 1.0,
///         competitive_environment_score: 1.0,
///         strategic_relationships_score: 1.0,
///         funding_requirement_score: 1.0,
///     },
/// );
/// assert_eq!(valuation.valuate().unwrap().valuation, 2_000_000.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorecardValuation {
    /// Typical pre-money valuation for companies at this stage and region.
    pub average_pre_money_valuation: f64,

    /// Criterion scores.
    #[serde(flatten)]
    pub scores: ScorecardScores,

    /// Criterion weights.
    #[serde(skip, default)]
    pub weights: ScorecardWeights,
}

impl ScorecardValuation {
    /// Create a scorecard valuation with the standard weights.
    #[must_use]
    pub fn new(average_pre_money_valuation: f64, scores: ScorecardScores) -> Self {
        Self {
            average_pre_money_valuation,
            scores,
            weights: ScorecardWeights::default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ScorecardDetails<'a> {
    average_pre_money_valuation: f64,
    composite_score_multiplier: f64,
    inputs_scores: &'a ScorecardScores,
}

impl Valuator for ScorecardValuation {
    fn method(&self) -> ValuationMethod {
        ValuationMethod::Scorecard
    }

    fn valuate(&self) -> Result<MethodResult> {
        let multiplier = self.scores.composite(&self.weights);
        MethodResult::new(
            self.method(),
            self.average_pre_money_valuation * multiplier,
            &ScorecardDetails {
                average_pre_money_valuation: self.average_pre_money_valuation,
                composite_score_multiplier: round_to(multiplier, 3),
                inputs_scores: &self.scores,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scores() -> ScorecardScores {
        ScorecardScores {
            strength_of_team_score: 1.25,
            size_of_opportunity_score: 1.5,
            product_service_ip_score: 1.0,
            competitive_environment_score: 0.8,
            strategic_relationships_score: 1.0,
            funding_requirement_score: 1.0,
        }
    }

    #[test]
    fn test_standard_weights_sum_to_one() {
        let w = ScorecardWeights::STANDARD;
        let total = w.team
            + w.opportunity
            + w.product_ip
            + w.competition
            + w.strategic_relationships
            + w.funding_requirement;
        assert_relative_eq!(total, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_scorecard_valuation() {
        let result = ScorecardValuation::new(1_000_000.0, scores()).valuate().unwrap();

        // 0.375 + 0.375 + 0.15 + 0.08 + 0.10 + 0.10
        assert_eq!(result.method, ValuationMethod::Scorecard);
        assert_relative_eq!(result.valuation, 1_180_000.0, epsilon = 1e-6);
        assert_eq!(result.details["composite_score_multiplier"], 1.18);
        assert_eq!(result.details["inputs_scores"]["strength_of_team_score"], 1.25);
    }

    #[test]
    fn test_all_average_scores_return_average_valuation() {
        let flat = ScorecardScores {
            strength_of_team_score: 1.0,
            size_of_opportunity_score: 1.0,
            product_service_ip_score: 1.0,
            competitive_environment_score: 1.0,
            strategic_relationships_score: 1.0,
            funding_requirement_score: 1.0,
        };
        let result = ScorecardValuation::new(750_000.0, flat).valuate().unwrap();
        assert_relative_eq!(result.valuation, 750_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_deserialize_flat_arguments() {
        let json = r#"{
            "average_pre_money_valuation": 2000000,
            "strength_of_team_score": 1.2,
            "size_of_opportunity_score": 1.1,
            "product_service_ip_score": 1.0,
            "competitive_environment_score": 0.9,
            "strategic_relationships_score": 1.0,
            "funding_requirement_score": 1.0
        }"#;
        let valuation: ScorecardValuation = serde_json::from_str(json).unwrap();
        assert_eq!(valuation.weights, ScorecardWeights::STANDARD);
        assert_eq!(valuation.scores.competitive_environment_score, 0.9);
    }
}
