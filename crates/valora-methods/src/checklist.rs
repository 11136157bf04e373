//! Checklist (Dave Berkus style) method.

use serde::{Deserialize, Serialize};
use valora_traits::rounding::round_cents;
use valora_traits::{MethodResult, Result, ValuationMethod, Valuator};

/// Criterion weights for the checklist method.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChecklistWeights {
    /// Quality of the basic idea.
    pub idea_quality: f64,
    /// Product roll-out and IP.
    pub product_ip: f64,
    /// Quality of the core team.
    pub core_team: f64,
    /// Operating stage reached.
    pub operating_stage: f64,
    /// Strategic relationships and partnerships.
    pub strategic_relations: f64,
}

impl ChecklistWeights {
    /// The standard checklist weighting.
    pub const STANDARD: Self = Self {
        idea_quality: 0.20,
        product_ip: 0.15,
        core_team: 0.30,
        operating_stage: 0.20,
        strategic_relations: 0.15,
    };
}

impl Default for ChecklistWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Criterion scores as percentages of the ideal (0 to 100, not clamped).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChecklistScores {
    /// Idea quality score.
    pub idea_quality_score: f64,
    /// Product/IP score.
    pub product_ip_score: f64,
    /// Core team score.
    pub core_team_score: f64,
    /// Operating stage score.
    pub operating_stage_score: f64,
    /// Strategic relations score.
    pub strategic_relations_score: f64,
}

/// Value contributed by each checklist criterion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChecklistBreakdown {
    /// Idea quality contribution.
    #[serde(rename = "Idea Quality Contribution")]
    pub idea_quality: f64,
    /// Product/IP contribution.
    #[serde(rename = "Product/IP Contribution")]
    pub product_ip: f64,
    /// Core team contribution.
    #[serde(rename = "Core Team Contribution")]
    pub core_team: f64,
    /// Operating stage contribution.
    #[serde(rename = "Operating Stage Contribution")]
    pub operating_stage: f64,
    /// Strategic relations contribution.
    #[serde(rename = "Strategic Relations Contribution")]
    pub strategic_relations: f64,
}

impl ChecklistBreakdown {
    /// Sum of all contributions.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.idea_quality
            + self.product_ip
            + self.core_team
            + self.operating_stage
            + self.strategic_relations
    }

    fn rounded(&self) -> Self {
        Self {
            idea_quality: round_cents(self.idea_quality),
            product_ip: round_cents(self.product_ip),
            core_team: round_cents(self.core_team),
            operating_stage: round_cents(self.operating_stage),
            strategic_relations: round_cents(self.strategic_relations),
        }
    }
}

/// Checklist valuation: a maximum achievable valuation apportioned across
/// five criteria by weight and realised by each criterion's score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistValuation {
    /// Maximum pre-money valuation a perfect company could reach.
    pub max_valuation_assumption: f64,

    /// Criterion scores.
    #[serde(flatten)]
    pub scores: ChecklistScores,

    /// Criterion weights.
    #[serde(skip, default)]
    pub weights: ChecklistWeights,
}

impl ChecklistValuation {
    /// Create a checklist valuation with the standard weights.
    #[must_use]
    pub fn new(max_valuation_assumption: f64, scores: ChecklistScores) -> Self {
        Self {
            max_valuation_assumption,
            scores,
            weights: ChecklistWeights::default(),
        }
    }

    /// Unrounded per-criterion contributions.
    #[must_use]
    pub fn breakdown(&self) -> ChecklistBreakdown {
        let part = |weight: f64, score: f64| self.max_valuation_assumption * weight * (score / 100.0);
        ChecklistBreakdown {
            idea_quality: part(self.weights.idea_quality, self.scores.idea_quality_score),
            product_ip: part(self.weights.product_ip, self.scores.product_ip_score),
            core_team: part(self.weights.core_team, self.scores.core_team_score),
            operating_stage: part(self.weights.operating_stage, self.scores.operating_stage_score),
            strategic_relations: part(
                self.weights.strategic_relations,
                self.scores.strategic_relations_score,
            ),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChecklistDetails<'a> {
    max_valuation_assumption: f64,
    inputs_scores_percent: &'a ChecklistScores,
    valuation_breakdown: ChecklistBreakdown,
}

impl Valuator for ChecklistValuation {
    fn method(&self) -> ValuationMethod {
        ValuationMethod::Checklist
    }

    fn valuate(&self) -> Result<MethodResult> {
        let breakdown = self.breakdown();
        MethodResult::new(
            self.method(),
            breakdown.total(),
            &ChecklistDetails {
                max_valuation_assumption: self.max_valuation_assumption,
                inputs_scores_percent: &self.scores,
                valuation_breakdown: breakdown.rounded(),
            },
        )
    }
}
