//! Weighted multi-method aggregation.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use valora_traits::rounding::{format_amount, format_percent, round_cents};
use valora_traits::{MethodResult, ValuationMethod, Valuator};

use crate::weights::StageWeights;

/// One line of an aggregation breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    /// Canonical method name, or the name as supplied if it did not resolve.
    pub label: String,

    /// The resolved method, if any.
    pub method: Option<ValuationMethod>,

    /// Raw method valuation.
    pub value: f64,

    /// Blend weight applied.
    pub weight: f64,

    /// `value * weight` when the method is included in the total.
    pub weighted_value: Option<f64>,

    /// Currency label used when rendering.
    pub currency: String,
}

impl Contribution {
    /// Whether this method counts towards the final valuation.
    #[must_use]
    pub const fn included(&self) -> bool {
        self.weighted_value.is_some()
    }
}

impl fmt::Display for Contribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let currency = &self.currency;
        match self.weighted_value {
            Some(weighted) => write!(
                f,
                "{}: {currency} {} * {} = {currency} {}",
                self.label,
                format_amount(self.value),
                format_percent(self.weight),
                format_amount(weighted)
            ),
            None => write!(
                f,
                "{}: {currency} {} (Weight is {}, not included in total or N/A)",
                self.label,
                format_amount(self.value),
                format_percent(self.weight)
            ),
        }
    }
}

/// A method that was attempted but produced no valuation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodFailure {
    /// The method that failed.
    pub method: ValuationMethod,
    /// Error message.
    pub error: String,
    /// Stable error kind.
    pub kind: String,
}

/// Outcome of blending several method valuations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    /// Weighted valuation, rounded to cents.
    pub final_valuation: f64,

    /// Per-method lines in canonical method order, then unresolved names in
    /// input order.
    pub contributions: Vec<Contribution>,

    /// Methods that failed before aggregation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<MethodFailure>,
}

impl AggregationResult {
    /// Rendered breakdown lines.
    #[must_use]
    pub fn breakdown(&self) -> Vec<String> {
        self.contributions.iter().map(ToString::to_string).collect()
    }

    /// Contributions that count towards the total.
    pub fn included(&self) -> impl Iterator<Item = &Contribution> {
        self.contributions.iter().filter(|c| c.included())
    }

    /// Contributions excluded from the total (zero weight or unknown method).
    pub fn excluded(&self) -> impl Iterator<Item = &Contribution> {
        self.contributions.iter().filter(|c| !c.included())
    }
}

/// Blends named method valuations into one number.
///
/// All implementations must be thread-safe (Send + Sync) so one aggregator
/// can serve concurrent requests.
pub trait Aggregator: Send + Sync {
    /// Combine `(method name, valuation)` pairs under `weights`.
    fn aggregate(&self, results: &[(String, f64)], weights: &StageWeights) -> AggregationResult;

    /// Name of this aggregation strategy.
    fn name(&self) -> &str;

    /// Run `valuators`, aggregate the successes and record the failures.
    fn evaluate(
        &self,
        valuators: &[Box<dyn Valuator>],
        weights: &StageWeights,
    ) -> AggregationResult {
        let mut results = Vec::with_capacity(valuators.len());
        let mut failures = Vec::new();

        for valuator in valuators {
            match valuator.valuate() {
                Ok(result) => results.push(result),
                Err(err) => {
                    warn!(method = %valuator.method(), error = %err, "valuation method failed");
                    failures.push(MethodFailure {
                        method: valuator.method(),
                        error: err.to_string(),
                        kind: err.kind().to_string(),
                    });
                }
            }
        }

        let mut aggregated = self.aggregate(&named_results(&results), weights);
        aggregated.failures = failures;
        aggregated
    }
}

/// `(canonical name, valuation)` pairs for a set of method results.
#[must_use]
pub fn named_results(results: &[MethodResult]) -> Vec<(String, f64)> {
    results
        .iter()
        .map(|r| (r.method.as_str().to_string(), r.valuation))
        .collect()
}

/// Configuration for weighted aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// Currency label used in breakdown lines (default: "EUR")
    pub currency: String,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            currency: "EUR".to_string(),
        }
    }
}

/// Weighted-sum aggregator.
///
/// Each method with a positive weight adds `value * weight` to the total.
/// Methods with zero weight, and names that do not resolve to a method, are
/// listed as excluded with their raw value. If the same method appears more
/// than once, the last value wins.
///
/// # Examples
///
/// ```rust
/// use valora_combine::{Aggregator, StageWeights, WeightedAggregator};
/// use valora_traits::Stage;
///
/// let aggregator = WeightedAggregator::default();
/// let weights = StageWeights::for_stage(Stage::Growth);
/// let result = aggregator.aggregate(
///     &[
///         ("Scorecard".to_string(), 1_000_000.0),
///         ("DCF w/ LTG".to_string(), 2_000_000.0),
///     ],
///     &weights,
/// );
/// assert_eq!(result.final_valuation, 800_000.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WeightedAggregator {
    config: AggregatorConfig,
}

impl WeightedAggregator {
    /// Create a new aggregator with the given configuration.
    #[must_use]
    pub const fn new(config: AggregatorConfig) -> Self {
        Self { config }
    }

    /// Currency label used in breakdown lines.
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.config.currency
    }

    fn contribution(&self, label: String, method: Option<ValuationMethod>, value: f64, weight: f64) -> Contribution {
        Contribution {
            label,
            method,
            value,
            weight,
            weighted_value: (weight > 0.0).then(|| value * weight),
            currency: self.config.currency.clone(),
        }
    }
}

impl Aggregator for WeightedAggregator {
    fn aggregate(&self, results: &[(String, f64)], weights: &StageWeights) -> AggregationResult {
        let mut resolved: [Option<f64>; ValuationMethod::ALL.len()] = Default::default();
        let mut unresolved = Vec::new();

        for (name, value) in results {
            match name.parse::<ValuationMethod>() {
                Ok(method) => {
                    if resolved[method.index()].replace(*value).is_some() {
                        warn!(method = %method, "duplicate method valuation, keeping the last");
                    }
                }
                Err(_) => unresolved.push((name.clone(), *value)),
            }
        }

        let mut contributions: Vec<Contribution> = ValuationMethod::ALL
            .into_iter()
            .filter_map(|method| {
                resolved[method.index()].map(|value| {
                    self.contribution(method.as_str().to_string(), Some(method), value, weights.get(method))
                })
            })
            .collect();
        contributions.extend(
            unresolved
                .into_iter()
                .map(|(name, value)| self.contribution(name, None, value, 0.0)),
        );

        let total: f64 = contributions.iter().filter_map(|c| c.weighted_value).sum();
        let final_valuation = round_cents(total);

        debug!(
            final_valuation,
            included = contributions.iter().filter(|c| c.included()).count(),
            excluded = contributions.iter().filter(|c| !c.included()).count(),
            "aggregated method valuations"
        );

        AggregationResult {
            final_valuation,
            contributions,
            failures: Vec::new(),
        }
    }

    fn name(&self) -> &str {
        "weighted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use valora_traits::{Result, Stage, ValoraError};

    fn complete_results() -> Vec<(String, f64)> {
        vec![
            ("Scorecard".to_string(), 1_000_000.0),
            ("Checklist".to_string(), 1_200_000.0),
            ("VC Method".to_string(), 263_374.49),
            ("DCF w/ LTG".to_string(), 2_500_000.0),
            ("DCF w/ Multiple".to_string(), 2_100_000.0),
        ]
    }

    #[test]
    fn test_complete_set_is_weighted_sum() {
        let aggregator = WeightedAggregator::default();
        for stage in Stage::ALL {
            let weights = StageWeights::for_stage(stage);
            let result = aggregator.aggregate(&complete_results(), &weights);

            let expected: f64 = complete_results()
                .iter()
                .map(|(name, value)| value * weights.get(name.parse().unwrap()))
                .sum();
            assert_relative_eq!(result.final_valuation, expected, epsilon = 0.005 + 1e-9);
            assert_eq!(result.contributions.len(), 5);
        }
    }

    #[test]
    fn test_zero_weight_excluded() {
        let aggregator = WeightedAggregator::default();
        let weights = StageWeights::for_stage(Stage::Growth);
        let result = aggregator.aggregate(&complete_results(), &weights);

        let excluded: Vec<_> = result.excluded().map(|c| c.label.as_str()).collect();
        assert_eq!(excluded, vec!["Scorecard", "Checklist"]);
        assert_eq!(
            result.contributions[0].to_string(),
            "Scorecard: EUR 1,000,000 (Weight is 0%, not included in total or N/A)"
        );
    }

    #[test]
    fn test_breakdown_format() {
        let aggregator = WeightedAggregator::default();
        let weights = StageWeights::for_stage(Stage::Startup);
        let result = aggregator.aggregate(&[("scorecard".to_string(), 1_000.0)], &weights);

        assert_eq!(result.breakdown(), vec!["Scorecard: EUR 1,000 * 30% = EUR 300"]);
        assert_eq!(result.final_valuation, 300.0);
    }

    #[test]
    fn test_names_canonicalized_and_ordered() {
        let aggregator = WeightedAggregator::new(AggregatorConfig {
            currency: "USD".to_string(),
        });
        let weights = StageWeights::for_stage(Stage::Development);
        let results = vec![
            ("Berkus".to_string(), 500.0),
            ("DCF (LTG)".to_string(), 1_000.0),
            ("vc".to_string(), 2_000.0),
        ];
        let result = aggregator.aggregate(&results, &weights);

        let labels: Vec<_> = result.contributions.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["VC Method", "DCF w/ LTG", "Berkus"]);
        assert!(result.contributions[2].method.is_none());
        assert!(result.breakdown()[2].starts_with("Berkus: USD 500 (Weight is 0%"));
        assert_relative_eq!(result.final_valuation, 2_000.0 * 0.16 + 1_000.0 * 0.27, epsilon = 1e-9);
    }

    #[test]
    fn test_duplicate_method_keeps_last() {
        let aggregator = WeightedAggregator::default();
        let weights = StageWeights::for_stage(Stage::Maturity);
        let results = vec![
            ("DCF w/ LTG".to_string(), 100.0),
            ("dcf_ltg".to_string(), 200.0),
        ];
        let result = aggregator.aggregate(&results, &weights);
        assert_eq!(result.contributions.len(), 1);
        assert_eq!(result.final_valuation, 100.0);
    }

    #[test]
    fn test_empty_results() {
        let result = WeightedAggregator::default()
            .aggregate(&[], &StageWeights::for_stage(Stage::Idea));
        assert_eq!(result.final_valuation, 0.0);
        assert!(result.contributions.is_empty());
    }

    #[derive(Debug)]
    struct Fixed(ValuationMethod, Option<f64>);

    impl Valuator for Fixed {
        fn method(&self) -> ValuationMethod {
            self.0
        }

        fn valuate(&self) -> Result<MethodResult> {
            match self.1 {
                Some(value) => MethodResult::new(self.0, value, &()),
                None => Err(ValoraError::invalid_parameter("missing inputs")),
            }
        }
    }

    #[test]
    fn test_evaluate_records_failures() {
        let valuators: Vec<Box<dyn Valuator>> = vec![
            Box::new(Fixed(ValuationMethod::Scorecard, Some(1_000.0))),
            Box::new(Fixed(ValuationMethod::VcMethod, None)),
            Box::new(Fixed(ValuationMethod::DcfLtg, Some(2_000.0))),
        ];
        let weights = StageWeights::for_stage(Stage::Startup);
        let result = WeightedAggregator::default().evaluate(&valuators, &weights);

        assert_eq!(result.contributions.len(), 2);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].method, ValuationMethod::VcMethod);
        assert_eq!(result.failures[0].kind, "invalid_parameter");
        assert_relative_eq!(result.final_valuation, 300.0 + 240.0, epsilon = 1e-9);
    }
}
