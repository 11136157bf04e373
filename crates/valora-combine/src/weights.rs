//! Stage-dependent method weights.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;
use valora_traits::{Result, Stage, ValuationMethod};

const METHODS: usize = ValuationMethod::ALL.len();

/// Weights per stage, rows in [`Stage::ALL`] order and columns in
/// [`ValuationMethod::ALL`] order.
const TABLE: [[f64; METHODS]; Stage::ALL.len()] = [
    // Scorecard, Checklist, VC Method, DCF w/ LTG, DCF w/ Multiple
    [0.38, 0.38, 0.16, 0.04, 0.04], // Idea
    [0.30, 0.30, 0.16, 0.12, 0.12], // Startup
    [0.15, 0.15, 0.16, 0.27, 0.27], // Development
    [0.06, 0.06, 0.16, 0.36, 0.36], // Expansion
    [0.00, 0.00, 0.16, 0.40, 0.40], // Growth
    [0.00, 0.00, 0.00, 0.50, 0.50], // Maturity
];

const _: () = {
    let mut stage = 0;
    while stage < TABLE.len() {
        let mut total = 0.0;
        let mut method = 0;
        while method < METHODS {
            total += TABLE[stage][method];
            method += 1;
        }
        let drift = total - 1.0;
        assert!(drift < 1e-9 && drift > -1e-9, "stage weights must sum to 1.0");
        stage += 1;
    }
};

/// Blend weight for each valuation method.
///
/// Weights from the built-in table always sum to 1.0. Weights supplied by a
/// caller are taken as given; any method they omit carries weight 0.
///
/// Serializes as an object keyed by canonical method name, in canonical
/// method order. Deserializes from an object keyed by any accepted method
/// name; when two keys name the same method the later one wins.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StageWeights {
    weights: [f64; METHODS],
}

impl StageWeights {
    /// Weights for `stage` from the built-in table.
    #[must_use]
    pub const fn for_stage(stage: Stage) -> Self {
        Self {
            weights: TABLE[stage as usize],
        }
    }

    /// Look up weights by stage name (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`ValoraError::UnknownStage`](valora_traits::ValoraError::UnknownStage)
    /// if the name is not a known stage.
    pub fn lookup(stage: &str) -> Result<Self> {
        Ok(Self::for_stage(stage.parse()?))
    }

    /// Build weights from `(method name, weight)` pairs.
    ///
    /// Method names are canonicalized; names that do not resolve to a method
    /// are skipped with a warning.
    pub fn from_named<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut weights = [0.0; METHODS];
        for (name, weight) in pairs {
            match name.parse::<ValuationMethod>() {
                Ok(method) => weights[method.index()] = weight,
                Err(_) => warn!(method = name, weight, "ignoring weight for unknown method"),
            }
        }
        Self { weights }
    }

    /// Weight for `method`.
    #[must_use]
    pub const fn get(&self, method: ValuationMethod) -> f64 {
        self.weights[method.index()]
    }

    /// `(method, weight)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (ValuationMethod, f64)> + '_ {
        ValuationMethod::ALL.into_iter().map(|m| (m, self.get(m)))
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.weights.iter().sum()
    }
}

struct StageWeightsVisitor;

impl<'de> Visitor<'de> for StageWeightsVisitor {
    type Value = StageWeights;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of valuation method names to weights")
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut pairs: Vec<(String, f64)> = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(entry) = access.next_entry::<String, f64>()? {
            pairs.push(entry);
        }
        Ok(StageWeights::from_named(
            pairs.iter().map(|(name, weight)| (name.as_str(), *weight)),
        ))
    }
}

impl<'de> Deserialize<'de> for StageWeights {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(StageWeightsVisitor)
    }
}

impl Serialize for StageWeights {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(METHODS))?;
        for (method, weight) in self.iter() {
            map.serialize_entry(method.as_str(), &weight)?;
        }
        map.end()
    }
}

impl fmt::Display for StageWeights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(method, weight)| format!("{method}: {weight:.2}"))
            .collect();
        f.write_str(&parts.join(", "))
    }
}
