//! Five-year forecast extraction.
//!
//! The model reads the disclosure and answers with forecast assumptions and
//! operating series as JSON. Only the six operating inputs are trusted; the
//! derived lines (EBITDA, NOPAT, FCFF, PP&E) are recomputed with
//! [`FcffProjector`] so the schedule is internally consistent.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use valora_dcf::{DEFAULT_HORIZON, FcffProjection, FcffProjector, ProjectionInputs};

use crate::{
    ChatModel, LlmError, Result,
    store::DisclosureDocument,
    types::{ChatMessage, ChatRequest},
};

const TOP_LEVEL_FIELDS: [&str; 3] = ["assumptions", "methodology", "projections"];

const INPUT_SERIES: [&str; 6] = [
    "revenues",
    "cost_of_goods_sold",
    "operating_expenses",
    "depreciation_amortization",
    "capex",
    "change_in_net_working_capital",
];

const DERIVED_SERIES: [&str; 7] = [
    "gross_profit",
    "ebitda",
    "ebit",
    "nopat",
    "fcff",
    "net_ppe",
    "gross_ppe",
];

/// Rates the model assumed when building its forecast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastAssumptions {
    /// Annual revenue growth.
    pub revenue_growth_rate: f64,
    /// Annual cost-of-goods growth.
    pub cog_growth_rate: f64,
    /// Annual operating-expense growth.
    pub opex_growth_rate: f64,
    /// Depreciation as a share of PP&E or revenue.
    pub depreciation_rate: f64,
    /// CapEx as a share of revenue.
    pub capex_rate: f64,
    /// Working capital as a share of revenue.
    pub working_capital_rate: f64,
    /// Corporate tax rate.
    pub tax_rate: f64,
    /// Long-term growth after the forecast horizon.
    pub terminal_growth_rate: f64,
}

impl ForecastAssumptions {
    fn rows(&self) -> [(&'static str, f64); 8] {
        [
            ("Revenue Growth", self.revenue_growth_rate),
            ("COGS Growth", self.cog_growth_rate),
            ("OpEx Growth", self.opex_growth_rate),
            ("Depreciation Rate", self.depreciation_rate),
            ("CapEx Rate", self.capex_rate),
            ("Working Capital Rate", self.working_capital_rate),
            ("Tax Rate", self.tax_rate),
            ("Terminal Growth", self.terminal_growth_rate),
        ]
    }
}

/// A forecast as returned by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Assumed rates.
    pub assumptions: ForecastAssumptions,
    /// The model's explanation of its approach.
    pub methodology: String,
    /// Operating inputs; derived lines in the response are ignored.
    pub projections: ProjectionInputs,
}

/// Build the forecast prompt for a document.
#[must_use]
pub fn build_prompt(document: &DisclosureDocument, horizon: usize) -> String {
    let series = INPUT_SERIES
        .iter()
        .chain(DERIVED_SERIES.iter())
        .map(|name| format!("    \"{name}\": [<{horizon} numbers>]"))
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        "You are a financial analyst. Using only the company information and the \
         questions and answers below, produce a {horizon}-year financial forecast.\n\n\
         COMPANY INFORMATION:\n{text}\n\n\
         QUESTIONS AND ANSWERS:\n{qa}\n\
         Respond with a single JSON object of this shape and nothing else:\n\
         {{\n  \"assumptions\": {{\n\
         \x20   \"revenue_growth_rate\": <rate>,\n\
         \x20   \"cog_growth_rate\": <rate>,\n\
         \x20   \"opex_growth_rate\": <rate>,\n\
         \x20   \"depreciation_rate\": <rate>,\n\
         \x20   \"capex_rate\": <rate>,\n\
         \x20   \"working_capital_rate\": <rate>,\n\
         \x20   \"tax_rate\": <rate>,\n\
         \x20   \"terminal_growth_rate\": <rate>\n  }},\n\
         \x20 \"methodology\": \"<short explanation of the approach>\",\n\
         \x20 \"projections\": {{\n{series}\n  }}\n}}\n\n\
         Rules: every rate is a decimal between 0 and 1, every array has exactly \
         {horizon} values, amounts are non-negative, and assumptions must be based \
         on the data provided.",
        text = document.text,
        qa = document.qa_transcript(),
    )
}

/// Remove markdown code fences around a JSON answer.
#[must_use]
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse and validate the model's forecast answer.
///
/// # Errors
///
/// Returns [`LlmError::InvalidForecast`] if the answer is not JSON, lacks a
/// required field or series, or any series does not have `horizon` values.
pub fn parse_forecast(text: &str, horizon: usize) -> Result<Forecast> {
    let cleaned = strip_code_fences(text);
    let value: Value = serde_json::from_str(&cleaned)
        .map_err(|e| LlmError::InvalidForecast(format!("response is not valid JSON: {e}")))?;

    for field in TOP_LEVEL_FIELDS {
        if value.get(field).is_none() {
            return Err(LlmError::InvalidForecast(format!(
                "missing required field: {field}"
            )));
        }
    }

    let projections = &value["projections"];
    for metric in INPUT_SERIES {
        let Some(series) = projections.get(metric) else {
            return Err(LlmError::InvalidForecast(format!(
                "missing required series in projections: {metric}"
            )));
        };
        let Some(values) = series.as_array() else {
            return Err(LlmError::InvalidForecast(format!(
                "series {metric} must be a list"
            )));
        };
        if values.len() != horizon {
            return Err(LlmError::InvalidForecast(format!(
                "series {metric} has {} values, expected {horizon}",
                values.len()
            )));
        }
    }

    let missing_derived: Vec<&str> = DERIVED_SERIES
        .into_iter()
        .filter(|metric| projections.get(metric).is_none())
        .collect();
    if !missing_derived.is_empty() {
        debug!(?missing_derived, "forecast omitted derived series; they are recomputed");
    }

    serde_json::from_value(value).map_err(|e| LlmError::InvalidForecast(e.to_string()))
}

/// A validated forecast with its recomputed projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    /// Assumed rates.
    pub assumptions: ForecastAssumptions,
    /// The model's explanation of its approach.
    pub methodology: String,
    /// FCFF schedule recomputed from the operating inputs.
    pub projection: FcffProjection,
}

impl ForecastReport {
    /// Recompute the projection for a parsed forecast.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Valuation`] if the inputs do not fit `horizon`.
    pub fn from_forecast(forecast: Forecast, horizon: usize) -> Result<Self> {
        let projection = FcffProjector::new(horizon, forecast.assumptions.tax_rate)
            .project(&forecast.projections)?;
        Ok(Self {
            assumptions: forecast.assumptions,
            methodology: forecast.methodology,
            projection,
        })
    }

    /// Projected free cash flows, ready for a DCF tool.
    #[must_use]
    pub fn free_cash_flows(&self) -> Vec<f64> {
        self.projection.fcff()
    }

    /// Render assumptions, methodology and the projection table.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::from("| Assumption | Rate |\n|---|---:|\n");
        for (label, rate) in self.assumptions.rows() {
            out.push_str(&format!("| {label} | {:.1}% |\n", rate * 100.0));
        }
        out.push_str(&format!(
            "\n**Methodology:** {}\n\n{}",
            self.methodology.trim(),
            self.projection.to_markdown()
        ));
        out
    }
}

/// Asks a model for a forecast and validates the answer.
#[derive(Debug)]
pub struct Forecaster<'a, M: ?Sized> {
    model: &'a M,
    horizon: usize,
    temperature: f32,
}

impl<'a, M: ChatModel + ?Sized> Forecaster<'a, M> {
    /// Create a forecaster for the default five-year horizon.
    #[must_use]
    pub const fn new(model: &'a M) -> Self {
        Self {
            model,
            horizon: DEFAULT_HORIZON,
            temperature: 0.1,
        }
    }

    /// Forecast horizon in years.
    #[must_use]
    pub const fn horizon(&self) -> usize {
        self.horizon
    }

    /// Produce a forecast for `document`.
    ///
    /// # Errors
    ///
    /// Propagates model errors, returns [`LlmError::EmptyResponse`] if the
    /// model answers without text, and [`LlmError::InvalidForecast`] if the
    /// answer cannot be used.
    pub async fn forecast(&self, document: &DisclosureDocument) -> Result<ForecastReport> {
        let request = ChatRequest::new(vec![ChatMessage::user(build_prompt(
            document,
            self.horizon,
        ))])
        .with_temperature(self.temperature);

        let reply = self.model.complete(request).await?;
        let text = reply.text_content().ok_or(LlmError::EmptyResponse)?;

        let forecast = parse_forecast(text, self.horizon).inspect_err(|e| {
            warn!(model = self.model.model(), error = %e, "forecast rejected");
        })?;
        ForecastReport::from_forecast(forecast, self.horizon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::QuestionAnswer;
    use crate::test_support::ScriptedModel;
    use approx::assert_relative_eq;
    use serde_json::json;

    fn forecast_json() -> Value {
        json!({
            "assumptions": {
                "revenue_growth_rate": 0.2,
                "cog_growth_rate": 0.15,
                "opex_growth_rate": 0.1,
                "depreciation_rate": 0.05,
                "capex_rate": 0.06,
                "working_capital_rate": 0.02,
                "tax_rate": 0.25,
                "terminal_growth_rate": 0.02
            },
            "methodology": "Flat operating profile.",
            "projections": {
                "revenues": [1000, 1000, 1000, 1000, 1000],
                "cost_of_goods_sold": [400, 400, 400, 400, 400],
                "operating_expenses": [100, 100, 100, 100, 100],
                "depreciation_amortization": [50, 50, 50, 50, 50],
                "capex": [60, 60, 60, 60, 60],
                "change_in_net_working_capital": [20, 20, 20, 20, 20],
                "fcff": [1, 2, 3, 4, 5]
            }
        })
    }

    fn document() -> DisclosureDocument {
        DisclosureDocument {
            text: "Acme sells widgets.".to_string(),
            qas: vec![QuestionAnswer {
                question: "Revenue?".to_string(),
                answer: "1000 per year".to_string(),
            }],
        }
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("  {}  "), "{}");
    }

    #[test]
    fn test_parse_and_recompute() {
        let text = format!("```json\n{}\n```", forecast_json());
        let forecast = parse_forecast(&text, 5).unwrap();
        let report = ForecastReport::from_forecast(forecast, 5).unwrap();

        // The model's own fcff line is ignored.
        assert_eq!(report.free_cash_flows(), vec![307.5; 5]);
        assert_relative_eq!(report.assumptions.tax_rate, 0.25);
        assert!(report.to_markdown().contains("Flat operating profile."));
    }

    #[test]
    fn test_missing_top_level_field() {
        let mut value = forecast_json();
        value.as_object_mut().unwrap().remove("methodology");
        let err = parse_forecast(&value.to_string(), 5).unwrap_err();
        assert!(err.to_string().contains("methodology"));
    }

    #[test]
    fn test_wrong_series_length() {
        let mut value = forecast_json();
        value["projections"]["capex"] = json!([60, 60, 60]);
        let err = parse_forecast(&value.to_string(), 5).unwrap_err();
        assert!(matches!(err, LlmError::InvalidForecast(ref m) if m.contains("capex")));
    }

    #[test]
    fn test_series_not_a_list() {
        let mut value = forecast_json();
        value["projections"]["revenues"] = json!("lots");
        assert!(matches!(
            parse_forecast(&value.to_string(), 5),
            Err(LlmError::InvalidForecast(_))
        ));
    }

    #[test]
    fn test_not_json() {
        assert!(matches!(
            parse_forecast("I cannot help with that.", 5),
            Err(LlmError::InvalidForecast(_))
        ));
    }

    #[test]
    fn test_prompt_contains_document_and_shape() {
        let prompt = build_prompt(&document(), 5);
        assert!(prompt.contains("Acme sells widgets."));
        assert!(prompt.contains("Q: Revenue?\nA: 1000 per year"));
        assert!(prompt.contains("\"change_in_net_working_capital\": [<5 numbers>]"));
    }

    #[tokio::test]
    async fn test_forecaster_round_trip() {
        let model = ScriptedModel::new(vec![ChatMessage::assistant(forecast_json().to_string())]);
        let report = Forecaster::new(&model).forecast(&document()).await.unwrap();
        assert_eq!(report.projection.len(), 5);

        let requests = model.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].tools.is_empty());
        assert_eq!(requests[0].temperature, Some(0.1));
    }

    #[tokio::test]
    async fn test_forecaster_empty_reply() {
        let model = ScriptedModel::new(vec![ChatMessage::assistant("   ")]);
        let err = Forecaster::new(&model).forecast(&document()).await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyResponse));
    }
}
