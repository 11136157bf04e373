//! Tool-calling valuation session.
//!
//! The model is given the disclosure and Q&A, then allowed up to
//! `max_turns` rounds of tool calls against a [`ToolRegistry`]. Every tool
//! result, including errors, goes back to the model as a `tool` message. If
//! the model has not produced a text answer when the rounds run out, one
//! more request asks it to summarize with tools disabled.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};
use valora_tools::ToolRegistry;

use crate::{
    ChatModel, LlmError, Result,
    config::DEFAULT_MAX_TURNS,
    store::DisclosureDocument,
    types::{ChatMessage, ChatRequest, ToolCall, ToolChoice},
};

/// Instructions given to the model at the start of every session.
pub const SYSTEM_PROMPT: &str = "You are a startup valuation assistant. \
Produce a preliminary valuation from the information the user provides.

Work through these steps:
1. Determine the company's business stage (Idea, Development, Startup, Expansion, Growth or Maturity).
2. Call get_valuation_weights for that stage.
3. If the VC method has a non-zero weight, call get_typical_roi_for_stage and use the result as expected_roi.
4. For each method with a non-zero weight (Scorecard, Checklist, DCF with long-term growth, \
DCF with multiple, VC method), gather its inputs from the material and call its calculation tool. \
If crucial inputs are missing, either state that the method cannot be calculated or call it with \
clearly stated assumptions.
5. Call calculate_final_weighted_valuation with the individual results and the stage.
6. Report the stage, the weights, each method's valuation or why it is missing, the final \
weighted valuation and a short explanation.

If a tool returns an error, acknowledge it and explain the likely cause in the report.";

/// Appended when the turn limit is reached without an answer.
pub const SUMMARY_PROMPT: &str =
    "Please summarize the valuation based on the information gathered so far, even if incomplete.";

/// Tuning for a [`ValuationSession`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Tool-calling rounds before a summary is forced.
    pub max_turns: usize,
    /// Temperature for tool-calling rounds.
    pub temperature: f32,
    /// Temperature for the forced summary.
    pub summary_temperature: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_turns: DEFAULT_MAX_TURNS,
            temperature: 0.1,
            summary_temperature: 0.2,
        }
    }
}

/// One tool call made during a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    /// Tool name.
    pub function: String,
    /// Decoded arguments, or the raw string if they were not valid JSON.
    pub arguments: Value,
    /// The payload returned to the model.
    pub response: Value,
}

/// Result of a completed session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionOutcome {
    /// The model's final report.
    pub final_response: String,
    /// Every tool call, in order.
    pub invocations: Vec<ToolInvocation>,
    /// Tool-calling rounds used.
    pub turns: usize,
    /// Whether the answer came from the forced summary.
    pub summarized: bool,
}

/// Drives a model through a valuation using the registered tools.
#[derive(Debug)]
pub struct ValuationSession<'a, M: ?Sized> {
    model: &'a M,
    registry: &'a ToolRegistry,
    config: SessionConfig,
}

/// The opening user message for a document.
#[must_use]
pub fn opening_message(document: &DisclosureDocument) -> String {
    format!(
        "Company information:\n{}\n\nRelated questions and answers:\n{}",
        document.text,
        document.qa_transcript()
    )
}

impl<'a, M: ChatModel + ?Sized> ValuationSession<'a, M> {
    /// Create a session with default settings.
    #[must_use]
    pub fn new(model: &'a M, registry: &'a ToolRegistry) -> Self {
        Self {
            model,
            registry,
            config: SessionConfig::default(),
        }
    }

    /// Override the session settings.
    #[must_use]
    pub const fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// The settings in use.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn invoke(&self, call: &ToolCall) -> ToolInvocation {
        let name = &call.function.name;
        let raw = &call.function.arguments;
        debug!(tool = %name, id = %call.id, "dispatching tool call");

        let response = self.registry.dispatch(name, raw);
        let arguments = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.clone()));

        ToolInvocation {
            function: name.clone(),
            arguments,
            response,
        }
    }

    /// Run the session to a final answer.
    ///
    /// # Errors
    ///
    /// Propagates model errors. Tool failures are not errors; they are
    /// reported back to the model. Returns [`LlmError::EmptyResponse`] if
    /// even the forced summary has no text.
    pub async fn run(&self, document: &DisclosureDocument) -> Result<SessionOutcome> {
        let tools = self.registry.schemas();
        let mut messages = vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(opening_message(document)),
        ];
        let mut invocations = Vec::new();

        for turn in 1..=self.config.max_turns {
            let request = ChatRequest::new(messages.clone())
                .with_tools(tools.clone(), ToolChoice::Auto)
                .with_temperature(self.config.temperature);
            let reply = self.model.complete(request).await?;

            if !reply.tool_calls.is_empty() {
                info!(
                    turn,
                    model = self.model.model(),
                    calls = reply.tool_calls.len(),
                    "model requested tools"
                );
                let calls = reply.tool_calls.clone();
                messages.push(reply);
                for call in &calls {
                    let invocation = self.invoke(call);
                    messages.push(ChatMessage::tool_result(call, invocation.response.to_string()));
                    invocations.push(invocation);
                }
                continue;
            }

            if let Some(text) = reply.text_content() {
                info!(turn, tools_called = invocations.len(), "model produced final answer");
                return Ok(SessionOutcome {
                    final_response: text.to_string(),
                    invocations,
                    turns: turn,
                    summarized: false,
                });
            }

            warn!(turn, "model returned neither text nor tool calls");
        }

        warn!(
            max_turns = self.config.max_turns,
            "turn limit reached, requesting summary"
        );
        messages.push(ChatMessage::user(SUMMARY_PROMPT));
        let request = ChatRequest::new(messages)
            .with_tools(tools, ToolChoice::None)
            .with_temperature(self.config.summary_temperature);
        let reply = self.model.complete(request).await?;
        let final_response = reply
            .text_content()
            .ok_or(LlmError::EmptyResponse)?
            .to_string();

        Ok(SessionOutcome {
            final_response,
            invocations,
            turns: self.config.max_turns,
            summarized: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::QuestionAnswer;
    use crate::test_support::ScriptedModel;
    use crate::types::Role;
    use approx::assert_relative_eq;

    fn document() -> DisclosureDocument {
        DisclosureDocument {
            text: "Acme is an early-stage robotics company.".to_string(),
            qas: vec![QuestionAnswer {
                question: "What stage are you at?".to_string(),
                answer: "Idea".to_string(),
            }],
        }
    }

    fn call(id: &str, name: &str, args: &str) -> ChatMessage {
        ChatMessage::tool_calls(vec![ToolCall::function(id, name, args)])
    }

    #[tokio::test]
    async fn test_tool_call_then_answer() {
        let model = ScriptedModel::new(vec![
            call("c1", "get_valuation_weights", r#"{"business_stage": "idea"}"#),
            ChatMessage::assistant("Acme is worth about EUR 500,000."),
        ]);
        let registry = ToolRegistry::with_defaults();
        let outcome = ValuationSession::new(&model, &registry)
            .run(&document())
            .await
            .unwrap();

        assert_eq!(outcome.final_response, "Acme is worth about EUR 500,000.");
        assert_eq!(outcome.turns, 2);
        assert!(!outcome.summarized);
        assert_eq!(outcome.invocations.len(), 1);
        assert_eq!(outcome.invocations[0].function, "get_valuation_weights");
        assert_eq!(outcome.invocations[0].arguments["business_stage"], "idea");
        assert_relative_eq!(
            outcome.invocations[0].response["Scorecard"].as_f64().unwrap(),
            0.38
        );

        let requests = model.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].messages[0].role, Role::System);
        assert!(
            requests[0].messages[1]
                .content
                .as_deref()
                .unwrap()
                .contains("Q: What stage are you at?\nA: Idea")
        );
        assert_eq!(requests[0].tool_choice, Some(ToolChoice::Auto));
        assert_eq!(requests[0].tools.len(), registry.len());

        // assistant tool-call message followed by the tool result
        let second = &requests[1].messages;
        assert_eq!(second.len(), 4);
        assert_eq!(second[3].role, Role::Tool);
        assert_eq!(second[3].tool_call_id.as_deref(), Some("c1"));
    }

    #[tokio::test]
    async fn test_tool_errors_are_reported_back() {
        let model = ScriptedModel::new(vec![
            ChatMessage::tool_calls(vec![
                ToolCall::function("c1", "calculate_scorecard_valuation", "{not json"),
                ToolCall::function("c2", "no_such_tool", "{}"),
            ]),
            ChatMessage::assistant("Could not value the company."),
        ]);
        let registry = ToolRegistry::with_defaults();
        let outcome = ValuationSession::new(&model, &registry)
            .run(&document())
            .await
            .unwrap();

        assert_eq!(outcome.invocations.len(), 2);
        assert_eq!(outcome.invocations[0].arguments, Value::String("{not json".to_string()));
        assert_eq!(outcome.invocations[0].response["kind"], "invalid_arguments");
        assert_eq!(
            outcome.invocations[1].response["error"],
            "Unknown function: no_such_tool"
        );

        let last = model.requests().pop().unwrap();
        let tool_messages: Vec<_> = last
            .messages
            .iter()
            .filter(|m| m.role == Role::Tool)
            .collect();
        assert_eq!(tool_messages.len(), 2);
        assert!(tool_messages[0].content.as_deref().unwrap().contains("error"));
    }

    #[tokio::test]
    async fn test_turn_limit_forces_summary() {
        let mut script: Vec<ChatMessage> = (0..3)
            .map(|i| call(&format!("c{i}"), "get_typical_roi_for_stage", r#"{"business_stage":"Startup"}"#))
            .collect();
        script.push(ChatMessage::assistant("Partial valuation summary."));
        let model = ScriptedModel::new(script);
        let registry = ToolRegistry::with_defaults();

        let config = SessionConfig {
            max_turns: 3,
            ..SessionConfig::default()
        };
        let outcome = ValuationSession::new(&model, &registry)
            .with_config(config)
            .run(&document())
            .await
            .unwrap();

        assert!(outcome.summarized);
        assert_eq!(outcome.turns, 3);
        assert_eq!(outcome.invocations.len(), 3);
        assert_eq!(outcome.final_response, "Partial valuation summary.");

        let requests = model.requests();
        assert_eq!(requests.len(), 4);
        let summary = &requests[3];
        assert_eq!(summary.tool_choice, Some(ToolChoice::None));
        assert_eq!(summary.temperature, Some(0.2));
        assert_eq!(
            summary.messages.last().and_then(|m| m.content.as_deref()),
            Some(SUMMARY_PROMPT)
        );
    }

    #[tokio::test]
    async fn test_empty_summary_is_an_error() {
        let model = ScriptedModel::new(vec![
            ChatMessage::assistant(""),
            ChatMessage::assistant(""),
        ]);
        let registry = ToolRegistry::with_defaults();
        let config = SessionConfig {
            max_turns: 1,
            ..SessionConfig::default()
        };
        let err = ValuationSession::new(&model, &registry)
            .with_config(config)
            .run(&document())
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::EmptyResponse));
    }
}
