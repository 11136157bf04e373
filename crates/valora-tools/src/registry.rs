//! Name-indexed tool registry and dispatch.

use std::fmt;

use serde_json::Value;
use tracing::{debug, warn};
use valora_combine::AggregatorConfig;
use valora_traits::{Result, ValoraError};

use crate::aggregate::FinalValuationTool;
use crate::finance::{CostOfEquityTool, FcffDcfTool, WaccTool};
use crate::methods::{ChecklistTool, DcfLtgTool, DcfMultipleTool, ScorecardTool, VcMethodTool};
use crate::stage::{GetTypicalRoi, GetValuationWeights};
use crate::traits::{Tool, ToolSpec, error_payload};

/// Registry of every tool the model may call.
///
/// Dispatch never fails: any error, including an unknown tool name or
/// malformed argument JSON, comes back as an `{error, kind}` payload that can
/// be handed straight back to the model.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Create a registry with all valuation tools, using the default
    /// aggregator configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::with_config(AggregatorConfig::default())
    }

    /// Create a registry with all valuation tools.
    #[must_use]
    pub fn with_config(config: AggregatorConfig) -> Self {
        let mut registry = Self::new();
        registry.register(GetValuationWeights);
        registry.register(GetTypicalRoi);
        registry.register(ScorecardTool);
        registry.register(ChecklistTool);
        registry.register(DcfLtgTool);
        registry.register(DcfMultipleTool);
        registry.register(VcMethodTool);
        registry.register(FinalValuationTool::new(config));
        registry.register(CostOfEquityTool);
        registry.register(WaccTool);
        registry.register(FcffDcfTool);
        registry
    }

    /// Add a tool, replacing any tool already registered under its name.
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.tools.retain(|t| t.name() != tool.name());
        self.tools.push(Box::new(tool));
    }

    /// Get a tool by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.iter().find(|t| t.name() == name).map(|t| &**t)
    }

    /// Get tool names
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry has no tools.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Specs of every tool, in registration order.
    #[must_use]
    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools.iter().map(|t| t.spec()).collect()
    }

    /// Function schemas in the OpenAI `tools` array format.
    #[must_use]
    pub fn schemas(&self) -> Vec<Value> {
        self.specs().iter().map(ToolSpec::to_function_schema).collect()
    }

    /// Run a tool with already-decoded arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ValoraError::UnknownTool`] if no tool has this name, or the
    /// tool's own error.
    pub fn call(&self, name: &str, args: Value) -> Result<Value> {
        let tool = self
            .get(name)
            .ok_or_else(|| ValoraError::UnknownTool(name.to_string()))?;
        tool.execute(args)
    }

    /// Run a tool with decoded arguments, folding any error into the payload.
    #[must_use]
    pub fn dispatch_value(&self, name: &str, args: Value) -> Value {
        match self.call(name, args) {
            Ok(value) => {
                debug!(tool = name, "tool call succeeded");
                value
            }
            Err(err) => {
                warn!(tool = name, kind = err.kind(), error = %err, "tool call failed");
                error_payload(&err)
            }
        }
    }

    /// Run a tool with raw JSON arguments, as received from the model.
    ///
    /// An empty argument string is treated as `{}`.
    #[must_use]
    pub fn dispatch(&self, name: &str, args_json: &str) -> Value {
        let args = if args_json.trim().is_empty() {
            Ok(Value::Object(serde_json::Map::new()))
        } else {
            serde_json::from_str(args_json)
        };

        match args {
            Ok(args) => self.dispatch_value(name, args),
            Err(err) => {
                let err = ValoraError::InvalidArguments {
                    tool: name.to_string(),
                    reason: format!("Invalid JSON arguments: {err}"),
                };
                warn!(tool = name, error = %err, "tool arguments are not valid JSON");
                error_payload(&err)
            }
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}
