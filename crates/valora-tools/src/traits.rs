//! Core `Tool` trait and helpers shared by every tool.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use valora_traits::{Result, ValoraError};

/// Tool specification for LLM function calling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    /// Tool name (must match `name()` method).
    pub name: String,
    /// Human-readable description for the LLM.
    pub description: String,
    /// JSON Schema for the tool's parameters.
    pub parameters: Value,
}

impl ToolSpec {
    /// The spec in the OpenAI `tools` array format.
    #[must_use]
    pub fn to_function_schema(&self) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.parameters,
            }
        })
    }
}

/// A deterministic function exposed to the language model by name.
///
/// Each tool provides:
/// - `name()`: unique identifier
/// - `description()`: what the tool does (shown to the model)
/// - `parameters_schema()`: JSON Schema for arguments
/// - `execute()`: decode the arguments and run the calculation
pub trait Tool: Send + Sync {
    /// Unique tool name.
    fn name(&self) -> &str;

    /// Description shown to the model.
    fn description(&self) -> &str;

    /// JSON Schema for parameters.
    fn parameters_schema(&self) -> Value;

    /// Execute the tool with the given arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ValoraError::InvalidArguments`] if the arguments do not
    /// match the schema, or whatever error the underlying calculation
    /// reports.
    fn execute(&self, args: Value) -> Result<Value>;

    /// Generate a [`ToolSpec`] for function calling.
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}

/// Decode tool arguments into a typed request.
///
/// # Errors
///
/// Returns [`ValoraError::InvalidArguments`] naming the tool and the decoding
/// failure.
pub fn decode_args<T: DeserializeOwned>(tool: &str, args: Value) -> Result<T> {
    serde_json::from_value(args).map_err(|err| ValoraError::InvalidArguments {
        tool: tool.to_string(),
        reason: err.to_string(),
    })
}

/// The structured `{error, kind}` payload returned to the model on failure.
#[must_use]
pub fn error_payload(err: &ValoraError) -> Value {
    json!({
        "error": err.to_string(),
        "kind": err.kind(),
    })
}

/// A JSON Schema `number` property.
pub(crate) fn number(description: &str) -> Value {
    json!({ "type": "number", "description": description })
}

/// A JSON Schema `string` property.
pub(crate) fn string(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

/// A JSON Schema `array` of numbers.
pub(crate) fn number_array(description: &str) -> Value {
    json!({ "type": "array", "items": { "type": "number" }, "description": description })
}

/// A JSON Schema `object` with the given properties and required keys.
pub(crate) fn object(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Args {
        rate: f64,
    }

    #[test]
    fn test_decode_args() {
        let args: Args = decode_args("t", json!({ "rate": 0.1 })).unwrap();
        assert_eq!(args.rate, 0.1);
    }

    #[test]
    fn test_decode_args_reports_tool() {
        let err = decode_args::<Args>("calc", json!({ "rate": "high" })).unwrap_err();
        match err {
            ValoraError::InvalidArguments { tool, reason } => {
                assert_eq!(tool, "calc");
                assert!(!reason.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_payload() {
        let payload = error_payload(&ValoraError::UnknownTool("nope".to_string()));
        assert_eq!(payload["kind"], "unknown_tool");
        assert!(payload["error"].as_str().unwrap().contains("nope"));
    }

    #[test]
    fn test_function_schema_format() {
        let spec = ToolSpec {
            name: "test".to_string(),
            description: "A test tool".to_string(),
            parameters: object(json!({ "x": number("x") }), &["x"]),
        };
        let schema = spec.to_function_schema();
        assert_eq!(schema["type"], "function");
        assert_eq!(schema["function"]["name"], "test");
        assert_eq!(schema["function"]["parameters"]["required"][0], "x");
    }
}
