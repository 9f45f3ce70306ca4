//! Tool System
//!
//! Tools are registered once at startup and invoked by the orchestrator when
//! the model asks for them. Every tool advertises a schema; arguments are
//! checked against that schema before the tool body runs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{AgentError, Result};

/// Decoded tool arguments
pub type ToolArguments = Map<String, Value>;

/// Tool call request from the LLM (`choices[0].message.tool_calls[]`)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Call ID assigned by the model
    #[serde(default)]
    pub id: String,

    /// Call type, always `function` in practice
    #[serde(rename = "type", default)]
    pub call_type: String,

    /// Function name and raw JSON arguments
    pub function: FunctionCall,
}

/// Function part of a tool call
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    #[serde(default)]
    pub name: String,

    /// Arguments exactly as the model produced them (a JSON document in a string)
    #[serde(default)]
    pub arguments: String,
}

impl ToolCall {
    pub fn function(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            call_type: "function".into(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }

    /// Parse the raw argument string as a JSON object; `null` means no arguments
    pub fn parse_arguments(&self) -> Result<ToolArguments> {
        match serde_json::from_str::<Value>(&self.function.arguments)? {
            Value::Object(map) => Ok(map),
            Value::Null => Ok(ToolArguments::new()),
            other => Err(AgentError::Parse(format!(
                "tool arguments must be a JSON object, got {other}"
            ))),
        }
    }
}

/// Parameter definition for tool schema
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParameterSchema {
    /// Parameter name
    pub name: String,

    /// JSON Schema type (string, integer, number, boolean)
    #[serde(rename = "type")]
    pub param_type: String,

    /// Human-readable description
    pub description: String,

    /// Whether this parameter is required
    #[serde(default)]
    pub required: bool,

    /// Enum of allowed values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
}

impl ParameterSchema {
    pub fn required(
        name: impl Into<String>,
        param_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
            description: description.into(),
            required: true,
            enum_values: None,
        }
    }

    pub fn with_enum<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = Some(values.into_iter().map(|v| Value::String(v.into())).collect());
        self
    }

    /// Check a supplied value against the declared type and enum
    fn check(&self, value: &Value) -> Result<()> {
        let type_ok = match self.param_type.as_str() {
            "string" => value.is_string(),
            "integer" => coerce_i64(value).is_some(),
            "number" => coerce_f64(value).is_some(),
            "boolean" => value.is_boolean(),
            _ => true,
        };
        if !type_ok {
            return Err(AgentError::ToolValidation(format!(
                "parameter '{}' must be of type {}, got {value}",
                self.name, self.param_type
            )));
        }

        if let Some(allowed) = &self.enum_values {
            if !allowed.contains(value) {
                return Err(AgentError::ToolValidation(format!(
                    "parameter '{}' must be one of {}, got {value}",
                    self.name,
                    Value::Array(allowed.clone())
                )));
            }
        }

        Ok(())
    }
}

/// Tool definition schema
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Unique tool identifier
    pub name: String,

    /// Human-readable description (shown to LLM)
    pub description: String,

    /// Parameter definitions, in declaration order
    pub parameters: Vec<ParameterSchema>,
}

impl ToolSchema {
    /// Render as an OpenAI-style function definition for the `tools` field
    ///
    /// Tools without parameters omit the `parameters` object entirely.
    pub fn to_definition(&self) -> ToolDefinition {
        let parameters = (!self.parameters.is_empty()).then(|| {
            let mut properties = Map::new();
            for param in &self.parameters {
                let mut property = json!({
                    "type": param.param_type,
                    "description": param.description,
                });
                if let Some(values) = &param.enum_values {
                    property["enum"] = Value::Array(values.clone());
                }
                properties.insert(param.name.clone(), property);
            }
            let required: Vec<&str> = self
                .parameters
                .iter()
                .filter(|p| p.required)
                .map(|p| p.name.as_str())
                .collect();

            json!({
                "type": "object",
                "properties": properties,
                "required": required,
            })
        });

        ToolDefinition {
            tool_type: "function".into(),
            function: FunctionDefinition {
                name: self.name.clone(),
                description: self.description.clone(),
                parameters,
            },
        }
    }
}

/// Entry of the `tools` array sent to the completions endpoint
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: FunctionDefinition,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
}

/// Tool trait - implement to add new capabilities
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool's schema for LLM function calling
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with already validated arguments
    async fn execute(&self, args: &ToolArguments) -> Result<Value>;

    /// Validate arguments before execution
    fn validate(&self, args: &ToolArguments) -> Result<()> {
        let schema = self.schema();

        for param in &schema.parameters {
            match args.get(&param.name) {
                Some(value) => param.check(value)?,
                None if param.required => {
                    return Err(AgentError::ToolValidation(format!(
                        "missing required parameter: {}",
                        param.name
                    )));
                }
                None => {}
            }
        }

        Ok(())
    }
}

/// Registry for available tools
///
/// Keeps registration order so the advertised tool list is stable.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new tool; a tool with the same name is replaced in place
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.register_arc(Arc::new(tool));
    }

    /// Register a shared tool
    pub fn register_arc(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.schema().name;
        if let Some(&pos) = self.index.get(&name) {
            tracing::debug!(tool = %name, "Replacing registered tool");
            self.tools[pos] = tool;
        } else {
            self.index.insert(name, self.tools.len());
            self.tools.push(tool);
        }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.index.get(name).map(|&pos| Arc::clone(&self.tools[pos]))
    }

    /// Wire definitions for the request `tools` field
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.schema().to_definition()).collect()
    }

    /// Get tool names in registration order
    pub fn names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.schema().name).collect()
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Read a string argument
pub fn string_arg<'a>(args: &'a ToolArguments, name: &str) -> Result<&'a str> {
    args.get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| AgentError::ToolValidation(format!("missing string parameter: {name}")))
}

/// Read an integer argument, accepting integral numbers and numeric strings
pub fn integer_arg(args: &ToolArguments, name: &str) -> Result<i64> {
    args.get(name)
        .and_then(coerce_i64)
        .ok_or_else(|| AgentError::ToolValidation(format!("missing integer parameter: {name}")))
}

fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoTool {
        name: &'static str,
        description: &'static str,
    }

    #[async_trait]
    impl Tool for EchoTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: self.name.into(),
                description: self.description.into(),
                parameters: vec![
                    ParameterSchema::required("text", "string", "Text to echo"),
                    ParameterSchema::required("unit", "string", "Unit")
                        .with_enum(["celsius", "fahrenheit"]),
                    ParameterSchema::required("count", "integer", "Repetitions"),
                ],
            }
        }

        async fn execute(&self, args: &ToolArguments) -> Result<Value> {
            Ok(Value::String(string_arg(args, "text")?.to_owned()))
        }
    }

    fn echo(name: &'static str, description: &'static str) -> EchoTool {
        EchoTool { name, description }
    }

    fn args(value: Value) -> ToolArguments {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_tool_registry() {
        let mut registry = ToolRegistry::new();
        registry.register(echo("b_tool", "second"));
        registry.register(echo("a_tool", "first"));

        assert_eq!(registry.len(), 2);
        assert!(registry.get("a_tool").is_some());
        assert!(registry.get("unknown").is_none());
        assert_eq!(registry.names(), vec!["b_tool", "a_tool"]);
    }

    #[test]
    fn test_registry_last_write_wins_in_place() {
        let mut registry = ToolRegistry::new();
        registry.register(echo("one", "old"));
        registry.register(echo("two", "two"));
        registry.register(echo("one", "new"));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["one", "two"]);
        assert_eq!(registry.get("one").unwrap().schema().description, "new");
    }

    #[test]
    fn test_definition_shape() {
        let def = echo("echo", "Echo text").schema().to_definition();
        let json = serde_json::to_value(&def).unwrap();

        assert_eq!(json["type"], "function");
        assert_eq!(json["function"]["name"], "echo");
        assert_eq!(json["function"]["parameters"]["type"], "object");
        assert_eq!(
            json["function"]["parameters"]["properties"]["unit"]["enum"],
            json!(["celsius", "fahrenheit"])
        );
        assert_eq!(
            json["function"]["parameters"]["required"],
            json!(["text", "unit", "count"])
        );
    }

    #[test]
    fn test_definition_without_parameters() {
        let schema = ToolSchema {
            name: "now".into(),
            description: "Current time".into(),
            parameters: Vec::new(),
        };
        let json = serde_json::to_value(schema.to_definition()).unwrap();
        assert!(json["function"].get("parameters").is_none());
    }

    #[test]
    fn test_validate() {
        let tool = echo("echo", "Echo");

        let ok = tool.validate(&args(json!({"text": "hi", "unit": "celsius", "count": 2})));
        assert!(ok.is_ok());

        // numeric strings coerce for integer parameters
        let coerced = tool.validate(&args(json!({"text": "hi", "unit": "celsius", "count": "2"})));
        assert!(coerced.is_ok());

        let missing = tool.validate(&args(json!({"unit": "celsius", "count": 1})));
        assert!(matches!(missing, Err(AgentError::ToolValidation(_))));

        let bad_enum = tool.validate(&args(json!({"text": "hi", "unit": "kelvin", "count": 1})));
        assert!(matches!(bad_enum, Err(AgentError::ToolValidation(_))));

        let bad_type = tool.validate(&args(json!({"text": 5, "unit": "celsius", "count": 1})));
        assert!(matches!(bad_type, Err(AgentError::ToolValidation(_))));

        let bad_int = tool.validate(&args(json!({"text": "a", "unit": "celsius", "count": 1.5})));
        assert!(matches!(bad_int, Err(AgentError::ToolValidation(_))));
    }

    #[test]
    fn test_integer_arg_coercion() {
        let a = args(json!({"n": 7, "s": " 2023 ", "f": 3.0, "bad": "x", "b": true}));
        assert_eq!(integer_arg(&a, "n").unwrap(), 7);
        assert_eq!(integer_arg(&a, "s").unwrap(), 2023);
        assert_eq!(integer_arg(&a, "f").unwrap(), 3);
        assert!(integer_arg(&a, "bad").is_err());
        assert!(integer_arg(&a, "b").is_err());
        assert!(integer_arg(&a, "absent").is_err());
    }

    #[test]
    fn test_parse_arguments() {
        let call = ToolCall::function("c1", "echo", r#"{"text":"hi"}"#);
        assert_eq!(call.parse_arguments().unwrap()["text"], "hi");

        let null = ToolCall::function("c4", "now", "null");
        assert!(null.parse_arguments().unwrap().is_empty());

        let not_object = ToolCall::function("c2", "echo", "[1,2]");
        assert!(matches!(not_object.parse_arguments(), Err(AgentError::Parse(_))));

        let broken = ToolCall::function("c3", "echo", "{text:");
        assert!(matches!(broken.parse_arguments(), Err(AgentError::Json(_))));
    }
}
