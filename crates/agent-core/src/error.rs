//! Error Types

use thiserror::Error;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Agent error types
#[derive(Error, Debug)]
pub enum AgentError {
    /// LLM provider error (transport failure, bad endpoint)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Tool not found in registry
    #[error("tool {0} not found")]
    ToolNotFound(String),

    /// Tool arguments did not match the declared parameter schema
    #[error("invalid arguments: {0}")]
    ToolValidation(String),

    /// Tool execution failed
    #[error("{0}")]
    ToolExecution(String),

    /// The model answered the follow-up request with zero choices
    #[error("no choices in final response")]
    EmptyModelResponse,

    /// Parse error (e.g., tool call arguments)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_not_found_display() {
        let err = AgentError::ToolNotFound("get_stock_price".into());
        assert_eq!(err.to_string(), "tool get_stock_price not found");
    }

    #[test]
    fn test_json_error_converts() {
        let err: AgentError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(err.to_string().starts_with("JSON error:"));
    }
}
