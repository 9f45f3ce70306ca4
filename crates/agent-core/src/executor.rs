//! Tool Executor
//!
//! Turns one model-issued tool call into one conversation message. Failures
//! never escape: they become `Error: ...` messages so sibling calls in the
//! same turn still run.

use std::sync::Arc;

use crate::error::{AgentError, Result};
use crate::message::Message;
use crate::tool::{ToolCall, ToolRegistry};

/// Executes tool calls against a shared registry
#[derive(Clone)]
pub struct ToolExecutor {
    tools: Arc<ToolRegistry>,
}

impl ToolExecutor {
    pub fn new(tools: Arc<ToolRegistry>) -> Self {
        Self { tools }
    }

    /// Execute a call and wrap the outcome as a user-role message
    pub async fn execute(&self, call: &ToolCall) -> Message {
        match self.try_execute(call).await {
            Ok(content) => Message::user(content),
            Err(e) => {
                tracing::warn!(tool = %call.function.name, error = %e, "Tool call failed");
                Message::user(format!("Error: {e}"))
            }
        }
    }

    /// Parse, resolve, validate, run and serialize
    pub async fn try_execute(&self, call: &ToolCall) -> Result<String> {
        let name = &call.function.name;
        tracing::debug!(tool = %name, arguments = %call.function.arguments, "Executing tool");

        let args = call.parse_arguments()?;

        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| AgentError::ToolNotFound(name.clone()))?;

        tool.validate(&args)?;

        let output = tool.execute(&args).await?;
        Ok(serde_json::to_string(&output)?)
    }
}
