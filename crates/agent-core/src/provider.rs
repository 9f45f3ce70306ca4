//! LLM Provider Strategy Pattern
//!
//! Wire types for OpenAI-style chat completions and the trait every backend
//! implements. The orchestrator only talks to `LlmProvider`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_core::provider::{ChatRequest, LlmProvider};
//!
//! let request = ChatRequest::new("openai/gpt-4o-mini", messages);
//! let response = provider.complete(&request, &api_key).await?;
//! ```

use async_trait::async_trait;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::message::{Message, Role};
use crate::tool::{ToolCall, ToolDefinition};

/// Request body for `POST /chat/completions`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model identifier (e.g., "openai/gpt-4o-mini")
    #[serde(default)]
    pub model: String,

    /// Conversation so far
    #[serde(default)]
    pub messages: Vec<Message>,

    /// Tools the model may call; omitted from the body when `None`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            tools: None,
        }
    }

    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = Some(tools);
        self
    }
}

/// Response from an LLM completion
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub object: String,

    #[serde(default)]
    pub created: i64,

    #[serde(default)]
    pub model: String,

    /// Candidate answers; only the first is used and it may be absent
    #[serde(default)]
    pub choices: Vec<Choice>,

    /// Token usage statistics
    #[serde(default)]
    pub usage: TokenUsage,
}

impl ChatResponse {
    /// The message of `choices[0]`, if any
    pub fn first_message(&self) -> Option<&ResponseMessage> {
        self.choices.first().map(|c| &c.message)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,

    #[serde(default)]
    pub message: ResponseMessage,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Assistant message as returned by the endpoint
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub role: Role,

    /// `null` when the model only issued tool calls
    #[serde(default)]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

impl ResponseMessage {
    /// Requested tool calls, empty when none
    pub fn tool_calls(&self) -> &[ToolCall] {
        self.tool_calls.as_deref().unwrap_or_default()
    }

    /// Convert into a plain conversation message
    pub fn to_message(&self) -> Message {
        Message::new(self.role, self.content.clone().unwrap_or_default())
    }
}

/// Token usage statistics
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// Strategy trait for LLM providers
///
/// The bearer key is passed per call because it belongs to the caller of the
/// HTTP endpoint, not to the process.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// Issue a single completion request
    async fn complete(&self, request: &ChatRequest, api_key: &SecretString) -> Result<ChatResponse>;
}
