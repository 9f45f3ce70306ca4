//! Tool-Calling Orchestration
//!
//! One turn is at most two completions:
//!
//! ```text
//! initial completion ──┬── no tool calls ──────────────────────────▶ done
//!                      └── tool calls ─▶ execute all ─▶ final completion ─▶ done
//! ```
//!
//! Tool results are never fed into another round of tool calling.

use std::sync::Arc;

use secrecy::SecretString;

use crate::error::{AgentError, Result};
use crate::executor::ToolExecutor;
use crate::message::{Conversation, Message};
use crate::provider::{ChatRequest, LlmProvider};
use crate::tool::ToolRegistry;

/// Synthetic message appended when the initial completion has no choices
pub const NO_INITIAL_RESPONSE: &str = "Error: No response from LLM";

/// Synthetic message appended when the final completion has no choices
pub const NO_FINAL_RESPONSE: &str = "No response from LLM";

const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that can use tools to answer user queries.";

/// Agent configuration
#[derive(Clone, Debug)]
pub struct AgentConfig {
    /// System prompt
    pub system_prompt: String,

    /// Prepend the system prompt to outgoing requests whose conversation
    /// has none
    pub inject_system_prompt: bool,

    /// Carried for configuration compatibility; no retry policy reads it
    pub max_retries: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
            inject_system_prompt: false,
            max_retries: 3,
        }
    }
}

/// The main Agent struct
pub struct Agent {
    provider: Arc<dyn LlmProvider>,
    tools: Arc<ToolRegistry>,
    executor: ToolExecutor,
    config: AgentConfig,
}

impl Agent {
    /// Create a new agent
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        tools: Arc<ToolRegistry>,
        config: AgentConfig,
    ) -> Self {
        Self {
            provider,
            executor: ToolExecutor::new(Arc::clone(&tools)),
            tools,
            config,
        }
    }

    /// Messages to send upstream for this conversation
    fn outgoing_messages(&self, conversation: &Conversation) -> Vec<Message> {
        let mut messages = Vec::with_capacity(conversation.len() + 1);
        if self.config.inject_system_prompt && !conversation.has_system_prompt() {
            messages.push(Message::system(self.config.system_prompt.clone()));
        }
        messages.extend_from_slice(conversation.messages());
        messages
    }

    /// Run one turn, appending the model's answer to `conversation`
    ///
    /// An empty initial response is recorded as a synthetic assistant message
    /// and treated as success. An empty final response is recorded the same
    /// way but reported as [`AgentError::EmptyModelResponse`].
    pub async fn process_query(
        &self,
        conversation: &mut Conversation,
        model: &str,
        api_key: &SecretString,
    ) -> Result<()> {
        let request = ChatRequest::new(model, self.outgoing_messages(conversation))
            .with_tools(self.tools.definitions());

        tracing::debug!(
            provider = self.provider.name(),
            model,
            messages = request.messages.len(),
            tools = self.tools.len(),
            "Requesting initial completion"
        );
        let initial = self.provider.complete(&request, api_key).await?;

        let Some(initial_msg) = initial.first_message() else {
            tracing::warn!("No choices in initial response");
            conversation.push(Message::assistant(NO_INITIAL_RESPONSE));
            return Ok(());
        };

        let tool_calls = initial_msg.tool_calls();
        if tool_calls.is_empty() {
            conversation.push(initial_msg.to_message());
            return Ok(());
        }

        tracing::debug!(count = tool_calls.len(), "Model requested tool calls");
        let mut tool_results = Vec::with_capacity(tool_calls.len());
        for call in tool_calls {
            tool_results.push(self.executor.execute(call).await);
        }

        let mut follow_up = ChatRequest::new(model, request.messages);
        let initial_message = initial_msg.to_message();
        if !initial_message.content.is_empty() {
            follow_up.messages.push(initial_message);
        }
        follow_up.messages.extend(tool_results);

        tracing::debug!(messages = follow_up.messages.len(), "Requesting final completion");
        let final_response = self.provider.complete(&follow_up, api_key).await?;

        let Some(final_msg) = final_response.first_message() else {
            tracing::warn!("No choices in final response");
            conversation.push(Message::assistant(NO_FINAL_RESPONSE));
            return Err(AgentError::EmptyModelResponse);
        };

        conversation.push(final_msg.to_message());
        Ok(())
    }

    /// Get the tool registry
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Get configuration
    pub const fn config(&self) -> &AgentConfig {
        &self.config
    }
}

/// Builder for Agent configuration
#[derive(Default)]
pub struct AgentBuilder {
    provider: Option<Arc<dyn LlmProvider>>,
    tools: ToolRegistry,
    config: AgentConfig,
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn provider(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn tool<T: crate::tool::Tool + 'static>(mut self, tool: T) -> Self {
        self.tools.register(tool);
        self
    }

    pub fn tools(mut self, tools: ToolRegistry) -> Self {
        self.tools = tools;
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = prompt.into();
        self
    }

    pub const fn inject_system_prompt(mut self, inject: bool) -> Self {
        self.config.inject_system_prompt = inject;
        self
    }

    pub const fn max_retries(mut self, max: u32) -> Self {
        self.config.max_retries = max;
        self
    }

    pub fn build(self) -> Result<Agent> {
        let provider = self
            .provider
            .ok_or_else(|| AgentError::Config("Provider is required".into()))?;

        Ok(Agent::new(provider, Arc::new(self.tools), self.config))
    }
}
