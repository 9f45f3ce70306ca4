//! # agent-runtime
//!
//! Runtime providers for the agent.
//!
//! ## Providers
//!
//! - **OpenAI-compatible** (default): any `/chat/completions` endpoint with
//!   native tool calling (OpenRouter, OpenAI, local gateways)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_runtime::OpenAiCompatProvider;
//!
//! let provider = OpenAiCompatProvider::from_env()?;
//! let agent = AgentBuilder::new()
//!     .provider(Arc::new(provider))
//!     .build()?;
//! ```

#[cfg(feature = "openai")]
pub mod openai;

#[cfg(feature = "openai")]
pub use openai::{OpenAiCompatConfig, OpenAiCompatProvider};

// Re-export core types for convenience
pub use agent_core::{Agent, AgentError, LlmProvider, Message, Result, Role, Tool, ToolRegistry};
