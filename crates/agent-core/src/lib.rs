//! # agent-core
//!
//! Tool-calling orchestration over an OpenAI-style completions API.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                           Agent                              │
//! │  ┌──────────────┐  ┌──────────────┐  ┌────────────────────┐  │
//! │  │ Orchestrator │──│ ToolExecutor │──│    ToolRegistry    │  │
//! │  │  (2 rounds)  │  └──────────────┘  └────────────────────┘  │
//! │  │              │──────────────────▶ LlmProvider (Strategy)  │
//! │  └──────────────┘                                            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `LlmProvider` trait keeps the HTTP mechanics out of the orchestration
//! logic so it can be exercised with scripted providers.

pub mod error;
pub mod executor;
pub mod message;
pub mod provider;
pub mod reasoning;
pub mod tool;

pub use error::{AgentError, Result};
pub use executor::ToolExecutor;
pub use message::{Conversation, Message, Role};
pub use provider::{ChatRequest, ChatResponse, LlmProvider};
pub use reasoning::{Agent, AgentBuilder, AgentConfig};
pub use tool::{Tool, ToolArguments, ToolCall, ToolRegistry, ToolSchema};
