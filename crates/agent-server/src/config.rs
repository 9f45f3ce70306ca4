//! Server Configuration
//!
//! Everything is read from the environment (after `.env` is loaded).

use agent_core::AgentConfig;
use agent_runtime::OpenAiCompatConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub llm: OpenAiCompatConfig,
    pub agent: AgentConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let mut agent = AgentConfig::default();

        if let Ok(prompt) = std::env::var("AGENT_SYSTEM_PROMPT") {
            agent.system_prompt = prompt;
        }
        if let Ok(raw) = std::env::var("AGENT_INJECT_SYSTEM_PROMPT") {
            agent.inject_system_prompt = parse_flag(&raw).ok_or_else(|| {
                anyhow::anyhow!("AGENT_INJECT_SYSTEM_PROMPT must be a boolean, got {raw:?}")
            })?;
        }
        if let Ok(raw) = std::env::var("AGENT_MAX_RETRIES") {
            agent.max_retries = raw
                .trim()
                .parse()
                .map_err(|e| {
                    anyhow::anyhow!("AGENT_MAX_RETRIES must be a non-negative integer: {e}")
                })?;
        }

        Ok(Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into()),
            llm: OpenAiCompatConfig::from_env(),
            agent,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
