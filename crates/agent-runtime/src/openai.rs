//! OpenAI-compatible Provider
//!
//! Implementation of `LlmProvider` for any endpoint speaking the OpenAI chat
//! completions protocol (OpenRouter by default).

use std::time::Duration;

use agent_core::{
    error::{AgentError, Result},
    provider::{ChatRequest, ChatResponse, LlmProvider},
};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Provider configuration
#[derive(Clone, Debug)]
pub struct OpenAiCompatConfig {
    /// Base URL; `/chat/completions` is appended
    pub base_url: String,

    /// Request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl Default for OpenAiCompatConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout: None,
        }
    }
}

impl OpenAiCompatConfig {
    pub fn from_env() -> Self {
        let base_url = std::env::var("LLM_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let timeout = std::env::var("LLM_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs);

        Self { base_url, timeout }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Chat completions provider
pub struct OpenAiCompatProvider {
    client: Client,
    config: OpenAiCompatConfig,
}

impl OpenAiCompatProvider {
    /// Create from configuration
    pub fn from_config(config: OpenAiCompatConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AgentError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_config(OpenAiCompatConfig::from_env())
    }

    pub fn config(&self) -> &OpenAiCompatConfig {
        &self.config
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        "openai-compatible"
    }

    async fn complete(
        &self,
        request: &ChatRequest,
        api_key: &SecretString,
    ) -> Result<ChatResponse> {
        let url = self.config.completions_url();
        tracing::debug!(%url, model = %request.model, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(|e| AgentError::Provider(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // error bodies still decode; they just carry no choices
            tracing::warn!(%status, "Completion endpoint returned an error status");
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AgentError::Provider(e.to_string()))?;

        let decoded: ChatResponse = serde_json::from_slice(&body).map_err(|e| {
            tracing::error!(%status, error = %e, "Failed to decode completion response");
            AgentError::Parse(format!("invalid completion response: {e}"))
        })?;

        tracing::debug!(
            choices = decoded.choices.len(),
            total_tokens = decoded.usage.total_tokens,
            "Completion received"
        );
        Ok(decoded)
    }
}
