//! HTTP Handlers

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
};
use rust_decimal::Decimal;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use agent_core::{Conversation, Message};
use assistant_tools::{Quarter, quarterly_revenue};

use crate::state::AppState;

/// Length of the `Bearer ` prefix stripped from the authorization header
const BEARER_PREFIX_LEN: usize = 7;

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub tools: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatPayload {
    pub model: String,
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct QuarterlyRevenueResponse {
    pub quarter: u8,
    pub year: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl Into<String>) -> ApiError {
    (status, Json(ErrorResponse { error: error.into() }))
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        tools: state.agent.tools().names(),
    })
}

/// Run one tool-calling turn and return the conversation with the answer
/// appended
///
/// The body is decoded as JSON whatever its `Content-Type`.
pub async fn chat_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Vec<Message>>, ApiError> {
    let api_key = bearer_key(&headers)?;

    let payload: ChatPayload = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!(error = %e, "Rejected chat body");
        api_error(StatusCode::BAD_REQUEST, e.to_string())
    })?;

    tracing::info!(
        model = %payload.model,
        messages = payload.messages.len(),
        "Chat request"
    );

    let mut conversation = Conversation::from(payload.messages);
    state
        .agent
        .process_query(&mut conversation, &payload.model, &api_key)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Agent error");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    Ok(Json(conversation.into_messages()))
}

/// Total revenue for a calendar quarter
pub async fn quarterly_revenue_handler(
    State(state): State<AppState>,
    Path((quarter, year)): Path<(String, String)>,
) -> Result<Json<QuarterlyRevenueResponse>, ApiError> {
    let quarter: i64 = quarter
        .parse()
        .map_err(|_| api_error(StatusCode::BAD_REQUEST, "invalid quarter"))?;
    let year: i32 = year
        .parse()
        .map_err(|_| api_error(StatusCode::BAD_REQUEST, "invalid year"))?;
    let quarter = Quarter::try_from(quarter)
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;

    let revenue = quarterly_revenue(state.revenue.as_ref(), quarter, year)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, %quarter, year, "Quarterly revenue failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    Ok(Json(QuarterlyRevenueResponse {
        quarter: quarter.number(),
        year,
        revenue,
    }))
}

/// Everything after the first seven characters of `Authorization`
fn bearer_key(headers: &HeaderMap) -> Result<SecretString, ApiError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "missing authorization header"))?;

    value
        .get(BEARER_PREFIX_LEN..)
        .filter(|key| !key.is_empty())
        .map(|key| SecretString::from(key.to_owned()))
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "malformed authorization header"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use agent_core::{
        AgentBuilder, AgentError, ChatRequest, ChatResponse, LlmProvider, Result as CoreResult,
        Role, ToolCall, ToolRegistry,
        provider::{Choice, ResponseMessage},
    };
    use assistant_tools::{MemoryRevenueStore, Revenue, RevenueStore, ToolBackends, register_tools};
    use async_trait::async_trait;
    use axum::{body::Body, http::Request};
    use rust_decimal_macros::dec;
    use secrecy::ExposeSecret;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    /// Replays canned responses, recording requests and keys
    #[derive(Default)]
    struct ScriptedProvider {
        responses: Mutex<VecDeque<CoreResult<ChatResponse>>>,
        requests: Mutex<Vec<ChatRequest>>,
        keys: Mutex<Vec<String>>,
    }

    impl ScriptedProvider {
        fn new(responses: Vec<CoreResult<ChatResponse>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                ..Self::default()
            })
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(
            &self,
            request: &ChatRequest,
            api_key: &SecretString,
        ) -> CoreResult<ChatResponse> {
            self.requests.lock().unwrap().push(request.clone());
            self.keys
                .lock()
                .unwrap()
                .push(api_key.expose_secret().to_owned());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(ChatResponse::default()))
        }
    }

    fn reply(message: ResponseMessage) -> CoreResult<ChatResponse> {
        Ok(ChatResponse {
            choices: vec![Choice {
                index: 0,
                message,
                finish_reason: None,
            }],
            ..ChatResponse::default()
        })
    }

    fn text(content: &str) -> CoreResult<ChatResponse> {
        reply(ResponseMessage {
            role: Role::Assistant,
            content: Some(content.into()),
            tool_calls: None,
        })
    }

    async fn app(provider: Arc<ScriptedProvider>) -> axum::Router {
        let store = Arc::new(MemoryRevenueStore::new());
        store
            .upsert(&[
                Revenue::new(1, 2023, dec!(1000)),
                Revenue::new(2, 2023, dec!(1500)),
                Revenue::new(3, 2023, dec!(2000)),
            ])
            .await
            .unwrap();

        let backends = ToolBackends {
            revenue: store.clone(),
            weather: Arc::new(assistant_tools::WttrClient::new("http://127.0.0.1:9")),
            locator: Arc::new(assistant_tools::IpApiLocator::new("http://127.0.0.1:9")),
        };
        let mut tools = ToolRegistry::new();
        register_tools(&mut tools, &backends);

        let agent = AgentBuilder::new()
            .provider(provider)
            .tools(tools)
            .build()
            .unwrap();

        crate::build_router(AppState {
            agent: Arc::new(agent),
            revenue: store,
        })
    }

    async fn body_json(resp: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn chat(auth: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("content-type", "application/json");
        if let Some(auth) = auth {
            builder = builder.header("authorization", auth);
        }
        builder.body(Body::from(body.to_owned())).unwrap()
    }

    const USER_BODY: &str = r#"{"model":"test-model","messages":[{"role":"user","content":"hello"}]}"#;

    #[tokio::test]
    async fn test_quarterly_revenue() {
        let app = app(ScriptedProvider::new(vec![])).await;

        let resp = app.oneshot(get("/api/revenue/1/2023")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            body_json(resp).await,
            json!({"quarter": 1, "year": 2023, "revenue": 4500.0})
        );
    }

    #[tokio::test]
    async fn test_quarter_without_records_is_zero() {
        let app = app(ScriptedProvider::new(vec![])).await;

        let resp = app.oneshot(get("/api/revenue/3/2023")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["revenue"], json!(0.0));
    }

    #[tokio::test]
    async fn test_quarter_out_of_range() {
        let app = app(ScriptedProvider::new(vec![])).await;

        let resp = app.oneshot(get("/api/revenue/5/2023")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["error"], "invalid quarter: 5");
    }

    #[tokio::test]
    async fn test_non_integer_path() {
        let app = app(ScriptedProvider::new(vec![])).await;

        let resp = app
            .clone()
            .oneshot(get("/api/revenue/first/2023"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["error"], "invalid quarter");

        let resp = app.oneshot(get("/api/revenue/1/last")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["error"], "invalid year");
    }

    #[tokio::test]
    async fn test_chat_plain_answer() {
        let provider = ScriptedProvider::new(vec![text("Hi there")]);
        let app = app(provider.clone()).await;

        let resp = app
            .oneshot(chat(Some("Bearer sk-or-123"), USER_BODY))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(
            body,
            json!([
                {"role": "user", "content": "hello"},
                {"role": "assistant", "content": "Hi there"}
            ])
        );

        assert_eq!(provider.keys.lock().unwrap().as_slice(), ["sk-or-123"]);
        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests[0].model, "test-model");
        assert_eq!(requests[0].tools.as_ref().map(Vec::len), Some(4));
    }

    #[tokio::test]
    async fn test_chat_runs_revenue_tool() {
        let provider = ScriptedProvider::new(vec![
            reply(ResponseMessage {
                role: Role::Assistant,
                content: None,
                tool_calls: Some(vec![ToolCall::function(
                    "call_1",
                    "get_revenue_by_month_and_year",
                    r#"{"month": 1, "year": 2023}"#,
                )]),
            }),
            text("January 2023 revenue was 1000."),
        ]);
        let app = app(provider.clone()).await;

        let resp = app
            .oneshot(chat(Some("Bearer sk-or-123"), USER_BODY))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[1]["content"], "January 2023 revenue was 1000.");

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert!(requests[1].tools.is_none());

        let tool_result = requests[1].messages.last().unwrap();
        assert_eq!(tool_result.role, Role::User);
        let result: Value = serde_json::from_str(&tool_result.content).unwrap();
        assert_eq!(result, json!({"month": 1, "year": 2023, "revenue": 1000.0}));
    }

    #[tokio::test]
    async fn test_chat_missing_authorization() {
        let app = app(ScriptedProvider::new(vec![])).await;

        let resp = app.oneshot(chat(None, USER_BODY)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["error"], "missing authorization header");
    }

    #[tokio::test]
    async fn test_chat_short_authorization() {
        let app = app(ScriptedProvider::new(vec![])).await;

        let resp = app.oneshot(chat(Some("Bear"), USER_BODY)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(resp).await["error"],
            "malformed authorization header"
        );
    }

    #[tokio::test]
    async fn test_chat_malformed_body() {
        let provider = ScriptedProvider::new(vec![]);
        let app = app(provider.clone()).await;

        let resp = app
            .oneshot(chat(Some("Bearer sk-or-123"), r#"{"model": "m", "messages": ["#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(resp).await["error"].is_string());
        assert!(provider.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_chat_without_content_type() {
        let provider = ScriptedProvider::new(vec![text("Hi there")]);
        let app = app(provider.clone()).await;

        let req = Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("authorization", "Bearer sk-or-123")
            .body(Body::from(USER_BODY))
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await[1]["content"], "Hi there");
        assert_eq!(provider.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_chat_accepts_null_content_in_history() {
        let provider = ScriptedProvider::new(vec![text("Still sunny.")]);
        let app = app(provider.clone()).await;

        let body = r#"{"model":"test-model","messages":[
            {"role":"user","content":"weather?"},
            {"role":"assistant","content":null},
            {"role":"user","content":"and now?"}
        ]}"#;
        let resp = app
            .oneshot(chat(Some("Bearer sk-or-123"), body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body.as_array().unwrap().len(), 4);
        assert_eq!(body[1], json!({"role": "assistant", "content": ""}));

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests[0].messages[1].content, "");
    }

    #[tokio::test]
    async fn test_chat_upstream_failure() {
        let provider = ScriptedProvider::new(vec![Err(AgentError::Provider(
            "connection reset".into(),
        ))]);
        let app = app(provider).await;

        let resp = app
            .oneshot(chat(Some("Bearer sk-or-123"), USER_BODY))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(resp).await["error"],
            "Provider error: connection reset"
        );
    }

    #[tokio::test]
    async fn test_chat_empty_follow_up_is_server_error() {
        let provider = ScriptedProvider::new(vec![
            reply(ResponseMessage {
                role: Role::Assistant,
                content: None,
                tool_calls: Some(vec![ToolCall::function("c1", "no_such_tool", "{}")]),
            }),
            Ok(ChatResponse::default()),
        ]);
        let app = app(provider).await;

        let resp = app
            .oneshot(chat(Some("Bearer sk-or-123"), USER_BODY))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(resp).await["error"], "no choices in final response");
    }

    #[tokio::test]
    async fn test_health_lists_tools() {
        let app = app(ScriptedProvider::new(vec![])).await;

        let resp = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["tools"].as_array().unwrap().len(), 4);
    }
}
