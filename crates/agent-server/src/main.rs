//! Tool-calling assistant HTTP server
//!
//! Axum server exposing the chat endpoint, which lets an OpenAI-compatible
//! model call the weather, revenue and date/time tools, plus a direct
//! quarterly revenue endpoint.

mod config;
mod handlers;
mod state;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent_core::{Agent, ToolRegistry};
use agent_runtime::OpenAiCompatProvider;
use assistant_tools::{
    IpApiLocator, MemoryRevenueStore, RevenueStore, ToolBackends, WttrClient, register_tools,
    seed_revenue,
};

use crate::config::ServerConfig;
use crate::handlers::{chat_handler, health_check, quarterly_revenue_handler};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    // Revenue store with sample data
    let store = Arc::new(MemoryRevenueStore::new());
    let seed = seed_revenue();
    store.upsert(&seed).await?;
    tracing::info!(records = seed.len(), store = store.name(), "Seeded revenue store");

    // Tools
    let backends = ToolBackends {
        revenue: store.clone(),
        weather: Arc::new(WttrClient::from_env()),
        locator: Arc::new(IpApiLocator::from_env()),
    };
    let mut tools = ToolRegistry::new();
    register_tools(&mut tools, &backends);

    tracing::info!("Registered {} tools:", tools.len());
    for name in tools.names() {
        tracing::info!("  • {}", name);
    }

    // LLM provider
    let provider = OpenAiCompatProvider::from_config(config.llm.clone())?;
    tracing::info!(base_url = %provider.config().base_url, "Using chat completions endpoint");

    let agent = Agent::new(Arc::new(provider), Arc::new(tools), config.agent.clone());

    let app = build_router(AppState {
        agent: Arc::new(agent),
        revenue: store,
    });

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("Server running on http://{}", config.bind_addr);
    tracing::info!("  GET  /health                         - Health check");
    tracing::info!("  POST /api/chat                       - Tool-calling chat");
    tracing::info!("  GET  /api/revenue/{{quarter}}/{{year}} - Quarterly revenue");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Routes, CORS and request tracing
fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/chat", post(chat_handler))
        .route("/api/revenue/{quarter}/{year}", get(quarterly_revenue_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
