//! Application State

use std::sync::Arc;

use agent_core::Agent;
use assistant_tools::RevenueStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Tool-calling agent; immutable once built
    pub agent: Arc<Agent>,

    /// Backs the quarterly revenue endpoint and the revenue tool
    pub revenue: Arc<dyn RevenueStore>,
}
