//! Error Types for the Assistant Tools

use agent_core::AgentError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ToolkitError>;

#[derive(Error, Debug)]
pub enum ToolkitError {
    #[error("no revenue found for month {month} and year {year}")]
    RevenueNotFound { month: u32, year: i32 },

    #[error("invalid quarter: {0}")]
    InvalidQuarter(i64),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to get revenue: {0}")]
    Storage(String),

    #[error("Weather error: {0}")]
    Weather(String),

    #[error("error getting location: {0}")]
    Geolocation(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ToolkitError {
    /// Whether the error means "no row" rather than a failed lookup
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::RevenueNotFound { .. })
    }
}

impl From<ToolkitError> for AgentError {
    fn from(err: ToolkitError) -> Self {
        match err {
            ToolkitError::InvalidArgument(msg) => Self::ToolValidation(msg),
            other => Self::ToolExecution(other.to_string()),
        }
    }
}
