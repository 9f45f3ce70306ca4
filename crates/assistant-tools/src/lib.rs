//! # assistant-tools
//!
//! Business tools for the tool-calling assistant: weather lookups, monthly
//! revenue, and the current date, time and host location.
//!
//! ## Tools
//!
//! | Name                                        | Backed by           |
//! |---------------------------------------------|---------------------|
//! | `get_location_current_and_forecast_weather` | `WeatherClient`     |
//! | `get_current_weather`                       | `WeatherClient`     |
//! | `get_revenue_by_month_and_year`             | `RevenueStore`      |
//! | `get_current_location_date_time`            | `GeoLocator`, clock |
//!
//! The same `RevenueStore` also backs the quarterly revenue endpoint through
//! [`revenue::quarterly_revenue`].

pub mod error;
pub mod geo;
pub mod model;
pub mod revenue;
pub mod svckit;
pub mod weather;

use std::sync::Arc;

use agent_core::ToolRegistry;

pub use error::{Result, ToolkitError};
pub use geo::{GeoLocator, IpApiLocator};
pub use model::{DateTimeLocation, GeoLocation, Quarter, Revenue, TemperatureUnit, WeatherReport};
pub use revenue::{MemoryRevenueStore, RevenueStore, quarterly_revenue, seed_revenue};
pub use weather::{WeatherClient, WttrClient};

/// Re-export tools for easy registration
pub mod tools {
    pub use crate::svckit::{
        CurrentDateTimeLocationTool, CurrentWeatherTool, RevenueLookupTool, WeatherForecastTool,
    };
}

/// Backends the tools run against
#[derive(Clone)]
pub struct ToolBackends {
    pub revenue: Arc<dyn RevenueStore>,
    pub weather: Arc<dyn WeatherClient>,
    pub locator: Arc<dyn GeoLocator>,
}

/// Register every assistant tool, in the order they are advertised
pub fn register_tools(registry: &mut ToolRegistry, backends: &ToolBackends) {
    registry.register(tools::WeatherForecastTool::new(backends.weather.clone()));
    registry.register(tools::CurrentWeatherTool::new(backends.weather.clone()));
    registry.register(tools::RevenueLookupTool::new(backends.revenue.clone()));
    registry.register(tools::CurrentDateTimeLocationTool::new(backends.locator.clone()));
}
