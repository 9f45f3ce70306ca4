//! Current Weather Tool

use std::sync::Arc;

use agent_core::{
    Result as CoreResult, Tool, ToolSchema,
    tool::{ToolArguments, string_arg},
};
use async_trait::async_trait;
use serde_json::{Value, json};

use crate::weather::WeatherClient;

/// One-line current weather via the plain-text wttr.in format
pub struct CurrentWeatherTool {
    weather: Arc<dyn WeatherClient>,
}

impl CurrentWeatherTool {
    pub fn new(weather: Arc<dyn WeatherClient>) -> Self {
        Self { weather }
    }
}

#[async_trait]
impl Tool for CurrentWeatherTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_current_weather".into(),
            description: "Get the current weather for a location".into(),
            parameters: super::weather_parameters(),
        }
    }

    async fn execute(&self, args: &ToolArguments) -> CoreResult<Value> {
        let location = string_arg(args, "location")?;
        let format = string_arg(args, "format")?;

        let summary = self.weather.current_summary(location).await?;

        let weather =
            format!("Current weather for location {location} in format {format} is {summary}");
        Ok(json!({ "weather": weather }))
    }
}
