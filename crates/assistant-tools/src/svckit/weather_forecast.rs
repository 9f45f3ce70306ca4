//! Weather Forecast Tool
//!
//! Current conditions and the multi-day forecast for a location.

use std::sync::Arc;

use agent_core::{
    Result as CoreResult, Tool, ToolSchema,
    tool::{ToolArguments, string_arg},
};
use async_trait::async_trait;
use serde_json::{Value, json};

use crate::model::TemperatureUnit;
use crate::weather::WeatherClient;

pub struct WeatherForecastTool {
    weather: Arc<dyn WeatherClient>,
}

impl WeatherForecastTool {
    pub fn new(weather: Arc<dyn WeatherClient>) -> Self {
        Self { weather }
    }
}

#[async_trait]
impl Tool for WeatherForecastTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_location_current_and_forecast_weather".into(),
            description: "Get the current weather and the upcoming forecast for a location".into(),
            parameters: super::weather_parameters(),
        }
    }

    async fn execute(&self, args: &ToolArguments) -> CoreResult<Value> {
        let location = string_arg(args, "location")?;
        let unit = TemperatureUnit::from_arg(string_arg(args, "format")?);

        let report = self.weather.forecast(location).await?.report(unit)?;

        Ok(json!({
            "location": location,
            "weather": report,
        }))
    }
}
