//! Weather Integration
//!
//! The `WeatherClient` trait and the wttr.in response format it speaks.

mod wttr;

pub use wttr::WttrClient;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{Result, ToolkitError};
use crate::model::{CurrentCondition, ForecastDay, TemperatureUnit, WeatherReport};

/// Weather lookups by free-form location ("San Francisco, CA")
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Current conditions plus the multi-day forecast
    async fn forecast(&self, location: &str) -> Result<WttrResponse>;

    /// One-line plain-text summary of the current weather
    async fn current_summary(&self, location: &str) -> Result<String>;
}

/// wttr.in `?format=j1` body, reduced to the fields the tools use
#[derive(Clone, Debug, Default, Deserialize)]
pub struct WttrResponse {
    #[serde(default)]
    pub current_condition: Vec<WttrCondition>,

    #[serde(default)]
    pub weather: Vec<WttrDay>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WttrCondition {
    #[serde(rename = "FeelsLikeC", default)]
    pub feels_like_c: String,

    #[serde(rename = "FeelsLikeF", default)]
    pub feels_like_f: String,

    #[serde(rename = "temp_C", default)]
    pub temp_c: String,

    #[serde(rename = "temp_F", default)]
    pub temp_f: String,

    #[serde(rename = "weatherDesc", default)]
    pub weather_desc: Vec<WttrText>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WttrText {
    #[serde(default)]
    pub value: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WttrDay {
    #[serde(default)]
    pub date: String,

    #[serde(rename = "maxtempC", default)]
    pub max_temp_c: String,

    #[serde(rename = "maxtempF", default)]
    pub max_temp_f: String,

    #[serde(rename = "mintempC", default)]
    pub min_temp_c: String,

    #[serde(rename = "mintempF", default)]
    pub min_temp_f: String,

    #[serde(rename = "totalSnow_cm", default)]
    pub total_snow_cm: String,

    #[serde(rename = "uvIndex", default)]
    pub uv_index: String,
}

impl WttrResponse {
    /// Condense into a report with temperatures in `unit`
    pub fn report(&self, unit: TemperatureUnit) -> Result<WeatherReport> {
        let current = self
            .current_condition
            .first()
            .ok_or_else(|| ToolkitError::Weather("response has no current conditions".into()))?;

        let (feels_like, temperature) = match unit {
            TemperatureUnit::Celsius => (&current.feels_like_c, &current.temp_c),
            TemperatureUnit::Fahrenheit => (&current.feels_like_f, &current.temp_f),
        };

        let forecast = self
            .weather
            .iter()
            .map(|day| {
                let (max_temp, min_temp) = match unit {
                    TemperatureUnit::Celsius => (&day.max_temp_c, &day.min_temp_c),
                    TemperatureUnit::Fahrenheit => (&day.max_temp_f, &day.min_temp_f),
                };
                ForecastDay {
                    date: day.date.clone(),
                    max_temp: max_temp.clone(),
                    min_temp: min_temp.clone(),
                    total_snow_cm: day.total_snow_cm.clone(),
                    uv_index: day.uv_index.clone(),
                }
            })
            .collect();

        Ok(WeatherReport {
            current_condition: CurrentCondition {
                feels_like: feels_like.clone(),
                temperature: temperature.clone(),
                weather_description: current
                    .weather_desc
                    .first()
                    .map(|d| d.value.clone())
                    .unwrap_or_default(),
            },
            forecast,
        })
    }
}
