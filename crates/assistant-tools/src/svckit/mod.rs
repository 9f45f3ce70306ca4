//! Service Kit - Agent Tools
//!
//! Tools implementing `agent_core::Tool` on top of the revenue store and the
//! weather and geolocation clients.

mod current_datetime;
mod current_weather;
mod revenue_lookup;
mod weather_forecast;

pub use current_datetime::CurrentDateTimeLocationTool;
pub use current_weather::CurrentWeatherTool;
pub use revenue_lookup::RevenueLookupTool;
pub use weather_forecast::WeatherForecastTool;

use agent_core::tool::ParameterSchema;

/// Parameters shared by both weather tools
fn weather_parameters() -> Vec<ParameterSchema> {
    vec![
        ParameterSchema::required(
            "location",
            "string",
            "The location to get the weather for, e.g. San Francisco, CA",
        ),
        ParameterSchema::required(
            "format",
            "string",
            "The temperature unit to use, 'celsius' or 'fahrenheit'",
        )
        .with_enum(["celsius", "fahrenheit"]),
    ]
}
