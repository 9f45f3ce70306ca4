//! Domain Models
//!
//! Revenue records, calendar quarters, and the shapes the tools hand back to
//! the model. Revenue uses `rust_decimal` so stored amounts stay exact.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ToolkitError;

/// Revenue for one calendar month
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revenue {
    /// Calendar month, 1-12
    pub month: u32,

    pub year: i32,

    /// Amount in dollars
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl Revenue {
    pub const fn new(month: u32, year: i32, amount: Decimal) -> Self {
        Self { month, year, amount }
    }
}

/// Calendar quarter
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    /// The three months covered by this quarter
    pub const fn months(self) -> [u32; 3] {
        match self {
            Self::Q1 => [1, 2, 3],
            Self::Q2 => [4, 5, 6],
            Self::Q3 => [7, 8, 9],
            Self::Q4 => [10, 11, 12],
        }
    }

    pub const fn number(self) -> u8 {
        match self {
            Self::Q1 => 1,
            Self::Q2 => 2,
            Self::Q3 => 3,
            Self::Q4 => 4,
        }
    }
}

impl TryFrom<i64> for Quarter {
    type Error = ToolkitError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Q1),
            2 => Ok(Self::Q2),
            3 => Ok(Self::Q3),
            4 => Ok(Self::Q4),
            other => Err(ToolkitError::InvalidQuarter(other)),
        }
    }
}

impl std::fmt::Display for Quarter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Q{}", self.number())
    }
}

/// Temperature scale requested by the caller
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// Parse a tool argument; anything but "fahrenheit" reads as Celsius
    pub fn from_arg(value: &str) -> Self {
        if value.eq_ignore_ascii_case("fahrenheit") {
            Self::Fahrenheit
        } else {
            Self::Celsius
        }
    }
}

/// Condensed weather returned to the model
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub current_condition: CurrentCondition,
    pub forecast: Vec<ForecastDay>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentCondition {
    pub feels_like: String,
    pub temperature: String,
    pub weather_description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDay {
    pub date: String,
    pub max_temp: String,
    pub min_temp: String,
    pub total_snow_cm: String,
    pub uv_index: String,
}

/// Approximate location of this host
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub country: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub city: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub timezone: String,
}

/// Result of the date/time tool
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DateTimeLocation {
    /// `YYYY-MM-DD`
    pub date: String,

    /// `HH:MM:SS`
    pub time: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoLocation>,
}
