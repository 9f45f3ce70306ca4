//! Current Date/Time Tool
//!
//! Local date and time, plus the host's approximate location when it can be
//! resolved.

use std::sync::Arc;

use agent_core::{Result as CoreResult, Tool, ToolSchema, tool::ToolArguments};
use async_trait::async_trait;
use chrono::Local;
use serde_json::Value;

use crate::geo::GeoLocator;
use crate::model::DateTimeLocation;

pub struct CurrentDateTimeLocationTool {
    locator: Arc<dyn GeoLocator>,
}

impl CurrentDateTimeLocationTool {
    pub fn new(locator: Arc<dyn GeoLocator>) -> Self {
        Self { locator }
    }
}

#[async_trait]
impl Tool for CurrentDateTimeLocationTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_current_location_date_time".into(),
            description: "Get the current date, time and location".into(),
            parameters: vec![],
        }
    }

    async fn execute(&self, _args: &ToolArguments) -> CoreResult<Value> {
        let now = Local::now();
        tracing::debug!(offset = %now.offset(), "Reading local clock");

        // location is best effort
        let location = match self.locator.locate().await {
            Ok(location) => Some(location),
            Err(e) => {
                tracing::warn!(error = %e, "Geolocation failed, omitting location");
                None
            }
        };

        Ok(serde_json::to_value(DateTimeLocation {
            date: now.format("%Y-%m-%d").to_string(),
            time: now.format("%H:%M:%S").to_string(),
            location,
        })?)
    }
}
