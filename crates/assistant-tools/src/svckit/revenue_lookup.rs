//! Revenue Lookup Tool
//!
//! Monthly revenue from the configured `RevenueStore`.

use std::sync::Arc;

use agent_core::{
    Result as CoreResult, Tool, ToolSchema,
    tool::{ParameterSchema, ToolArguments, integer_arg},
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use crate::error::ToolkitError;
use crate::revenue::RevenueStore;

#[derive(Serialize)]
struct MonthlyRevenue {
    month: u32,
    year: i32,
    #[serde(with = "rust_decimal::serde::float")]
    revenue: Decimal,
}

pub struct RevenueLookupTool {
    store: Arc<dyn RevenueStore>,
}

impl RevenueLookupTool {
    pub fn new(store: Arc<dyn RevenueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for RevenueLookupTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_revenue_by_month_and_year".into(),
            description: "Get the revenue by month and year".into(),
            parameters: vec![
                ParameterSchema::required(
                    "month",
                    "integer",
                    "The month to get the revenue for, e.g. 1 for January, 2 for February",
                ),
                ParameterSchema::required(
                    "year",
                    "integer",
                    "The year to get the revenue for, e.g. 2023",
                ),
            ],
        }
    }

    async fn execute(&self, args: &ToolArguments) -> CoreResult<Value> {
        let month = integer_arg(args, "month")?;
        let year = integer_arg(args, "year")?;
        tracing::info!(month, year, store = self.store.name(), "Looking up revenue");

        let month = u32::try_from(month)
            .map_err(|_| ToolkitError::InvalidArgument(format!("month out of range: {month}")))?;
        let year = i32::try_from(year)
            .map_err(|_| ToolkitError::InvalidArgument(format!("year out of range: {year}")))?;

        let revenue = self.store.revenue_by_month_year(month, year).await?;

        Ok(serde_json::to_value(MonthlyRevenue {
            month,
            year,
            revenue: revenue.amount,
        })?)
    }
}
