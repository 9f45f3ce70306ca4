//! In-memory revenue store

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use super::RevenueStore;
use crate::error::{Result, ToolkitError};
use crate::model::Revenue;

/// Revenue store backed by a map keyed on `(month, year)`
#[derive(Default)]
pub struct MemoryRevenueStore {
    records: RwLock<HashMap<(u32, i32), Decimal>>,
}

impl MemoryRevenueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RevenueStore for MemoryRevenueStore {
    async fn revenue_by_month_year(&self, month: u32, year: i32) -> Result<Revenue> {
        let records = self.records.read().await;

        records
            .get(&(month, year))
            .map(|amount| Revenue::new(month, year, *amount))
            .ok_or(ToolkitError::RevenueNotFound { month, year })
    }

    async fn upsert(&self, records: &[Revenue]) -> Result<()> {
        let mut map = self.records.write().await;
        for record in records {
            map.insert((record.month, record.year), record.amount);
        }

        tracing::debug!(count = records.len(), "Upserted revenue records");
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
