//! Revenue Storage
//!
//! Monthly revenue lookups and the quarterly roll-up built on top of them.

mod memory;

pub use memory::MemoryRevenueStore;

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::Result;
use crate::model::{Quarter, Revenue};

/// Monthly revenue store
///
/// Implementations return `ToolkitError::RevenueNotFound` for a month with no
/// record, and any other error for a failed lookup.
#[async_trait]
pub trait RevenueStore: Send + Sync {
    /// Revenue for one month
    async fn revenue_by_month_year(&self, month: u32, year: i32) -> Result<Revenue>;

    /// Insert or replace records keyed by `(month, year)`
    async fn upsert(&self, records: &[Revenue]) -> Result<()>;

    /// Store name for logging
    fn name(&self) -> &str;
}

/// Sum a quarter's three months; months with no record count as zero
pub async fn quarterly_revenue(
    store: &dyn RevenueStore,
    quarter: Quarter,
    year: i32,
) -> Result<Decimal> {
    let mut total = Decimal::ZERO;

    for month in quarter.months() {
        match store.revenue_by_month_year(month, year).await {
            Ok(revenue) => total += revenue.amount,
            Err(e) if e.is_not_found() => {
                tracing::debug!(month, year, "No revenue recorded, counting as zero");
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!(%quarter, year, %total, "Computed quarterly revenue");
    Ok(total)
}

/// Sample revenue for the first half of 2023
pub fn seed_revenue() -> Vec<Revenue> {
    vec![
        Revenue::new(1, 2023, dec!(1000.00)),
        Revenue::new(2, 2023, dec!(1500.00)),
        Revenue::new(3, 2023, dec!(2000.00)),
        Revenue::new(4, 2023, dec!(2500.00)),
        Revenue::new(5, 2023, dec!(3000.00)),
        Revenue::new(6, 2023, dec!(3500.00)),
    ]
}
