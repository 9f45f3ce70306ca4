//! Host Geolocation

mod ip_api;

pub use ip_api::IpApiLocator;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::GeoLocation;

/// Resolves where this process is running
#[async_trait]
pub trait GeoLocator: Send + Sync {
    async fn locate(&self) -> Result<GeoLocation>;
}
