//! ip-api.com client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::GeoLocator;
use crate::error::{Result, ToolkitError};
use crate::model::GeoLocation;

pub const DEFAULT_IP_API_URL: &str = "http://ip-api.com";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    country: String,
    city: String,
    lat: f64,
    lon: f64,
    timezone: String,
}

impl IpApiResponse {
    fn into_location(self) -> Result<GeoLocation> {
        if self.status != "success" {
            let reason = self.message.unwrap_or(self.status);
            return Err(ToolkitError::Geolocation(reason));
        }

        Ok(GeoLocation {
            latitude: self.lat,
            longitude: self.lon,
            country: self.country,
            city: self.city,
            timezone: self.timezone,
        })
    }
}

pub struct IpApiLocator {
    client: Client,
    base_url: String,
}

impl Default for IpApiLocator {
    fn default() -> Self {
        Self::new(DEFAULT_IP_API_URL)
    }
}

impl IpApiLocator {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::var("GEO_BASE_URL").unwrap_or_else(|_| DEFAULT_IP_API_URL.into()))
    }
}

#[async_trait]
impl GeoLocator for IpApiLocator {
    async fn locate(&self) -> Result<GeoLocation> {
        let url = format!("{}/json", self.base_url.trim_end_matches('/'));
        tracing::debug!(%url, "Looking up host location");

        let body: IpApiResponse = self.client.get(&url).send().await?.json().await?;
        let location = body.into_location()?;

        tracing::debug!(
            city = %location.city,
            country = %location.country,
            "Resolved host location"
        );
        Ok(location)
    }
}
