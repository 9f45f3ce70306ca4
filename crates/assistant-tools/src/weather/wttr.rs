//! wttr.in client

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::{WeatherClient, WttrResponse};
use crate::error::{Result, ToolkitError};

pub const DEFAULT_WTTR_URL: &str = "https://wttr.in";

/// Structured JSON variant
const FORMAT_JSON: &str = "j1";

/// Plain-text "feels like" variant
const FORMAT_PLAIN: &str = "%f";

pub struct WttrClient {
    client: Client,
    base_url: String,
}

impl Default for WttrClient {
    fn default() -> Self {
        Self::new(DEFAULT_WTTR_URL)
    }
}

impl WttrClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::var("WEATHER_BASE_URL").unwrap_or_else(|_| DEFAULT_WTTR_URL.into()))
    }

    /// `<base>/<location>?format=<format>`, with the location percent-encoded
    fn url(&self, location: &str, format: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ToolkitError::Weather(format!("invalid base URL: {e}")))?;

        url.path_segments_mut()
            .map_err(|()| ToolkitError::Weather("base URL cannot take a path".into()))?
            .pop_if_empty()
            .push(location);
        url.query_pairs_mut().append_pair("format", format);

        Ok(url)
    }
}

#[async_trait]
impl WeatherClient for WttrClient {
    async fn forecast(&self, location: &str) -> Result<WttrResponse> {
        let url = self.url(location, FORMAT_JSON)?;
        tracing::info!(%location, "Fetching weather forecast");

        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.json::<WttrResponse>().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to decode weather response");
            ToolkitError::Weather(format!("invalid weather response: {e}"))
        })?;

        Ok(body)
    }

    async fn current_summary(&self, location: &str) -> Result<String> {
        let url = self.url(location, FORMAT_PLAIN)?;
        tracing::info!(%location, "Fetching current weather");

        let text = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(text.trim().to_owned())
    }
}
