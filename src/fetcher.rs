use std::time::Duration;

use reqwest::Url;
use tracing::{debug, instrument};

use crate::fetch_error::FetchError;

/// Downloads weather.gov forecast pages.
#[derive(Clone)]
pub struct ForecastFetcher {
    client: reqwest::Client,
    base_url: Option<String>,
}

impl ForecastFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self {
            client: reqwest::Client::builder().timeout(timeout).build()?,
            base_url: None,
        })
    }

    /// Send requests to `base_url` instead of the origin in each forecast
    /// URL, keeping its path and query. Used for mirrors and test servers.
    pub fn with_base_url(timeout: Duration, base_url: String) -> Result<Self, FetchError> {
        Ok(Self {
            base_url: Some(base_url.trim_end_matches('/').to_string()),
            ..Self::new(timeout)?
        })
    }

    fn request_url(&self, url: &str) -> Result<String, FetchError> {
        let Some(base) = &self.base_url else {
            return Ok(url.to_string());
        };

        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;
        Ok(match parsed.query() {
            Some(query) => format!("{base}{}?{query}", parsed.path()),
            None => format!("{base}{}", parsed.path()),
        })
    }

    /// Fetch the forecast page once and return its HTML.
    #[instrument(skip(self))]
    pub async fn fetch_document(&self, url: &str) -> Result<String, FetchError> {
        let request_url = self.request_url(url)?;
        debug!("Sending HTTP request to {}", request_url);
        let response = self.client.get(&request_url).send().await?;
        debug!("Received HTTP response with status: {}", response.status());

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let html = response.text().await?;
        debug!("Retrieved HTML content, size: {} bytes", html.len());
        Ok(html)
    }
}
