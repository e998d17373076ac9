use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::converter::UnitConverter;
use crate::extractor::ForecastExtractor;
use crate::fetch_error::FetchError;
use crate::fetcher::ForecastFetcher;
use crate::temp_scale::TempScale;

/// Forecast for one zip code, as printed by `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    pub zip_code: String,
    pub scale: TempScale,
    pub forecasts: Vec<String>,
}

/// Fetch, extract and convert: one page download and one parse per lookup.
#[derive(Clone)]
pub struct ForecastService {
    fetcher: ForecastFetcher,
    extractor: ForecastExtractor,
    converter: UnitConverter,
}

impl ForecastService {
    pub fn new(
        fetcher: ForecastFetcher,
        extractor: ForecastExtractor,
        converter: UnitConverter,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            converter,
        }
    }

    /// Turn an already fetched page into display-ready forecast strings.
    pub fn render(&self, html: &str, scale: TempScale) -> Result<Vec<String>, FetchError> {
        let forecasts: Vec<String> = self
            .extractor
            .extract(html)?
            .iter()
            .map(ToString::to_string)
            .collect();
        debug!("Applying {} scale to {} forecasts", scale, forecasts.len());
        Ok(self.converter.apply(forecasts, scale))
    }

    #[instrument(skip(self, scale), fields(scale = %scale))]
    pub async fn forecast(&self, url: &str, scale: TempScale) -> Result<Vec<String>, FetchError> {
        let html = self.fetcher.fetch_document(url).await?;
        let forecasts = self.render(&html, scale)?;
        info!("Rendered {} forecast periods", forecasts.len());
        Ok(forecasts)
    }
}
