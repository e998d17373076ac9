use std::fmt;

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use tracing::{debug, error, instrument, warn};

use crate::fetch_error::FetchError;

/// One forecast period: its short label ("Tonight") and the narrative text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayForecast {
    pub period_label: String,
    pub narrative: String,
}

impl fmt::Display for DayForecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.period_label, self.narrative)
    }
}

/// Structural markers identifying the forecast on a weather.gov page.
#[derive(Debug, Clone)]
pub struct ExtractorMarkers {
    /// `id` of the element holding the period labels
    pub container_id: String,
    /// Selector for period labels, applied inside the container
    pub label_selector: String,
    /// Substring of the `class` attribute of narrative blocks
    pub narrative_class: String,
}

impl Default for ExtractorMarkers {
    fn default() -> Self {
        Self {
            container_id: "detailed-forecast-body".to_string(),
            label_selector: "b".to_string(),
            narrative_class: "forecast-text".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ForecastExtractor {
    container: Selector,
    label: Selector,
    narrative: Selector,
}

impl Default for ForecastExtractor {
    fn default() -> Self {
        Self::with_markers(&ExtractorMarkers::default())
            .expect("default forecast markers form valid selectors")
    }
}

impl ForecastExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_markers(markers: &ExtractorMarkers) -> Result<Self, FetchError> {
        let parse = |css: String| {
            Selector::parse(&css).map_err(|e| FetchError::InvalidSelector(format!("{css}: {e}")))
        };

        Ok(Self {
            container: parse(format!("[id=\"{}\"]", markers.container_id))?,
            label: parse(markers.label_selector.clone())?,
            narrative: parse(format!("div[class*=\"{}\"]", markers.narrative_class))?,
        })
    }

    /// Extract the period/narrative pairs from a forecast page.
    ///
    /// Labels come from inside the forecast container, narratives from the
    /// whole document. Both lists are reversed before pairing, so the
    /// period listed first on the page ends up last and prints next to the
    /// prompt.
    #[instrument(skip(self, html), fields(html_size = html.len()))]
    pub fn extract(&self, html: &str) -> Result<Vec<DayForecast>, FetchError> {
        debug!("Parsing forecast HTML document");
        let document = Html::parse_document(html);

        let container = document.select(&self.container).next().ok_or_else(|| {
            error!("Forecast container not found in HTML");
            debug!(
                "HTML preview (first 500 chars): {}",
                &html.chars().take(500).collect::<String>()
            );
            FetchError::StructureNotFound("Forecast body not found for that zip code.")
        })?;

        let mut labels: Vec<String> = container.select(&self.label).map(element_text).collect();
        if labels.is_empty() {
            return Err(FetchError::StructureNotFound(
                "Forecast days not found for that zip code.",
            ));
        }

        let mut narratives: Vec<String> =
            document.select(&self.narrative).map(element_text).collect();
        if narratives.is_empty() {
            return Err(FetchError::StructureNotFound(
                "Forecast text not found for that zip code.",
            ));
        }

        if labels.len() != narratives.len() {
            warn!(
                "Found {} period labels but {} narratives, pairing the {} latest periods",
                labels.len(),
                narratives.len(),
                labels.len().min(narratives.len())
            );
        }

        labels.reverse();
        narratives.reverse();

        let forecasts: Vec<DayForecast> = labels
            .into_iter()
            .zip(narratives)
            .map(|(period_label, narrative)| DayForecast {
                period_label,
                narrative,
            })
            .collect();

        debug!("Extracted {} forecast periods", forecasts.len());
        Ok(forecasts)
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
