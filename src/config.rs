use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::temp_scale::TempScale;

#[derive(Debug, Clone)]
pub struct Config {
    pub zip_codes_file: PathBuf,
    pub request_timeout_secs: u64,
    pub base_url: Option<String>,
    pub wrap_width: Option<usize>,
    pub default_scale: Option<TempScale>,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            zip_codes_file: env::var("FORECAST_ZIP_CODES_FILE")
                .unwrap_or_else(|_| "data/zip_codes_forecast_urls.json".to_string())
                .into(),
            request_timeout_secs: env::var("FORECAST_REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            base_url: env::var("FORECAST_BASE_URL").ok().filter(|s| !s.is_empty()),
            wrap_width: env::var("FORECAST_WRAP_WIDTH")
                .ok()
                .and_then(|s| s.parse().ok()),
            default_scale: env::var("FORECAST_TEMP_SCALE")
                .ok()
                .and_then(|s| s.parse().ok()),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
