#![allow(dead_code)]

use std::time::Duration;

use forecast_command::converter::UnitConverter;
use forecast_command::extractor::ForecastExtractor;
use forecast_command::fetcher::ForecastFetcher;
use forecast_command::services::ForecastService;
use forecast_command::zip_codes::ZipCodeTable;

/// Trimmed copy of a weather.gov MapClick page for Denver, CO
pub const FORECAST_PAGE: &str = include_str!("fixtures/forecast_page.html");

pub const DENVER_URL: &str = "https://forecast.weather.gov/MapClick.php?lat=39.7530&lon=-104.9990";

pub fn zip_table() -> ZipCodeTable {
    ZipCodeTable::from_json_str(&format!(
        r#"{{ "80202": "{DENVER_URL}", "00501": "" }}"#
    ))
    .expect("Failed to build test zip code table")
}

/// Service whose requests go to `base_url` (usually a mockito server)
pub fn service_for(base_url: String) -> ForecastService {
    let fetcher = ForecastFetcher::with_base_url(Duration::from_secs(5), base_url)
        .expect("Failed to create HTTP client");
    ForecastService::new(fetcher, ForecastExtractor::new(), UnitConverter::new())
}

pub const DENVER_CELSIUS: [&str; 5] = [
    "Wednesday Night: Mostly clear, with a low around -8.",
    "Wednesday: Sunny, with a high near 5. Calm wind becoming south 8 to 11 km/h in the afternoon.",
    "Tuesday Night: Partly cloudy, with a low around -20. Light and variable wind.",
    "Tuesday: Snow likely before 11 a.m. Cloudy, with a high near -1. Wind chill values as low as -9. \
     Northeast wind around 24 km/h, with gusts as high as 40 km/h. Chance of precipitation is 60%. \
     New snow accumulation of 3 to 8 centimeters possible.",
    "Tonight: A 30 percent chance of snow after 1 a.m. Mostly cloudy, with a low around -5. \
     North wind 8 to 16 km/h. New snow accumulation of less than 1 centimeter possible.",
];

pub const DENVER_FAHRENHEIT: [&str; 5] = [
    "Wednesday Night: Mostly clear, with a low around 18.",
    "Wednesday: Sunny, with a high near 41. Calm wind becoming south 5 to 7 mph in the afternoon.",
    "Tuesday Night: Partly cloudy, with a low around -4. Light and variable wind.",
    "Tuesday: Snow likely before 11 a.m. Cloudy, with a high near 30. Wind chill values as low as 15. \
     Northeast wind around 15 mph, with gusts as high as 25 mph. Chance of precipitation is 60%. \
     New snow accumulation of 1 to 3 inches possible.",
    "Tonight: A 30 percent chance of snow after 1 a.m. Mostly cloudy, with a low around 23. \
     North wind 5 to 10 mph. New snow accumulation of less than a half inch possible.",
];
