use std::collections::HashMap;
use std::path::Path;

use regex::Regex;
use tracing::{debug, instrument};

#[derive(Debug, thiserror::Error)]
pub enum ZipCodeError {
    #[error("No zip code entered.")]
    NoZipCode,
    #[error("Invalid zip code format.")]
    InvalidFormat,
    #[error("Zip code not found.")]
    NotFound,
    #[error("No data available for {0}.")]
    NoData(String),
    #[error("Invalid URL for that zip code.")]
    InvalidUrl,
    #[error("Failed to read zip code table: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse zip code table: {0}")]
    Json(#[from] serde_json::Error),
}

impl ZipCodeError {
    /// Format problems mean the user should simply try typing again.
    pub fn is_input_error(&self) -> bool {
        matches!(self, ZipCodeError::NoZipCode | ZipCodeError::InvalidFormat)
    }
}

/// Zip code to weather.gov forecast page lookup table.
#[derive(Debug, Clone)]
pub struct ZipCodeTable {
    urls: HashMap<String, String>,
    zip_pattern: Regex,
    url_pattern: Regex,
}

impl ZipCodeTable {
    pub fn new(urls: HashMap<String, String>) -> Self {
        Self {
            urls,
            zip_pattern: Regex::new(r"^\d{5}$").expect("zip code pattern is valid"),
            url_pattern: Regex::new(
                r"^https?://forecast\.weather\.gov/MapClick\.php\?lat=(-?\d+\.\d+)&lon=(-?\d+\.\d+)(&FcstType=text&unit=1)?$",
            )
            .expect("forecast URL pattern is valid"),
        }
    }

    /// Parse a JSON object of `"zip": "url"` entries.
    pub fn from_json_str(json: &str) -> Result<Self, ZipCodeError> {
        let urls: HashMap<String, String> = serde_json::from_str(json)?;
        Ok(Self::new(urls))
    }

    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, ZipCodeError> {
        let json = std::fs::read_to_string(path)?;
        let table = Self::from_json_str(&json)?;
        debug!("Loaded {} zip code entries", table.len());
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Resolve a zip code to its forecast page URL, validating both.
    pub fn lookup(&self, zip_code: &str) -> Result<&str, ZipCodeError> {
        let zip_code = zip_code.trim();
        if zip_code.is_empty() {
            return Err(ZipCodeError::NoZipCode);
        }
        if !self.zip_pattern.is_match(zip_code) {
            return Err(ZipCodeError::InvalidFormat);
        }

        let url = self.urls.get(zip_code).ok_or(ZipCodeError::NotFound)?;
        if url.is_empty() {
            return Err(ZipCodeError::NoData(zip_code.to_string()));
        }
        if !self.url_pattern.is_match(url) {
            return Err(ZipCodeError::InvalidUrl);
        }

        Ok(url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"{
        "10001": "https://forecast.weather.gov/MapClick.php?lat=40.7484&lon=-73.9967",
        "85001": "https://forecast.weather.gov/MapClick.php?lat=33.4484&lon=-112.074&FcstType=text&unit=1",
        "00501": "",
        "99999": "https://example.com/forecast"
    }"#;

    fn table() -> ZipCodeTable {
        ZipCodeTable::from_json_str(TABLE).unwrap()
    }

    #[test]
    fn test_lookup_known_zip() {
        assert_eq!(
            table().lookup("10001").unwrap(),
            "https://forecast.weather.gov/MapClick.php?lat=40.7484&lon=-73.9967"
        );
    }

    #[test]
    fn test_lookup_accepts_text_format_suffix() {
        assert!(table().lookup(" 85001 ").is_ok());
    }

    #[test]
    fn test_lookup_empty_input() {
        let err = table().lookup("").unwrap_err();
        assert!(matches!(err, ZipCodeError::NoZipCode));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_lookup_bad_format() {
        for input in ["1234", "123456", "abcde", "1000a"] {
            let err = table().lookup(input).unwrap_err();
            assert!(matches!(err, ZipCodeError::InvalidFormat), "input {input}");
        }
    }

    #[test]
    fn test_lookup_unknown_zip() {
        let err = table().lookup("12345").unwrap_err();
        assert!(matches!(err, ZipCodeError::NotFound));
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_lookup_zip_without_data() {
        let err = table().lookup("00501").unwrap_err();
        assert_eq!(err.to_string(), "No data available for 00501.");
    }

    #[test]
    fn test_lookup_rejects_foreign_url() {
        let err = table().lookup("99999").unwrap_err();
        assert!(matches!(err, ZipCodeError::InvalidUrl));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, TABLE.as_bytes()).unwrap();

        let table = ZipCodeTable::load(file.path()).unwrap();
        assert_eq!(table.len(), 4);
        assert!(table.lookup("10001").is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let result = ZipCodeTable::load(Path::new("/nonexistent/zip_codes.json"));
        assert!(matches!(result, Err(ZipCodeError::Io(_))));
    }

    #[test]
    fn test_bundled_table_urls_are_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/zip_codes_forecast_urls.json");
        let table = ZipCodeTable::load(&path).unwrap();
        assert!(!table.is_empty());

        for zip_code in table.urls.keys() {
            match table.lookup(zip_code) {
                Ok(_) | Err(ZipCodeError::NoData(_)) => {}
                Err(e) => panic!("{zip_code}: {e}"),
            }
        }
    }

    #[test]
    fn test_from_json_str_rejects_non_object() {
        assert!(matches!(
            ZipCodeTable::from_json_str("[1, 2]"),
            Err(ZipCodeError::Json(_))
        ));
    }
}
