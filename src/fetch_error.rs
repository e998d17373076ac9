#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Forecast page returned HTTP status {0}")]
    HttpStatus(u16),
    #[error("Invalid forecast URL: {0}")]
    InvalidUrl(String),
    #[error("Invalid forecast selector: {0}")]
    InvalidSelector(String),
    #[error("{0}")]
    StructureNotFound(&'static str),
}

impl FetchError {
    /// Message shown to the person at the prompt.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Request(e) if e.is_timeout() => {
                "The request timed out. Please try again.".to_string()
            }
            FetchError::Request(e) if e.is_connect() => {
                "No internet connection. Please try again.".to_string()
            }
            FetchError::StructureNotFound(detail) => format!("HTML element not found: {detail}"),
            other => format!("An unexpected error occurred: {other}"),
        }
    }
}
