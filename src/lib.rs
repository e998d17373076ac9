pub mod config;
pub mod converter;
pub mod extractor;
pub mod fetch_error;
pub mod fetcher;
pub mod output;
pub mod services;
pub mod session;
pub mod temp_scale;
pub mod zip_codes;
