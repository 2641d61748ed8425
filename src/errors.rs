// src/errors.rs
use thiserror::Error;

/// Boxed-error alias for top-level plumbing (main, CLI).
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("too many redirects")]
    TooManyRedirects,

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Machine-readable kind for API responses and export rows.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Timeout => "timeout",
            FetchError::HttpStatus(_) => "http_status",
            FetchError::TooManyRedirects => "too_many_redirects",
            FetchError::Connection(_) => "connection",
            FetchError::InvalidUrl(_) => "malformed_url",
        }
    }
}

#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("geocoding quota exceeded")]
    QuotaExceeded,

    #[error("geocoding API key missing or rejected")]
    InvalidKey,

    #[error("geocoding request failed: {0}")]
    Network(String),

    #[error("geocoding provider error: {0}")]
    Provider(String),
}

impl EnrichmentError {
    pub fn kind(&self) -> &'static str {
        match self {
            EnrichmentError::QuotaExceeded => "quota_exceeded",
            EnrichmentError::InvalidKey => "invalid_key",
            EnrichmentError::Network(_) => "network",
            EnrichmentError::Provider(_) => "provider",
        }
    }
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("malformed URL: {0}")]
    MalformedUrl(String),

    #[error("company list is empty")]
    EmptyBatch,

    #[error("invalid roster: {0}")]
    InvalidRoster(String),
}

impl ValidationError {
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MissingField(_) => "missing_field",
            ValidationError::MalformedUrl(_) => "malformed_url",
            ValidationError::EmptyBatch => "empty_batch",
            ValidationError::InvalidRoster(_) => "invalid_csv",
        }
    }
}
