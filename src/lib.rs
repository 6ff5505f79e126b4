//! Krisha-Scout: a polite real-estate listing scraper
//!
//! This crate walks the paginated listing catalog of a classifieds site,
//! extracts one flat record per ad card and writes the collected records to a
//! semicolon-delimited CSV file for downstream analysis.

pub mod config;
pub mod crawler;
pub mod logging;
pub mod output;
pub mod prompt;
pub mod record;
pub mod state;
pub mod url;

use std::fmt;
use thiserror::Error;

/// Main error type for Krisha-Scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Fetch(#[from] FetchError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlState,
        to: state::CrawlState,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid CSS selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// Failure to retrieve one catalog page
#[derive(Debug, Error)]
#[error("Failed to fetch page {page}: {kind}")]
pub struct FetchError {
    /// Page number that was being requested
    pub page: u32,

    /// What went wrong
    pub kind: FetchErrorKind,
}

/// Underlying cause of a [`FetchError`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// The request did not complete within the configured timeout
    Timeout,

    /// The connection could not be established
    Connect(String),

    /// The server answered with a non-success status
    Status(u16),

    /// Any other transport failure
    Transport(String),

    /// The response body could not be read
    Body(String),
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "request timed out"),
            Self::Connect(e) => write!(f, "connection failed: {}", e),
            Self::Status(code) => write!(f, "HTTP status {}", code),
            Self::Transport(e) => write!(f, "transport error: {}", e),
            Self::Body(e) => write!(f, "failed to read body: {}", e),
        }
    }
}

/// A listing fragment that cannot be processed at all
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("listing fragment is empty")]
    EmptyFragment,

    #[error("fragment does not contain a listing card")]
    NotAListingCard,
}

/// Record sink errors
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for Krisha-Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for output operations
pub type OutputResult<T> = std::result::Result<T, OutputError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::Coordinator;
pub use record::ListingRecord;
pub use state::CrawlState;
