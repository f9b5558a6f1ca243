//! Carte: a polite fetcher for restaurant menu pages
//!
//! This crate fetches menu content (HTML or PDF) from third-party sites,
//! respecting robots.txt, per-host rate limits, and retry etiquette.
//! It fetches exactly one URL per call; link-following, HTML parsing and
//! persistence are left to the caller.

pub mod config;
pub mod fetch;
pub mod limiter;
pub mod robots;

use thiserror::Error;

/// Main error type for fetch operations
///
/// The public `Option`-returning API collapses all of these to `None`;
/// the `try_` variants expose them for callers that want the reason.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL not accessible: {url}")]
    Inaccessible { url: String },

    #[error("Robots.txt disallows scraping: {url}")]
    RobotsDisallowed { url: String },

    #[error("All {attempts} fetch attempts failed for {url}: {last_error}")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        last_error: String,
    },

    #[error("Unexpected HTTP status {status} for {url}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("URL has no host: {url}")]
    MissingHost { url: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

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
}

/// Result type alias for fetch operations
pub type Result<T> = std::result::Result<T, FetchError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use fetch::{Fetcher, MenuContent};
pub use limiter::RateLimiter;
