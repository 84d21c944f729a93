//! Sci-Worm: a crawler and scraper for scientific article listings
//!
//! This crate implements a breadth-first link-following crawler with keyword
//! bookmarking, parsers that turn CiteULike and Google Scholar result pages into
//! typed [`Article`] records, and a similarity-based matcher that picks the best
//! record for a reference article.

pub mod article;
pub mod config;
pub mod crawler;
pub mod matcher;
pub mod scrape;
pub mod state;

use thiserror::Error;

/// Main error type for Sci-Worm operations
#[derive(Debug, Error)]
pub enum WormError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Connection to {url} can't be established (status {status})")]
    Connectivity { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid CSS selector: {0}")]
    Selector(String),
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

    #[error("Invalid header in config: {0}")]
    InvalidHeader(String),
}

/// Result type alias for Sci-Worm operations
pub type Result<T> = std::result::Result<T, WormError>;

// Re-export commonly used types
pub use article::{Article, ScholarLinks};
pub use config::Config;
pub use state::CrawlState;
