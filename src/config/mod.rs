//! Configuration module for Sci-Worm
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use sci_worm::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawler will visit at most {} sites", config.crawler.visit_limit);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CiteULikeConfig, Config, CrawlerConfig, HttpConfig, ReferenceConfig, ScholarConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
