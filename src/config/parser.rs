use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads, parses and validates a TOML configuration file
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use sci_worm::config::load_config;
///
/// let config = load_config(Path::new("sci-worm.toml")).unwrap();
/// println!("Visit limit: {}", config.crawler.visit_limit);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Hex-encoded SHA-256 of the configuration file content
///
/// Logged at startup so a run can be traced back to the exact file it used.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(content_hash(&content))
}

/// Loads a configuration and hashes the same content in one read
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok((config, content_hash(&content)))
}

fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    tracing::debug!(
        "Parsed configuration: {} seeds, {} keywords",
        config.crawler.seeds.len(),
        config.crawler.keywords.len()
    );
    Ok(config)
}

fn content_hash(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}
