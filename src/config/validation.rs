use crate::config::types::{CiteULikeConfig, Config, CrawlerConfig, HttpConfig, ScholarConfig};
use crate::ConfigError;
use reqwest::header::{HeaderName, HeaderValue};
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_http_config(&config.http)?;
    validate_citeulike_config(&config.citeulike)?;
    validate_scholar_config(&config.scholar)?;
    Ok(())
}

/// Validates crawler configuration
///
/// Seeds may be absent here; the search modes never crawl.
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    for seed in &config.seeds {
        Url::parse(seed).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e))
        })?;
    }

    if config.visit_limit < 1 {
        return Err(ConfigError::Validation(format!(
            "visit_limit must be >= 1, got {}",
            config.visit_limit
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "crawler timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.keywords.iter().any(|k| k.is_empty()) {
        return Err(ConfigError::Validation(
            "keywords cannot contain empty strings".to_string(),
        ));
    }

    Ok(())
}

/// Validates HTTP identification and header settings
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "http timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    for (name, value) in &config.headers {
        HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ConfigError::InvalidHeader(format!("bad header name '{}'", name)))?;
        HeaderValue::from_str(value).map_err(|_| {
            ConfigError::InvalidHeader(format!("bad value for header '{}'", name))
        })?;
    }

    Ok(())
}

fn validate_citeulike_config(config: &CiteULikeConfig) -> Result<(), ConfigError> {
    validate_base_url("citeulike", &config.base_url)?;

    if config.page_limit < 1 {
        return Err(ConfigError::Validation(format!(
            "citeulike page_limit must be >= 1, got {}",
            config.page_limit
        )));
    }

    Ok(())
}

fn validate_scholar_config(config: &ScholarConfig) -> Result<(), ConfigError> {
    validate_base_url("scholar", &config.base_url)?;

    if config.results_limit < 1 {
        return Err(ConfigError::Validation(format!(
            "scholar results_limit must be >= 1, got {}",
            config.results_limit
        )));
    }

    if config.page_stride < 1 {
        return Err(ConfigError::Validation(format!(
            "scholar page_stride must be >= 1, got {}",
            config.page_stride
        )));
    }

    Ok(())
}

/// Validates a service base URL (must be absolute http or https)
fn validate_base_url(section: &str, base_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(base_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid {} base_url '{}': {}", section, base_url, e))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "{} base_url '{}' must use http or https",
            section, base_url
        )));
    }

    Ok(())
}
