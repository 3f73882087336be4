use crate::config::types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.allowed_roots.is_empty() {
        return Err(ConfigError::Validation(
            "allowed_roots must contain at least one URL prefix".to_string(),
        ));
    }

    for root in &config.allowed_roots {
        let url = Url::parse(root).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid allowed root '{}': {}", root, e))
        })?;

        if url.scheme() != "https" {
            // Canonical URLs are always https, so an http root can never match
            return Err(ConfigError::Validation(format!(
                "Allowed root '{}' must use HTTPS scheme",
                root
            )));
        }
    }

    validate_extension(&config.special_extension)?;

    if config.request_timeout_secs < 1 || config.request_timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be between 1 and 300, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.header.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent header cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    let names = [
        ("special_dir", &config.special_dir),
        ("page_dir", &config.page_dir),
        ("discovered_log", &config.discovered_log),
        ("edges_log", &config.edges_log),
        ("crawled_log", &config.crawled_log),
    ];

    for (field, value) in names {
        if value.is_empty() {
            return Err(ConfigError::Validation(format!(
                "{} cannot be empty",
                field
            )));
        }
    }

    if config.special_dir == config.page_dir {
        return Err(ConfigError::Validation(format!(
            "special_dir and page_dir must differ, both are '{}'",
            config.page_dir
        )));
    }

    Ok(())
}

/// Validates the special extension: a dot followed by at least one character
fn validate_extension(extension: &str) -> Result<(), ConfigError> {
    match extension.strip_prefix('.') {
        Some(rest) if !rest.is_empty() && !rest.contains('/') => Ok(()),
        _ => Err(ConfigError::Validation(format!(
            "special_extension must look like '.ext', got '{}'",
            extension
        ))),
    }
}
