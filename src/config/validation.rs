use crate::config::types::{Config, FetcherConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetcher_config(&config.fetcher)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.max_retries < 1 {
        return Err(ConfigError::Validation(format!(
            "max_retries must be >= 1, got {}",
            config.max_retries
        )));
    }

    if config.probe_timeout_seconds < 1 {
        return Err(ConfigError::Validation(
            "probe_timeout_seconds must be >= 1".to_string(),
        ));
    }

    if config.robots_timeout_seconds < 1 {
        return Err(ConfigError::Validation(
            "robots_timeout_seconds must be >= 1".to_string(),
        ));
    }

    if config.request_timeout_seconds < 1 {
        return Err(ConfigError::Validation(
            "request_timeout_seconds must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_seconds < 1 {
        return Err(ConfigError::Validation(
            "connect_timeout_seconds must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate bot name: non-empty, alphanumeric + hyphens only
    if config.bot_name.is_empty() {
        return Err(ConfigError::Validation(
            "bot_name cannot be empty".to_string(),
        ));
    }

    if !config
        .bot_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "bot_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.bot_name
        )));
    }

    // Validate contact URL
    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    Ok(())
}
