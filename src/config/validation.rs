use crate::config::types::{
    BatchConfig, Config, CrawlerConfig, ServerConfig, UserAgentConfig, VerifierConfig,
};
use crate::ConfigError;
use std::net::IpAddr;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_server_config(&config.server)?;
    validate_crawler_config(&config.crawler)?;
    validate_verifier_config(&config.verifier)?;
    validate_batch_config(&config.batch)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates listener configuration
fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    config.bind_address.parse::<IpAddr>().map_err(|e| {
        ConfigError::Validation(format!(
            "bind_address must be an IP address, got '{}': {}",
            config.bind_address, e
        ))
    })?;

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.default_max_pages < 1 {
        return Err(ConfigError::Validation(
            "default_max_pages must be >= 1".to_string(),
        ));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "crawler request_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.max_redirects > 20 {
        return Err(ConfigError::Validation(format!(
            "max_redirects must be <= 20, got {}",
            config.max_redirects
        )));
    }

    Ok(())
}

/// Validates verifier configuration
fn validate_verifier_config(config: &VerifierConfig) -> Result<(), ConfigError> {
    if config.concurrency < 1 || config.concurrency > 100 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and 100, got {}",
            config.concurrency
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "verifier request_timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates batch configuration
fn validate_batch_config(config: &BatchConfig) -> Result<(), ConfigError> {
    if config.sub_budget < 1 {
        return Err(ConfigError::Validation(
            "sub_budget must be >= 1".to_string(),
        ));
    }

    if config.step_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "step_timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates request identification headers
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.browser.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent browser cannot be empty".to_string(),
        ));
    }

    Ok(())
}
