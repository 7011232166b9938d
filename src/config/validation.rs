use crate::config::types::{
    CollectorConfig, Config, OutputConfig, OutputKind, RunnerConfig, StrategyName,
    UserAgentConfig,
};
use crate::url::parse_base_url;
use crate::ConfigError;
use regex::Regex;
use url::Url;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_runner_config(&config.runner)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_collector_config(&config.collector)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Compiles a pattern from configuration
///
/// `field` names the config key in the error message.
pub fn compile_pattern(field: &str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern)
        .map_err(|e| ConfigError::InvalidPattern(format!("{} '{}': {}", field, pattern, e)))
}

/// Validates runner configuration
fn validate_runner_config(config: &RunnerConfig) -> Result<(), ConfigError> {
    if let Some(level) = &config.log_level {
        if !LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            return Err(ConfigError::Validation(format!(
                "log-level must be one of {}, got '{}'",
                LOG_LEVELS.join(", "),
                level
            )));
        }
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler-version cannot be empty".to_string(),
        ));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;

    if let Some(email) = &config.contact_email {
        validate_email(email)?;
    }

    Ok(())
}

/// Validates the collector section: URL, patterns and per-strategy options
fn validate_collector_config(config: &CollectorConfig) -> Result<(), ConfigError> {
    parse_base_url(&config.base_url)?;

    if config.target_pattern.is_empty() {
        return Err(ConfigError::Validation(
            "target-pattern cannot be empty".to_string(),
        ));
    }
    compile_pattern("target-pattern", &config.target_pattern)?;

    match config.strategy {
        StrategyName::Crawl => {
            let crawl_pattern = config.crawl_pattern.as_deref().ok_or_else(|| {
                ConfigError::Validation("crawl strategy requires a crawl-pattern".to_string())
            })?;
            compile_pattern("crawl-pattern", crawl_pattern)?;
        }
        StrategyName::Sitemap | StrategyName::RobotsTxt => {
            if config.crawl_pattern.is_some() || config.start_path.is_some() {
                tracing::warn!(
                    "crawl-pattern and start-path are ignored by the {:?} strategy",
                    config.strategy
                );
            }
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.kind == OutputKind::JsonLines
        && config.path.as_deref().map_or(true, |p| p.trim().is_empty())
    {
        return Err(ConfigError::Validation(
            "json-lines output requires a path".to_string(),
        ));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    // Domain part should contain at least one dot
    if !parts[1].contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
