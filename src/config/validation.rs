use crate::config::types::{
    Config, CrawlerConfig, FilterConfig, OutputConfig, ScopeConfig, UserAgentConfig,
};
use crate::url::UrlClassifier;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_scope_config(&config.scope)?;
    validate_filter_config(&config.filter)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_seed_in_scope(config)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    let seed = Url::parse(&config.seed_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", config.seed_url, e))
    })?;

    if seed.scheme() != "http" && seed.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "Seed URL '{}' must use HTTP or HTTPS",
            config.seed_url
        )));
    }

    if config.max_articles < 1 {
        return Err(ConfigError::Validation(format!(
            "max_articles must be >= 1, got {}",
            config.max_articles
        )));
    }

    if !config.delay_seconds.is_finite() || config.delay_seconds < 0.0 {
        return Err(ConfigError::Validation(format!(
            "delay_seconds must be a non-negative number, got {}",
            config.delay_seconds
        )));
    }

    if config.request_timeout_seconds < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_seconds must be >= 1, got {}",
            config.request_timeout_seconds
        )));
    }

    if config.progress_interval < 1 {
        return Err(ConfigError::Validation(format!(
            "progress_interval must be >= 1, got {}",
            config.progress_interval
        )));
    }

    Ok(())
}

/// Validates the crawl scope
fn validate_scope_config(config: &ScopeConfig) -> Result<(), ConfigError> {
    validate_domain_pattern(&config.domain)?;

    if !config.path_prefix.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "path_prefix must start with '/', got '{}'",
            config.path_prefix
        )));
    }

    Ok(())
}

/// Validates article filter rules
fn validate_filter_config(config: &FilterConfig) -> Result<(), ConfigError> {
    if config.include_suffix.is_empty() {
        return Err(ConfigError::Validation(
            "include_suffix cannot be empty".to_string(),
        ));
    }

    if matches!(&config.exclude_suffix, Some(suffix) if suffix.is_empty()) {
        return Err(ConfigError::Validation(
            "exclude_suffix cannot be empty when given".to_string(),
        ));
    }

    if config.exclude_contains.iter().any(String::is_empty) {
        return Err(ConfigError::Validation(
            "exclude_contains entries cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    validate_file_name("mapping_file", &config.mapping_file)?;
    validate_file_name("log_file", &config.log_file)?;

    if config.mapping_file == config.log_file {
        return Err(ConfigError::Validation(
            "mapping_file and log_file must differ".to_string(),
        ));
    }

    Ok(())
}

/// The seed has to pass the same scope check as every discovered link
fn validate_seed_in_scope(config: &Config) -> Result<(), ConfigError> {
    let classifier = UrlClassifier::from_config(config);
    let seed = crate::url::normalize_url(&config.crawler.seed_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL: {}", e)))?;

    if !classifier.in_scope(&seed) {
        return Err(ConfigError::Validation(format!(
            "Seed URL '{}' is outside the configured scope '{}{}'",
            config.crawler.seed_url, config.scope.domain, config.scope.path_prefix
        )));
    }

    Ok(())
}

/// A bare file name placed inside the output directory
fn validate_file_name(field: &str, name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::Validation(format!("{} cannot be empty", field)));
    }

    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(ConfigError::Validation(format!(
            "{} must be a plain file name, got '{}'",
            field, name
        )));
    }

    Ok(())
}

/// Validates a domain pattern (supports wildcards)
fn validate_domain_pattern(pattern: &str) -> Result<(), ConfigError> {
    if pattern.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain pattern cannot be empty".to_string(),
        ));
    }

    match pattern.strip_prefix("*.") {
        Some(domain) => validate_domain_string(domain),
        None => validate_domain_string(pattern),
    }
}

/// Validates a domain string (without wildcard prefix)
fn validate_domain_string(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain cannot be empty".to_string(),
        ));
    }

    if !domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot start or end with '.' or '-'",
            domain
        )));
    }

    if domain.contains("..") {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot contain consecutive dots",
            domain
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' must contain at least one dot (e.g., 'example.com')",
            domain
        )));
    }

    Ok(())
}
