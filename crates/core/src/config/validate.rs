use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Required strings are non-empty
/// - Backend and search URLs use http(s)
/// - Timeouts are not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let required = [
        ("username", &config.username),
        ("password", &config.password),
        ("base_url", &config.base_url),
        ("search_url", &config.search_url),
        ("offline_download_dir", &config.offline_download_dir),
        ("telegram_token", &config.telegram_token),
    ];
    for (key, value) in required {
        if value.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!("{} cannot be empty", key)));
        }
    }

    for (key, url) in [("base_url", &config.base_url), ("search_url", &config.search_url)] {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "{} must start with http:// or https://",
                key
            )));
        }
    }

    let timeouts = [
        ("auth_timeout_secs", config.auth_timeout_secs),
        ("search_timeout_secs", config.search_timeout_secs),
        ("submit_timeout_secs", config.submit_timeout_secs),
        ("refresh_timeout_secs", config.refresh_timeout_secs),
    ];
    for (key, secs) in timeouts {
        if secs == 0 {
            return Err(ConfigError::ValidationError(format!("{} cannot be 0", key)));
        }
    }

    Ok(())
}
