use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration.
///
/// Field names match the keys of the historical `config.json` file, so the
/// same struct serves JSON files, TOML files and `BOT_`-prefixed environment
/// variables.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Backend account used for the login call.
    pub username: String,
    pub password: String,
    /// Backend root URL (e.g., "https://files.example.com/").
    pub base_url: String,
    /// Search endpoint prefix; the user identifier is appended verbatim.
    pub search_url: String,
    /// Backend directory that receives offline downloads.
    pub offline_download_dir: String,
    /// Telegram bot token.
    pub telegram_token: String,
    /// Login request timeout in seconds (default: 10)
    #[serde(default = "default_auth_timeout")]
    pub auth_timeout_secs: u64,
    /// Search request timeout in seconds (default: 10)
    #[serde(default = "default_search_timeout")]
    pub search_timeout_secs: u64,
    /// Submission request timeout in seconds (default: 15)
    #[serde(default = "default_submit_timeout")]
    pub submit_timeout_secs: u64,
    /// Refresh request timeout in seconds (default: 10)
    #[serde(default = "default_refresh_timeout")]
    pub refresh_timeout_secs: u64,
}

fn default_auth_timeout() -> u64 {
    10
}

fn default_search_timeout() -> u64 {
    10
}

fn default_submit_timeout() -> u64 {
    15
}

fn default_refresh_timeout() -> u64 {
    10
}

impl Config {
    /// Join `base_url` and an API path with exactly one slash between them.
    pub fn base_endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn auth_timeout(&self) -> Duration {
        Duration::from_secs(self.auth_timeout_secs)
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }

    pub fn submit_timeout(&self) -> Duration {
        Duration::from_secs(self.submit_timeout_secs)
    }

    pub fn refresh_timeout(&self) -> Duration {
        Duration::from_secs(self.refresh_timeout_secs)
    }
}

/// Sanitized config for logging (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub username: String,
    pub password_configured: bool,
    pub base_url: String,
    pub search_url: String,
    pub offline_download_dir: String,
    pub telegram_token_configured: bool,
    pub auth_timeout_secs: u64,
    pub search_timeout_secs: u64,
    pub submit_timeout_secs: u64,
    pub refresh_timeout_secs: u64,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            username: config.username.clone(),
            password_configured: !config.password.is_empty(),
            base_url: config.base_url.clone(),
            search_url: config.search_url.clone(),
            offline_download_dir: config.offline_download_dir.clone(),
            telegram_token_configured: !config.telegram_token.is_empty(),
            auth_timeout_secs: config.auth_timeout_secs,
            search_timeout_secs: config.search_timeout_secs,
            submit_timeout_secs: config.submit_timeout_secs,
            refresh_timeout_secs: config.refresh_timeout_secs,
        }
    }
}
