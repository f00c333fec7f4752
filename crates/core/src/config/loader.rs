use figment::{
    error::Kind,
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};
use std::collections::BTreeMap;
use std::path::Path;

use super::{types::Config, ConfigError};

/// Environment variable prefix (`BOT_USERNAME`, `BOT_BASE_URL`, ...).
pub const ENV_PREFIX: &str = "BOT_";

/// Keys taken from the environment verbatim. figment would otherwise parse
/// `BOT_PASSWORD=007` as the integer 7.
const STRING_KEYS: &[&str] = &[
    "username",
    "password",
    "base_url",
    "search_url",
    "offline_download_dir",
    "telegram_token",
];

/// Load configuration from an optional file with environment variable overrides.
///
/// A `.json` file is read as JSON, anything else as TOML. The file may be
/// absent when the environment supplies every required key.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let mut figment = Figment::new();

    if path.exists() {
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        figment = if is_json {
            figment.merge(Json::file(path))
        } else {
            figment.merge(Toml::file(path))
        };
    }

    let config: Config = figment
        .merge(Env::prefixed(ENV_PREFIX).ignore(STRING_KEYS))
        .merge(Serialized::defaults(raw_string_env()))
        .extract()
        .map_err(|e| match &e.kind {
            Kind::MissingField(_) if !path.exists() => ConfigError::FileNotFound(format!(
                "{} (and environment is incomplete: {})",
                path.display(),
                e
            )),
            _ => ConfigError::ParseError(e.to_string()),
        })?;

    Ok(config)
}

/// `BOT_*` values for the string fields, unparsed.
fn raw_string_env() -> BTreeMap<String, String> {
    Env::prefixed(ENV_PREFIX)
        .only(STRING_KEYS)
        .iter()
        .map(|(key, value)| (key.as_str().to_ascii_lowercase(), value))
        .collect()
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use std::io::Write;
    use tempfile::Builder;

    const FULL_TOML: &str = r#"
username = "admin"
password = "secret"
base_url = "http://127.0.0.1:5244/"
search_url = "http://127.0.0.1:8000/search?q="
offline_download_dir = "/offline"
telegram_token = "42:token"
"#;

    #[test]
    fn test_load_config_from_str_valid() {
        let config = load_config_from_str(FULL_TOML).unwrap();
        assert_eq!(config.username, "admin");
        assert_eq!(config.offline_download_dir, "/offline");
    }

    #[test]
    fn test_load_config_from_str_missing_fields() {
        let result = load_config_from_str("username = \"admin\"\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_config_from_toml_file() {
        let mut temp_file = Builder::new().suffix(".toml").tempfile().unwrap();
        write!(temp_file, "{}", FULL_TOML).unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:5244/");
        assert_eq!(config.submit_timeout_secs, 15);
    }

    #[test]
    fn test_load_config_from_json_file() {
        let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            temp_file,
            r#"{{
                "username": "admin",
                "password": "secret",
                "base_url": "http://127.0.0.1:5244/",
                "search_url": "http://127.0.0.1:8000/search?q=",
                "offline_download_dir": "/offline",
                "telegram_token": "42:token"
            }}"#
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.telegram_token, "42:token");
    }

    #[test]
    fn test_load_config_file_not_found_without_env() {
        Jail::expect_with(|_jail| {
            let result = load_config(Path::new("/nonexistent/config.json"));
            assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
            Ok(())
        });
    }

    #[test]
    fn test_load_config_from_env_only() {
        Jail::expect_with(|jail| {
            jail.set_env("BOT_USERNAME", "env-user");
            jail.set_env("BOT_PASSWORD", "env-pass");
            jail.set_env("BOT_BASE_URL", "http://backend/");
            jail.set_env("BOT_SEARCH_URL", "http://search/?q=");
            jail.set_env("BOT_OFFLINE_DOWNLOAD_DIR", "/env-dir");
            jail.set_env("BOT_TELEGRAM_TOKEN", "1:env");
            jail.set_env("BOT_SUBMIT_TIMEOUT_SECS", "20");

            let config = load_config(Path::new("missing.json")).unwrap();
            assert_eq!(config.username, "env-user");
            assert_eq!(config.offline_download_dir, "/env-dir");
            assert_eq!(config.submit_timeout_secs, 20);
            Ok(())
        });
    }

    #[test]
    fn test_env_string_values_are_not_parsed_as_numbers() {
        Jail::expect_with(|jail| {
            jail.set_env("BOT_USERNAME", "1001");
            jail.set_env("BOT_PASSWORD", "007123");
            jail.set_env("BOT_BASE_URL", "http://backend/");
            jail.set_env("BOT_SEARCH_URL", "http://search/?q=");
            jail.set_env("BOT_OFFLINE_DOWNLOAD_DIR", "/env-dir");
            jail.set_env("BOT_TELEGRAM_TOKEN", "true");

            let config = load_config(Path::new("missing.json")).unwrap();
            assert_eq!(config.username, "1001");
            assert_eq!(config.password, "007123");
            assert_eq!(config.telegram_token, "true");
            Ok(())
        });
    }

    #[test]
    fn test_numeric_env_password_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", FULL_TOML)?;
            jail.set_env("BOT_PASSWORD", "123456");

            let config = load_config(Path::new("config.toml")).unwrap();
            assert_eq!(config.password, "123456");
            Ok(())
        });
    }

    #[test]
    fn test_bad_env_timeout_is_parse_error_without_file() {
        Jail::expect_with(|jail| {
            jail.set_env("BOT_USERNAME", "env-user");
            jail.set_env("BOT_PASSWORD", "env-pass");
            jail.set_env("BOT_BASE_URL", "http://backend/");
            jail.set_env("BOT_SEARCH_URL", "http://search/?q=");
            jail.set_env("BOT_OFFLINE_DOWNLOAD_DIR", "/env-dir");
            jail.set_env("BOT_TELEGRAM_TOKEN", "1:env");
            jail.set_env("BOT_SUBMIT_TIMEOUT_SECS", "soon");

            let result = load_config(Path::new("missing.json"));
            assert!(matches!(result, Err(ConfigError::ParseError(_))));
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", FULL_TOML)?;
            jail.set_env("BOT_OFFLINE_DOWNLOAD_DIR", "/override");

            let config = load_config(Path::new("config.toml")).unwrap();
            assert_eq!(config.offline_download_dir, "/override");
            assert_eq!(config.username, "admin");
            Ok(())
        });
    }
}
