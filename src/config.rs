//! Configuration-file loading.
//!
//! Credentials and endpoint settings live in an `ads.toml` file, loaded once
//! at startup:
//!
//! ```toml
//! endpoint = "https://ads.example.com/api/v201806"
//! developer_token = "INSERT_DEVELOPER_TOKEN_HERE"
//! client_customer_id = "123-456-7890"
//!
//! [oauth2]
//! client_id = "INSERT_CLIENT_ID_HERE"
//! client_secret = "INSERT_CLIENT_SECRET_HERE"
//! refresh_token = "INSERT_REFRESH_TOKEN_HERE"
//! # Obtained out of band; token refresh is the platform's job.
//! access_token = "INSERT_ACCESS_TOKEN_HERE"
//! ```
//!
//! A missing file, unreadable file, or missing required field is a fatal
//! [`ConfigError`]; no remote call is attempted after one.

use std::fs;
use std::path::Path;

use serde::Deserialize;

/// File name probed when no explicit path is given.
pub const DEFAULT_CONFIG_FILENAME: &str = "ads.toml";

/// Environment variable overriding the configuration file path.
pub const CONFIG_PATH_ENV: &str = "ADS_CONFIG_FILE";

#[derive(Debug, thiserror::Error)]
/// Failure to load or parse the configuration file.
pub enum ConfigError {
    #[error("failed to read configuration file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Deserialize)]
/// Settings for one account/endpoint, as read from `ads.toml`.
pub struct ApiConfig {
    pub endpoint: String,
    pub developer_token: String,
    pub client_customer_id: String,
    pub oauth2: OAuth2Config,
}

#[derive(Debug, Clone, Deserialize)]
/// OAuth2 credential material.
///
/// `access_token` is optional in the file: it is produced from the refresh
/// token by external OAuth2 tooling, not by this crate.
pub struct OAuth2Config {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    #[serde(default)]
    pub access_token: Option<String>,
}

impl ApiConfig {
    /// Load configuration from `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load from the path in [`CONFIG_PATH_ENV`], falling back to
    /// [`DEFAULT_CONFIG_FILENAME`] in the working directory.
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILENAME.to_owned());
        Self::from_path(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
        endpoint = "https://ads.example.invalid/api"
        developer_token = "tok"
        client_customer_id = "123-456-7890"

        [oauth2]
        client_id = "app.example"
        client_secret = "s3cret"
        refresh_token = "1//refresh"
    "#;

    #[test]
    fn parses_a_complete_file() {
        let config = ApiConfig::from_toml_str(FULL).unwrap();
        assert_eq!(config.endpoint, "https://ads.example.invalid/api");
        assert_eq!(config.developer_token, "tok");
        assert_eq!(config.client_customer_id, "123-456-7890");
        assert_eq!(config.oauth2.client_id, "app.example");
        assert_eq!(config.oauth2.access_token, None);
    }

    #[test]
    fn access_token_is_optional_but_read_when_present() {
        let text = FULL.replace(
            "refresh_token = \"1//refresh\"",
            "refresh_token = \"1//refresh\"\naccess_token = \"ya29.token\"",
        );
        let config = ApiConfig::from_toml_str(&text).unwrap();
        assert_eq!(config.oauth2.access_token.as_deref(), Some("ya29.token"));
    }

    #[test]
    fn missing_required_credential_field_fails_to_parse() {
        let without_refresh = r#"
            endpoint = "https://ads.example.invalid/api"
            developer_token = "tok"
            client_customer_id = "123-456-7890"

            [oauth2]
            client_id = "app.example"
            client_secret = "s3cret"
        "#;
        let err = ApiConfig::from_toml_str(without_refresh).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("refresh_token"));
    }

    #[test]
    fn malformed_toml_fails_to_parse() {
        assert!(matches!(
            ApiConfig::from_toml_str("endpoint = = nope"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = ApiConfig::from_path("/nonexistent/ads.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/ads.toml"));
    }
}
