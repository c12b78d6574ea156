//! Sync configuration loaded from environment variables.
//!
//! Values are read once at startup into [`Config`] and passed down
//! explicitly; nothing else in the crate touches the environment.

use crate::services::sync::SyncMode;
use std::env;
use std::path::PathBuf;

/// Default location of the activity store, read by the site build.
pub const DEFAULT_OUTPUT_PATH: &str = "views/_data/strava.json";

pub const DEFAULT_TOKEN_URL: &str = "https://www.strava.com/oauth/token";
pub const DEFAULT_API_BASE_URL: &str = "https://www.strava.com/api/v3";

/// Largest page Strava will return for the activity list.
pub const MAX_PER_PAGE: u32 = 200;

/// Sync configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Secrets ---
    /// Strava OAuth client ID
    pub strava_client_id: String,
    /// Strava OAuth client secret
    pub strava_client_secret: String,
    /// Long-lived refresh token for the synced athlete
    pub strava_refresh_token: String,

    // --- Tuning ---
    /// Path of the JSON activity store
    pub output_path: PathBuf,
    /// How fetched activities are merged into the store
    pub mode: SyncMode,
    /// Page size override for the batch modes
    pub per_page: Option<u32>,
    /// OAuth token endpoint
    pub token_url: String,
    /// Base URL of the REST API
    pub api_base_url: String,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            strava_client_id: "test_client_id".to_string(),
            strava_client_secret: "test_secret".to_string(),
            strava_refresh_token: "test_refresh_token".to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            mode: SyncMode::default(),
            per_page: None,
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honored for local runs.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| -> Result<String, ConfigError> {
            let value = lookup(key).ok_or(ConfigError::Missing(key))?;
            let value = value.trim();
            if value.is_empty() {
                return Err(ConfigError::Empty(key));
            }
            Ok(value.to_string())
        };
        let optional = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mode = match optional("STRAVA_SYNC_MODE") {
            Some(raw) => raw.parse::<SyncMode>().map_err(|_| ConfigError::Invalid {
                key: "STRAVA_SYNC_MODE",
                value: raw,
            })?,
            None => SyncMode::default(),
        };

        let per_page = match optional("STRAVA_SYNC_PER_PAGE") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if (1..=MAX_PER_PAGE).contains(&n) => Some(n),
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "STRAVA_SYNC_PER_PAGE",
                        value: raw,
                    })
                }
            },
            None => None,
        };

        Ok(Self {
            strava_client_id: required("STRAVA_CLIENT_ID")?,
            strava_client_secret: required("STRAVA_CLIENT_SECRET")?,
            strava_refresh_token: required("STRAVA_REFRESH_TOKEN")?,
            output_path: optional("STRAVA_SYNC_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH)),
            mode,
            per_page,
            token_url: optional("STRAVA_TOKEN_URL")
                .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            api_base_url: optional("STRAVA_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
        })
    }

    /// Page size actually requested from Strava for the configured mode.
    pub fn page_size(&self) -> u32 {
        match self.mode {
            SyncMode::AppendDedupOne => 1,
            mode => self.per_page.unwrap_or_else(|| mode.default_page_size()),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Environment variable is empty: {0}")]
    Empty(&'static str),

    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn secrets() -> Vec<(&'static str, &'static str)> {
        vec![
            ("STRAVA_CLIENT_ID", "test_id"),
            ("STRAVA_CLIENT_SECRET", " test_secret\n"),
            ("STRAVA_REFRESH_TOKEN", "test_refresh"),
        ]
    }

    #[test]
    fn test_config_from_vars_defaults() {
        let env = vars(&secrets());
        let config = Config::from_vars(|k| env.get(k).cloned()).expect("Config should load");

        assert_eq!(config.strava_client_id, "test_id");
        assert_eq!(config.strava_client_secret, "test_secret");
        assert_eq!(config.strava_refresh_token, "test_refresh");
        assert_eq!(config.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
        assert_eq!(config.mode, SyncMode::AppendDedupMany);
        assert_eq!(config.page_size(), 10);
        assert_eq!(config.token_url, DEFAULT_TOKEN_URL);
    }

    #[test]
    fn test_missing_secret() {
        let env = vars(&secrets()[..2]);
        let err = Config::from_vars(|k| env.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("STRAVA_REFRESH_TOKEN")));
    }

    #[test]
    fn test_blank_secret_rejected() {
        let mut pairs = secrets();
        pairs[0] = ("STRAVA_CLIENT_ID", "   ");
        let env = vars(&pairs);
        let err = Config::from_vars(|k| env.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::Empty("STRAVA_CLIENT_ID")));
    }

    #[test]
    fn test_mode_and_page_size() {
        let mut pairs = secrets();
        pairs.push(("STRAVA_SYNC_MODE", "append-dedup-one"));
        pairs.push(("STRAVA_SYNC_PER_PAGE", "50"));
        let env = vars(&pairs);
        let config = Config::from_vars(|k| env.get(k).cloned()).unwrap();

        assert_eq!(config.mode, SyncMode::AppendDedupOne);
        // Single-activity mode always asks for one record
        assert_eq!(config.page_size(), 1);
    }

    #[test]
    fn test_per_page_override_for_batch_mode() {
        let mut pairs = secrets();
        pairs.push(("STRAVA_SYNC_MODE", "overwrite-all"));
        pairs.push(("STRAVA_SYNC_PER_PAGE", "30"));
        let env = vars(&pairs);
        let config = Config::from_vars(|k| env.get(k).cloned()).unwrap();

        assert_eq!(config.mode, SyncMode::OverwriteAll);
        assert_eq!(config.page_size(), 30);
    }

    #[test]
    fn test_invalid_per_page() {
        for bad in ["0", "201", "ten"] {
            let mut pairs = secrets();
            pairs.push(("STRAVA_SYNC_PER_PAGE", bad));
            let env = vars(&pairs);
            let err = Config::from_vars(|k| env.get(k).cloned()).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { key: "STRAVA_SYNC_PER_PAGE", .. }),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_invalid_mode() {
        let mut pairs = secrets();
        pairs.push(("STRAVA_SYNC_MODE", "merge-everything"));
        let env = vars(&pairs);
        let err = Config::from_vars(|k| env.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "STRAVA_SYNC_MODE", .. }));
    }

    #[test]
    fn test_api_base_url_trailing_slash() {
        let mut pairs = secrets();
        pairs.push(("STRAVA_API_BASE_URL", "http://localhost:9000/api/v3/"));
        let env = vars(&pairs);
        let config = Config::from_vars(|k| env.get(k).cloned()).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:9000/api/v3");
    }
}
