//! Client settings and their on-disk persistence.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use trendscope_fetch::{FetchError, HttpTransport, RetryPolicy};

/// Default endpoint host.
pub const DEFAULT_BASE_URL: &str = "https://trends.google.com";

// ============================================================================
// Settings Error
// ============================================================================

/// Error type for loading and saving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Settings
// ============================================================================

/// Settings for the trends client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendsSettings {
    /// Scheme and host of the endpoint.
    pub base_url: String,
    /// Interface language (`hl`).
    pub hl: String,
    /// Timezone offset in minutes (`tz`).
    pub tz: i32,
    /// Default region for trending calls.
    pub geo: String,
    /// Window for real-time trends, in hours.
    pub realtime_hours: u32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// User agent override.
    pub user_agent: Option<String>,
    /// Retry policy for rate-limited calls.
    pub retry: RetryPolicy,
}

impl Default for TrendsSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            hl: "en-US".to_string(),
            tz: 360,
            geo: "US".to_string(),
            realtime_hours: 4,
            timeout_secs: 30,
            user_agent: None,
            retry: RetryPolicy::default(),
        }
    }
}

impl TrendsSettings {
    /// Sets the endpoint base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the interface language.
    pub fn with_hl(mut self, hl: impl Into<String>) -> Self {
        self.hl = hl.into();
        self
    }

    /// Sets the default region.
    pub fn with_geo(mut self, geo: impl Into<String>) -> Self {
        self.geo = geo.into();
        self
    }

    /// Sets the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Builds the HTTP transport these settings describe.
    pub fn build_transport(&self) -> Result<HttpTransport, FetchError> {
        let transport = match &self.user_agent {
            Some(ua) => HttpTransport::with_options(self.timeout(), ua)?,
            None => HttpTransport::with_timeout(self.timeout())?,
        };
        Ok(transport.with_retry_policy(self.retry))
    }

    /// Loads settings from `path`, falling back to defaults if the file
    /// does not exist.
    pub async fn load(path: &Path) -> Result<Self, SettingsError> {
        match tokio::fs::read_to_string(path).await {
            Ok(contents) => {
                let settings = serde_json::from_str(&contents)?;
                debug!(path = %path.display(), "Loaded settings");
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No settings file, using defaults");
                Ok(Self::default())
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read settings");
                Err(e.into())
            }
        }
    }

    /// Saves settings to `path`, creating parent directories.
    pub async fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json).await?;
        debug!(path = %path.display(), "Saved settings");
        Ok(())
    }
}

// ============================================================================
// Default Paths
// ============================================================================

/// Returns the default configuration directory.
///
/// - Linux: `~/.config/trendscope`
/// - macOS: `~/Library/Application Support/trendscope`
/// - Windows: `%APPDATA%\trendscope`
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|c| c.join("trendscope"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the default settings file path.
pub fn default_settings_path() -> PathBuf {
    default_config_dir().join("settings.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_missing_file_returns_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = TrendsSettings::load(&temp_dir.path().join("missing.json"))
            .await
            .unwrap();
        assert_eq!(settings, TrendsSettings::default());
    }

    #[tokio::test]
    async fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("settings.json");

        let settings = TrendsSettings::default()
            .with_geo("DE")
            .with_hl("de")
            .with_retry(RetryPolicy::new(5));
        settings.save(&path).await.unwrap();

        let loaded = TrendsSettings::load(&path).await.unwrap();
        assert_eq!(loaded, settings);
    }

    #[tokio::test]
    async fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        tokio::fs::write(&path, r#"{"geo": "GB", "retry": {"max_retries": 1}}"#)
            .await
            .unwrap();

        let loaded = TrendsSettings::load(&path).await.unwrap();
        assert_eq!(loaded.geo, "GB");
        assert_eq!(loaded.hl, "en-US");
        assert_eq!(loaded.retry.max_retries, 1);
        assert_eq!(loaded.retry.base_delay_ms, 750);
    }

    #[tokio::test]
    async fn test_invalid_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        tokio::fs::write(&path, "not json").await.unwrap();

        assert!(matches!(
            TrendsSettings::load(&path).await,
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn test_default_path_ends_with_settings_file() {
        assert!(default_settings_path().ends_with("trendscope/settings.json"));
    }
}
