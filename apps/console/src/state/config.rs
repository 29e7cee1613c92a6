//! # Console Configuration
//!
//! Settings for the customer API connection and the add-customer form.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     PATRON_API_URL=http://localhost:3000                               │
//! │     PATRON_REQUEST_TIMEOUT_SECS=10                                     │
//! │     PATRON_FEEDBACK_DELAY_MS=500                                       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/patron/patron.toml (Linux)                               │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [api]
//! base_url = "http://localhost:3000"
//! request_timeout_secs = 10
//!
//! [form]
//! feedback_delay_ms = 500
//! ```
//!
//! Read-only after startup, so no lock is needed.

use std::path::{Path, PathBuf};
use std::time::Duration;

use patron_api::ClientConfig;
use patron_core::INVALID_FEEDBACK_DELAY_MS;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

// =============================================================================
// API Settings
// =============================================================================

/// Where the customer API lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Origin the `/api/customers` path is resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout. Unset means wait indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

// =============================================================================
// Form Settings
// =============================================================================

/// Add-customer form behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSettings {
    /// How long the invalid-submission cue stays raised (milliseconds).
    #[serde(default = "default_feedback_delay")]
    pub feedback_delay_ms: u64,
}

fn default_feedback_delay() -> u64 {
    INVALID_FEEDBACK_DELAY_MS
}

impl Default for FormSettings {
    fn default() -> Self {
        FormSettings {
            feedback_delay_ms: default_feedback_delay(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete console configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatronConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub form: FormSettings,
}

impl PatronConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`patron.toml`)
    /// 3. Environment variables
    ///
    /// An explicitly given path that does not exist is an error; a missing
    /// default file is not.
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                config = Self::read_file(&path)?;
            } else if explicit {
                return Err(AppError::ConfigLoadFailed(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.finish()
    }

    /// Builds a configuration from defaults and environment only.
    ///
    /// Used by `patron init` to produce the file it then saves.
    pub fn from_env() -> AppResult<Self> {
        Self::default().finish()
    }

    fn finish(mut self) -> AppResult<Self> {
        self.apply_env_overrides();
        self.validate()?;
        Ok(self)
    }

    fn read_file(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file, creating the parent directory.
    pub fn save(&self, config_path: Option<PathBuf>) -> AppResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| AppError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| AppError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        let url = &self.api.base_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(AppError::InvalidConfig(format!(
                "API base URL must start with http:// or https://, got: {}",
                url
            )));
        }

        if self.api.request_timeout_secs == Some(0) {
            return Err(AppError::InvalidConfig(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }

        if self.form.feedback_delay_ms == 0 {
            return Err(AppError::InvalidConfig(
                "feedback_delay_ms must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `PATRON_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides from an arbitrary lookup; unparseable numbers are
    /// logged and ignored.
    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("PATRON_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(timeout) = lookup("PATRON_REQUEST_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.api.request_timeout_secs = Some(secs),
                Err(_) => warn!(value = %timeout, "Ignoring invalid PATRON_REQUEST_TIMEOUT_SECS"),
            }
        }

        if let Some(delay) = lookup("PATRON_FEEDBACK_DELAY_MS") {
            match delay.parse::<u64>() {
                Ok(ms) => self.form.feedback_delay_ms = ms,
                Err(_) => warn!(value = %delay, "Ignoring invalid PATRON_FEEDBACK_DELAY_MS"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "patron", "console")
            .map(|dirs| dirs.config_dir().join("patron.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Builds the HTTP client settings.
    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(self.api.base_url.clone());
        match self.api.request_timeout_secs {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }

    /// Returns how long the invalid-submission cue stays raised.
    pub fn feedback_delay(&self) -> Duration {
        Duration::from_millis(self.form.feedback_delay_ms)
    }
}
