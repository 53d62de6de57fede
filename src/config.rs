//! Configuration handling for the TUI

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Fallback API base URL when neither the environment nor the config file sets one
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/api";

/// Environment variable overriding the configured API base URL
pub const API_URL_ENV: &str = "SIGNUP_API_URL";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_RETRY_ATTEMPTS: u32 = 2;
const DEFAULT_RETRY_DELAY_MS: u64 = 3000;
const DEFAULT_REDIRECT_DELAY_MS: u64 = 1200;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Base URL of the backend API (e.g. `https://example.com/api`)
    pub api_url: Option<String>,
    /// Per-request timeout in seconds
    pub request_timeout_secs: Option<u64>,
    /// How many times a timed-out registration is retried
    pub retry_attempts: Option<u32>,
    /// Pause between timed-out attempts, in milliseconds
    pub retry_delay_ms: Option<u64>,
    /// Pause between a successful registration and the login redirect
    pub redirect_delay_ms: Option<u64>,
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration, writing a template with every key on first run
    pub fn load_or_init() -> Result<Self> {
        let config = Self::load()?;
        if let Some(path) = Self::config_path() {
            if !path.exists() {
                if let Err(err) = config.save_to(&path) {
                    tracing::warn!("Failed to write config template: {err}");
                }
            }
        }
        Ok(config)
    }

    /// Load configuration from `path`; a missing file means defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to `path` as pretty JSON
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Resolve the API base URL: environment first, then file, then default.
    /// A trailing slash is always stripped.
    pub fn api_url(&self) -> String {
        let env = std::env::var(API_URL_ENV).ok();
        resolve_api_url(env.as_deref(), self.api_url.as_deref())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn retry_attempts(&self) -> u32 {
        self.retry_attempts.unwrap_or(DEFAULT_RETRY_ATTEMPTS)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms.unwrap_or(DEFAULT_RETRY_DELAY_MS))
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(
            self.redirect_delay_ms
                .unwrap_or(DEFAULT_REDIRECT_DELAY_MS),
        )
    }
}

/// Project directories shared by the config, session and log files
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "signup", "signup-tui")
}

fn resolve_api_url(env: Option<&str>, configured: Option<&str>) -> String {
    let raw = env
        .filter(|v| !v.trim().is_empty())
        .or(configured.filter(|v| !v.trim().is_empty()))
        .unwrap_or(DEFAULT_API_URL);
    raw.trim().trim_end_matches('/').to_string()
}
