//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment variable overriding the submission endpoint
pub const SUBMIT_URL_ENV: &str = "ENROLLMENT_SUBMIT_URL";

/// Endpoint used when neither the environment nor the config file sets one
pub const DEFAULT_SUBMIT_URL: &str = "http://localhost:5000/api/submit";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Enrollment submission endpoint
    pub submit_url: Option<String>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "enrollment", "enrollment-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: TuiConfig = serde_json::from_str(&content)?;
                tracing::debug!("Loaded config from {}", path.display());
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Submission endpoint: environment, then config file, then default
    pub fn submit_url(&self) -> String {
        self.resolve_submit_url(std::env::var(SUBMIT_URL_ENV).ok())
    }

    fn resolve_submit_url(&self, env_value: Option<String>) -> String {
        env_value
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.submit_url.clone())
            .unwrap_or_else(|| DEFAULT_SUBMIT_URL.to_string())
    }
}
