//! Application configuration management.
//!
//! The only setting is the API base URL. It is resolved from the
//! `STOCKTAKE_API_URL` environment variable, then from
//! `~/.config/stocktake/config.json`, then falls back to the local default.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Application name used for config/cache directory paths
const APP_NAME: &str = "stocktake";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Where the inventory API listens unless told otherwise
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "STOCKTAKE_API_URL";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    pub api_base_url: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for log files
    pub fn log_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Base URL of the inventory API, without a trailing slash
    pub fn api_base_url(&self) -> String {
        resolve_base_url(
            std::env::var(API_URL_ENV).ok().as_deref(),
            self.api_base_url.as_deref(),
        )
    }
}

fn resolve_base_url(from_env: Option<&str>, from_file: Option<&str>) -> String {
    [from_env, from_file]
        .into_iter()
        .flatten()
        .map(|url| url.trim().trim_end_matches('/'))
        .find(|url| !url.is_empty())
        .unwrap_or(DEFAULT_API_BASE_URL)
        .to_string()
}
