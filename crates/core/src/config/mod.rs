//! Configuration module for the usersearch system
//!
//! Configuration can be loaded from a TOML file and/or environment
//! variables; every field has a default so an empty file (or no file at
//! all) yields a working setup.

mod defaults;
mod loading;


use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use defaults::*;

/// Returns the path to the global configuration file
///
/// The global config is stored at `~/.usersearch/config.toml`.
pub fn global_config_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| Error::config("Unable to determine home directory".to_string()))?;
    Ok(home_dir.join(".usersearch").join("config.toml"))
}

/// Configuration for the search provider
///
/// # Providers
/// - `github` (default): the public GitHub user search API
/// - `mock`: scripted in-memory provider for testing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Provider type: "github" (default), "mock"
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Base URL of the search API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Transport timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request (GitHub rejects
    /// requests without one)
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Configuration for the reactive query pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Quiet period in milliseconds before a term is committed
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Terms must be strictly longer than this many characters to
    /// trigger a search
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,

    /// Buffer capacity of the channels between pipeline stages
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

/// Main configuration structure for the usersearch system
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Search provider configuration
    #[serde(default)]
    pub search: SearchConfig,

    /// Query pipeline configuration
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_query_chars: default_min_query_chars(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        let valid_providers = ["github", "mock"];
        if !valid_providers.contains(&self.search.provider.as_str()) {
            return Err(Error::config(format!(
                "Invalid provider '{}'. Must be one of: {:?}",
                self.search.provider, valid_providers
            )));
        }

        if self.search.api_base_url.is_empty() {
            return Err(Error::config(
                "search.api_base_url must not be empty".to_string(),
            ));
        }

        if self.search.timeout_secs == 0 {
            return Err(Error::config(
                "search.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.search.timeout_secs > 300 {
            return Err(Error::config(format!(
                "search.timeout_secs too large (max 300, got {})",
                self.search.timeout_secs
            )));
        }

        if self.pipeline.debounce_ms == 0 {
            return Err(Error::config(
                "pipeline.debounce_ms must be greater than 0".to_string(),
            ));
        }
        if self.pipeline.debounce_ms > 60_000 {
            return Err(Error::config(format!(
                "pipeline.debounce_ms too large (max 60000ms, got {})",
                self.pipeline.debounce_ms
            )));
        }

        if self.pipeline.min_query_chars > 64 {
            return Err(Error::config(format!(
                "pipeline.min_query_chars too large (max 64, got {})",
                self.pipeline.min_query_chars
            )));
        }

        if self.pipeline.channel_capacity == 0 {
            return Err(Error::config(
                "pipeline.channel_capacity must be greater than 0".to_string(),
            ));
        }
        if self.pipeline.channel_capacity > 1024 {
            return Err(Error::config(format!(
                "pipeline.channel_capacity too large (max 1024, got {})",
                self.pipeline.channel_capacity
            )));
        }

        Ok(())
    }
}
