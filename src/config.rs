//! Feed configuration: built-in defaults, an optional YAML file, and CLI
//! overrides, applied in that order.
//!
//! ```yaml
//! url: https://thehackernews.com
//! interval_minutes: 30
//! channel_capacity: 7
//! cycle_timeout_secs: 120   # 0 disables the cycle timeout
//! request_timeout_secs: 30
//! json_output_dir: ./json
//! ```

use crate::cli::Cli;
use crate::error::ConfigError;
use crate::pipeline::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Largest accepted hand-off channel capacity.
pub const MAX_CHANNEL_CAPACITY: usize = 4096;
/// Largest accepted interval between cycles: one week.
pub const MAX_INTERVAL_MINUTES: u64 = 7 * 24 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeedConfig {
    pub url: String,
    pub interval_minutes: u64,
    pub channel_capacity: usize,
    pub cycle_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub json_output_dir: Option<String>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        let pipeline = PipelineConfig::default();
        Self {
            url: pipeline.url,
            interval_minutes: pipeline.interval.as_secs() / 60,
            channel_capacity: pipeline.channel_capacity,
            cycle_timeout_secs: pipeline.cycle_timeout.map_or(0, |d| d.as_secs()),
            request_timeout_secs: 30,
            json_output_dir: None,
        }
    }
}

impl FeedConfig {
    /// Read a YAML config file. Missing keys keep their defaults.
    #[instrument(level = "info")]
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        let config = Self::from_yaml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })?;
        debug!(?config, "Loaded config file");
        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        // an empty file is a valid, all-defaults config
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    /// Overlay the options given on the command line.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(url) = &cli.url {
            self.url = url.clone();
        }
        if let Some(minutes) = cli.interval_minutes {
            self.interval_minutes = minutes;
        }
        if let Some(capacity) = cli.channel_capacity {
            self.channel_capacity = capacity;
        }
        if let Some(secs) = cli.cycle_timeout_secs {
            self.cycle_timeout_secs = secs;
        }
        if let Some(secs) = cli.request_timeout_secs {
            self.request_timeout_secs = secs;
        }
        if let Some(dir) = &cli.json_output_dir {
            self.json_output_dir = Some(dir.clone());
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.url)
            .map_err(|e| ConfigError::Invalid(format!("url {:?}: {e}", self.url)))?;
        if !(1..=MAX_CHANNEL_CAPACITY).contains(&self.channel_capacity) {
            return Err(ConfigError::Invalid(format!(
                "channel_capacity must be between 1 and {MAX_CHANNEL_CAPACITY}"
            )));
        }
        if !(1..=MAX_INTERVAL_MINUTES).contains(&self.interval_minutes) {
            return Err(ConfigError::Invalid(format!(
                "interval_minutes must be between 1 and {MAX_INTERVAL_MINUTES}"
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("request_timeout_secs must be at least 1".into()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn pipeline(&self) -> PipelineConfig {
        PipelineConfig {
            url: self.url.clone(),
            channel_capacity: self.channel_capacity,
            interval: Duration::from_secs(self.interval_minutes.saturating_mul(60)),
            cycle_timeout: (self.cycle_timeout_secs > 0)
                .then(|| Duration::from_secs(self.cycle_timeout_secs)),
        }
    }
}
