use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::{self, SyncError};
use crate::locator::{
    LocatorOptions, LocatorSettings, SeekThreshold, DEFAULT_LARGE_SEEK_SECONDS,
    DEFAULT_STICKY_TOLERANCE_SECONDS,
};
use crate::timeline::{MergeOptions, DEFAULT_PAUSE_THRESHOLD_SECONDS};

/// Tunables for merging and playback tracking, loadable from JSON
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SyncConfig {
    #[serde(default = "default_pause_threshold", alias = "pauseThresholdSeconds")]
    pub pause_threshold_seconds: f64,
    #[serde(default = "default_large_seek", alias = "largeSeekSeconds")]
    pub large_seek_seconds: f64,
    #[serde(default = "default_sticky_tolerance", alias = "stickyToleranceSeconds")]
    pub sticky_tolerance_seconds: f64,
}

fn default_pause_threshold() -> f64 {
    DEFAULT_PAUSE_THRESHOLD_SECONDS
}
fn default_large_seek() -> f64 {
    DEFAULT_LARGE_SEEK_SECONDS
}
fn default_sticky_tolerance() -> f64 {
    DEFAULT_STICKY_TOLERANCE_SECONDS
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            pause_threshold_seconds: DEFAULT_PAUSE_THRESHOLD_SECONDS,
            large_seek_seconds: DEFAULT_LARGE_SEEK_SECONDS,
            sticky_tolerance_seconds: DEFAULT_STICKY_TOLERANCE_SECONDS,
        }
    }
}

impl SyncConfig {
    /// Read and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {:?}", path))?;
        let config: Self = serde_json::from_str(&data)
            .with_context(|| format!("failed to parse config file {:?}", path))?;
        config
            .validate()
            .with_context(|| format!("invalid config file {:?}", path))?;
        Ok(config)
    }

    /// File config when a path is given, defaults otherwise
    pub fn from_override(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(custom) => Self::load(custom),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> error::Result<()> {
        if !self.pause_threshold_seconds.is_finite() || self.pause_threshold_seconds <= 0.0 {
            return Err(SyncError::new(format!(
                "pause threshold must be a positive number of seconds, got {}",
                self.pause_threshold_seconds
            )));
        }
        self.locator_settings().map(|_| ())
    }

    pub fn merge_options(&self) -> MergeOptions {
        MergeOptions::with_pause_threshold(self.pause_threshold_seconds)
    }

    pub fn locator_settings(&self) -> error::Result<LocatorSettings> {
        Ok(LocatorSettings {
            options: LocatorOptions::with_sticky_tolerance(self.sticky_tolerance_seconds)?,
            seek: SeekThreshold::new(self.large_seek_seconds)?,
        })
    }
}
