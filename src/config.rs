//! Dashboard configuration
//! Optional `dashboard.toml` in the working directory; defaults otherwise.

use crate::data::MonthKey;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const CONFIG_FILE: &str = "dashboard.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("frame_interval_secs must be positive and finite, got {0}")]
    FrameInterval(f64),
    #[error("window_size must be positive, got {0:?}")]
    WindowSize([f32; 2]),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Daily records CSV.
    pub data_path: PathBuf,
    /// First month shown in the bubble chart.
    pub bubble_cutoff: MonthKey,
    /// Seconds between frames while the bubble chart plays.
    pub frame_interval_secs: f64,
    pub window_size: [f32; 2],
    /// Fallback filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/covid.csv"),
            bubble_cutoff: MonthKey::from_year_month(2020, 12),
            frame_interval_secs: 0.7,
            window_size: [1280.0, 900.0],
            log_level: "info".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Read `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text)?;
        info!(path = %path.display(), "loaded dashboard config");
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.frame_interval_secs.is_finite() || self.frame_interval_secs <= 0.0 {
            return Err(ConfigError::FrameInterval(self.frame_interval_secs));
        }
        if self.window_size.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Err(ConfigError::WindowSize(self.window_size));
        }
        Ok(())
    }
}
