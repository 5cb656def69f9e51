use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::status::sources::{BATTERY_CAPACITY_PATH, BATTERY_STATUS_PATH, MEMINFO_PATH};
use crate::core::status::{DEFAULT_CAPACITY, DEFAULT_PERIOD};
use crate::error::StatusError;

/// Where the composed line goes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// X root window name, as read by dwm
    #[default]
    Xroot,
    Stdout,
}

impl std::str::FromStr for SinkKind {
    type Err = StatusError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "xroot" => Ok(SinkKind::Xroot),
            "stdout" => Ok(SinkKind::Stdout),
            other => Err(StatusError::config(format!("unknown sink '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub period_ms: u64,
    /// Maximum status line length in characters
    pub capacity: usize,
    /// Shorten the sleep after an early wake-up (false: fixed sleep)
    pub drift_correction: bool,
    pub meminfo_path: PathBuf,
    pub battery_capacity_path: PathBuf,
    pub battery_status_path: PathBuf,
    pub sink: SinkKind,
    /// Process name to register with for layout-change notifications
    pub peer: Option<String>,
    pub layout: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            period_ms: DEFAULT_PERIOD.as_millis() as u64,
            capacity: DEFAULT_CAPACITY,
            drift_correction: true,
            meminfo_path: PathBuf::from(MEMINFO_PATH),
            battery_capacity_path: PathBuf::from(BATTERY_CAPACITY_PATH),
            battery_status_path: PathBuf::from(BATTERY_STATUS_PATH),
            sink: SinkKind::default(),
            peer: None,
            layout: true,
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults when absent.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let data = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        if data.trim().is_empty() {
            return Ok(Config::default());
        }

        let config: Config = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;
        config.validate()?;

        Ok(config)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let data =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        fs::write(config_path, data)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().with_context(|| "Could not determine config directory")?;

        Ok(config_dir.join("wmstatus").join("config.json"))
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.period_ms == 0 {
            return Err(StatusError::config("period_ms must be greater than 0"));
        }
        if self.capacity == 0 {
            return Err(StatusError::config("capacity must be greater than 0"));
        }
        Ok(())
    }

    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }
}
