//! Application configuration.
//!
//! Built once at startup from compiled-in defaults, an optional JSON file
//! (`$XDG_CONFIG_HOME/wingobar/config.json`) and the command line, then
//! passed explicitly to everything that needs it.
//!
//! # Example
//!
//! ```json
//! {
//!   "output": "/tmp/wingobar.line",
//!   "highlight": "ffffff",
//!   "lowlight": "808080",
//!   "battery": true,
//!   "tick_secs": 60,
//!   "reconnect_ms": 1000
//! }
//! ```

use crate::render::ColorOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration.
///
/// Every field is optional in the file; a minimal `{}` is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File that receives the line.  `None` writes to standard output.
    pub output: Option<PathBuf>,
    /// Foreground color (hex, without `0x`) of the current workspace.
    pub highlight: Option<String>,
    /// Foreground color of every other workspace.
    pub lowlight: Option<String>,
    /// Query `apm` for the remaining battery time on every tick.
    pub battery: bool,
    /// Seconds between clock ticks.
    pub tick_secs: u64,
    /// Pause before redialing a dropped notification socket (ms).
    pub reconnect_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: None,
            highlight: None,
            lowlight: None,
            battery: false,
            tick_secs: 60,
            reconnect_ms: 1000,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }

    pub fn colors(&self) -> ColorOptions {
        ColorOptions {
            highlight: self.highlight.clone(),
            lowlight: self.lowlight.clone(),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_secs.max(1))
    }

    pub fn reconnect_interval(&self) -> Duration {
        Duration::from_millis(self.reconnect_ms)
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);
