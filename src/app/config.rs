//! App configuration, loadable from JSON.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{DrawError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    /// Capability tags the app wants; gate feature-specific styles.
    pub features: Vec<String>,
    /// Reject unrecognized constructor keywords instead of logging them.
    pub strict_styles: bool,
    /// Pause between heartbeats in `wait` mode; 0 busy-polls.
    pub heartbeat_interval_ms: u64,
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "drawbridge".to_string(),
            width: 480,
            height: 420,
            resizable: true,
            features: Vec::new(),
            strict_styles: false,
            heartbeat_interval_ms: 0,
            log: LogConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            dir: None,
            filter: "drawbridge=info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_features<S: AsRef<str>>(mut self, features: &[S]) -> Self {
        self.features = features.iter().map(|f| f.as_ref().to_string()).collect();
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict_styles = strict;
        self
    }
}

pub fn load_app_config(path: &Path) -> Result<AppConfig> {
    let data = std::fs::read_to_string(path).map_err(|err| {
        DrawError::Config(format!("cannot read {}: {}", path.display(), err))
    })?;
    AppConfig::from_json_str(&data)
}

#[cfg(test)]
#[path = "../../tests/unit/app/config.rs"]
mod tests;
