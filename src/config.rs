use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::gate::DEFAULT_TOLERANCE;

pub const DEFAULT_SUPPORT_URL: &str = "https://wa.me/1234567890";

/// Runtime settings, usually loaded from `config/portal.toml`.
///
/// Every field has a default, so a missing file or a partial file is fine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalSettings {
    /// Rows short of the bottom that still count as "scrolled to the end".
    pub scroll_tolerance: u16,
    /// Rows moved per arrow key or wheel notch.
    pub scroll_step: u16,
    /// Messaging link opened by "Contact Support".
    pub support_url: String,
    /// Overrides the platform preference file location.
    pub preferences_path: Option<PathBuf>,
    /// Overrides the log file location.
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            scroll_tolerance: DEFAULT_TOLERANCE,
            scroll_step: 3,
            support_url: DEFAULT_SUPPORT_URL.to_string(),
            preferences_path: None,
            log_file: None,
            log_level: String::from("info"),
        }
    }
}

impl PortalSettings {
    /// Reads `config/portal.toml` under `root`. A missing file yields the
    /// defaults; a malformed one is an error.
    pub fn load(root: &Path) -> Result<Self> {
        let config_path = root.join("config/portal.toml");
        if !config_path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read settings: {}", config_path.display()))?;
        let parsed: PortalSettings = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse settings: {}", config_path.display()))?;
        Ok(parsed.normalize(root))
    }

    /// Resolves relative paths against the directory the settings came from.
    fn normalize(mut self, root: &Path) -> Self {
        for path in [&mut self.preferences_path, &mut self.log_file]
            .into_iter()
            .flatten()
        {
            if path.is_relative() {
                *path = root.join(&*path);
            }
        }
        self.scroll_step = self.scroll_step.max(1);
        self
    }

    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
