use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ui::theme::{self, Theme};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub appearance: AppearanceConfig,
    pub storage: StorageConfig,
}

/// Diary server connection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base address of the diary REST server
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Theme preset used when dark mode is on
    pub dark_theme: String,
    /// Theme preset used when dark mode is off
    pub light_theme: String,
    /// Accent override as hex ("#4f46e5"), applied to both presets
    pub accent: Option<String>,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            dark_theme: "diary-dark".to_string(),
            light_theme: "diary-light".to_string(),
            accent: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Settings file (dark mode flag); defaults to the user data dir
    pub settings_path: Option<String>,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path);
        let path = Path::new(expanded.as_ref());

        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            tracing::info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Resolve the settings file location
    pub fn settings_path(&self) -> PathBuf {
        match self.storage.settings_path {
            Some(ref p) => PathBuf::from(shellexpand::tilde(p).as_ref()),
            None => data_dir().join("settings.json"),
        }
    }

    /// Resolve the theme for the current dark mode flag
    pub fn resolve_theme(&self, dark: bool) -> Theme {
        let (name, fallback) = if dark {
            (&self.appearance.dark_theme, Theme::diary_dark as fn() -> Theme)
        } else {
            (&self.appearance.light_theme, Theme::diary_light as fn() -> Theme)
        };

        let mut resolved = Theme::from_preset(name).unwrap_or_else(|| {
            tracing::warn!("Unknown theme preset '{}', using default", name);
            fallback()
        });

        if let Some(ref hex) = self.appearance.accent {
            match theme::parse_hex_color(hex) {
                Ok(color) => resolved.accent = color,
                Err(e) => tracing::warn!("Ignoring accent '{}': {}", hex, e),
            }
        }

        resolved
    }
}

/// Per-user data directory (~/.local/share/diary-tui)
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("diary-tui")
}
