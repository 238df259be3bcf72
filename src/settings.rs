//! Persistent key-value settings.
//!
//! Small string settings (currently just the dark mode flag) live in a JSON
//! file in the user data dir. Every `set` writes through to disk.

use anyhow::{Context, Result};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Get/set access to persisted string settings
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Settings file format
#[derive(Debug, Serialize, Deserialize)]
struct SettingsFile {
    version: u32,
    values: HashMap<String, String>,
}

impl Default for SettingsFile {
    fn default() -> Self {
        Self {
            version: 1,
            values: HashMap::new(),
        }
    }
}

/// `SettingsStore` backed by a JSON file
pub struct FileSettingsStore {
    path: PathBuf,
    values: Mutex<HashMap<String, String>>,
}

impl FileSettingsStore {
    /// Open the store at `path`.
    ///
    /// A missing file is an empty store. An unreadable or corrupt file is
    /// logged and also treated as empty; the next `set` replaces it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match Self::read(&path) {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!("Ignoring settings file {}: {:#}", path.display(), e);
                HashMap::new()
            }
        };

        Self {
            path,
            values: Mutex::new(values),
        }
    }

    fn read(path: &Path) -> Result<HashMap<String, String>> {
        if !path.exists() {
            tracing::debug!("No settings file found, starting fresh");
            return Ok(HashMap::new());
        }

        let content = fs::read_to_string(path).context("Failed to read settings file")?;
        let file: SettingsFile =
            serde_json::from_str(&content).context("Failed to parse settings file")?;

        tracing::debug!("Loaded {} settings", file.values.len());
        Ok(file.values)
    }

    fn save(&self, values: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Failed to create settings directory")?;
        }

        let file = SettingsFile {
            version: 1,
            values: values.clone(),
        };

        let content =
            serde_json::to_string_pretty(&file).context("Failed to serialize settings")?;

        fs::write(&self.path, content).context("Failed to write settings file")?;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileSettingsStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock();
        values.insert(key.to_string(), value.to_string());
        self.save(&values)
    }
}
