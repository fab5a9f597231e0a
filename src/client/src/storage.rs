use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use serde_json::{Map, Value};
use tracing::debug;

/// Persistent key-value settings that survive across sessions.
///
/// Reads are blocking; callers on the runtime go through `spawn_blocking`.
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
}

/// Settings kept as a single JSON object on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings file {:?}", self.path))?;

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings file {:?}", self.path))
    }

    fn write_all(&self, values: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create settings directory {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(values)?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write settings file {:?}", self.path))
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), Value::String(value.to_string()));
        self.write_all(&values)
    }

    /// Returns whether the key was present.
    pub fn remove(&self, key: &str) -> Result<bool> {
        let mut values = self.read_all()?;
        let removed = values.remove(key).is_some();
        if removed {
            self.write_all(&values)?;
        }
        Ok(removed)
    }
}

impl SettingsStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.read_all()?;

        match values.get(key) {
            Some(Value::String(value)) => Ok(Some(value.clone())),
            Some(other) => {
                debug!("Ignoring non-string setting {}: {}", key, other);
                Ok(None)
            }
            None => Ok(None),
        }
    }
}

/// In-process settings, for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let values = HashMap::from([(key.to_string(), value.to_string())]);
        Self {
            values: Mutex::new(values),
        }
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .map_err(|_| anyhow!("settings lock poisoned"))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| anyhow!("settings lock poisoned"))?;
        Ok(values.get(key).cloned())
    }
}
