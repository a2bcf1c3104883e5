use crate::error::{IdeaError, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Key the API key is stored under
pub const API_KEY_KEY: &str = "openai_api_key";

const APP_DIR: &str = "reels-ideas";
const SETTINGS_FILE: &str = "settings.json";

/// Default settings file, `<config dir>/reels-ideas/settings.json`
pub fn default_settings_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| IdeaError::Config("Failed to locate the user config directory".to_string()))?;
    Ok(config_dir.join(APP_DIR).join(SETTINGS_FILE))
}

/// Flat string key-value settings persisted as a JSON object.
///
/// Every call reads or writes the file directly; the last write wins.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.read()?;
        Ok(entries.get(key).and_then(Value::as_str).map(str::to_string))
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read()?;
        entries.insert(key.to_string(), Value::String(value.to_string()));
        self.write(&entries)
    }

    /// Returns whether the key was present
    pub fn remove(&self, key: &str) -> Result<bool> {
        let mut entries = self.read()?;
        let removed = entries.remove(key).is_some();
        if removed {
            self.write(&entries)?;
        }
        Ok(removed)
    }

    pub fn load_api_key(&self) -> Result<Option<String>> {
        Ok(self.get(API_KEY_KEY)?.filter(|key| !key.trim().is_empty()))
    }

    pub fn save_api_key(&self, api_key: &str) -> Result<()> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(IdeaError::Validation("API key must not be empty".to_string()));
        }
        self.set(API_KEY_KEY, api_key)?;
        info!("API key saved to {}", self.path.display());
        Ok(())
    }

    fn read(&self) -> Result<Map<String, Value>> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No settings file at {}", self.path.display());
                return Ok(Map::new());
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<Value>(&text)? {
            Value::Object(entries) => Ok(entries),
            _ => Err(IdeaError::Config(format!(
                "Settings file {} is not a JSON object",
                self.path.display()
            ))),
        }
    }

    fn write(&self, entries: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}
