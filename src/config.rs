use crate::api::openai::DEFAULT_BASE_URL;
use crate::api::{DEFAULT_MODELS, DEFAULT_TEMPERATURE};
use crate::credentials::{default_settings_path, CredentialStore};
use crate::error::{IdeaError, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";
pub const MODELS_ENV: &str = "REELS_MODELS";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Values given on the command line; `None` falls back to env, then defaults.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub models: Vec<String>,
    pub timeout_secs: Option<u64>,
    pub temperature: Option<f64>,
    pub settings_path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    api_key_override: Option<String>,
    pub base_url: String,
    pub models: Vec<String>,
    pub timeout: Duration,
    pub temperature: f64,
    pub settings_path: PathBuf,
}

impl Settings {
    /// Resolves settings from overrides and the process environment.
    pub fn resolve(overrides: Overrides) -> Result<Self> {
        Self::resolve_with(overrides, |name| std::env::var(name).ok())
    }

    pub fn resolve_with(overrides: Overrides, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = overrides
            .base_url
            .or_else(|| env(BASE_URL_ENV))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let models = if !overrides.models.is_empty() {
            overrides.models
        } else if let Some(list) = env(MODELS_ENV) {
            parse_models(&list)
        } else {
            DEFAULT_MODELS.iter().map(|m| m.to_string()).collect()
        };
        if models.is_empty() {
            return Err(IdeaError::Config("At least one model is required".to_string()));
        }

        let temperature = overrides.temperature.unwrap_or(DEFAULT_TEMPERATURE);
        if !(0.0..=2.0).contains(&temperature) {
            return Err(IdeaError::Config(format!(
                "Temperature must be between 0 and 2, got {}",
                temperature
            )));
        }

        let settings_path = match overrides.settings_path {
            Some(path) => path,
            None => default_settings_path()?,
        };

        let api_key_override = overrides
            .api_key
            .or_else(|| env(API_KEY_ENV))
            .filter(|key| !key.trim().is_empty());

        Ok(Self {
            api_key_override,
            base_url,
            models,
            timeout: Duration::from_secs(overrides.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            temperature,
            settings_path,
        })
    }

    pub fn credential_store(&self) -> CredentialStore {
        CredentialStore::open(&self.settings_path)
    }

    /// Current API key: flag or environment first, then the settings file.
    /// The file is read on every call.
    pub fn api_key(&self) -> Result<Option<String>> {
        if let Some(key) = &self.api_key_override {
            return Ok(Some(key.clone()));
        }
        self.credential_store().load_api_key()
    }
}

/// Splits a comma separated model list, dropping blanks
pub fn parse_models(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}
