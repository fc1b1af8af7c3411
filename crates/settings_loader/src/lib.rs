//! # Settings Loader
//!
//! Centralized settings loading for the `ask` command line tool and the web form.
//! Settings come from an optional JSON file (`ask.json` by default), then
//! environment variables override individual fields.
//!
//! ## Environment overrides
//!
//! - `ASK_MODEL`: model identifier
//! - `XAI_BASE_URL`: API endpoint root
//! - `ASK_HOST` / `ASK_PORT`: web form bind address
//! - `ASK_TIMEOUT_SECS`: request timeout for the completion call
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! // Explicit file, then `ask.json`, then built-in defaults
//! let path = Some(PathBuf::from("config/ask.json"));
//! let settings = settings_loader::load(path.as_ref())?;
//! println!("model: {}", settings.model);
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default settings file looked up in the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "ask.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub model: String,
    pub base_url: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub system_prompt: String,
    pub timeout_secs: Option<u64>,
    pub host: String,
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: qa_core::DEFAULT_MODEL.to_string(),
            base_url: "https://api.x.ai/v1".to_string(),
            api_key_env: qa_core::DEFAULT_API_KEY_ENV.to_string(),
            system_prompt: qa_core::DEFAULT_SYSTEM_PROMPT.to_string(),
            timeout_secs: None,
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl Settings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Applies overrides from a variable lookup. Unset or blank variables are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(model) = get("ASK_MODEL") {
            self.model = model;
        }
        if let Some(base_url) = get("XAI_BASE_URL") {
            self.base_url = base_url;
        }
        if let Some(host) = get("ASK_HOST") {
            self.host = host;
        }
        if let Some(port) = get("ASK_PORT") {
            self.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid ASK_PORT value: {port}"))?;
        }
        if let Some(secs) = get("ASK_TIMEOUT_SECS") {
            self.timeout_secs = Some(
                secs.trim()
                    .parse()
                    .with_context(|| format!("Invalid ASK_TIMEOUT_SECS value: {secs}"))?,
            );
        }
        Ok(())
    }

    /// Applies overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }
}

/// Loads settings from a JSON file. Missing fields take their defaults.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Reading settings file: {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&raw)
        .with_context(|| format!("Parsing settings JSON in {}", path.display()))?;
    Ok(settings)
}

/// Loads the explicit path when given (errors are reported), otherwise
/// `ask.json` when it exists, otherwise the defaults.
pub fn load_settings_with_fallback(path: Option<&PathBuf>) -> Result<Settings> {
    if let Some(settings_path) = path {
        return load_settings(settings_path);
    }

    if settings_file_exists(DEFAULT_SETTINGS_FILE) {
        return load_settings(DEFAULT_SETTINGS_FILE);
    }

    Ok(Settings::default())
}

/// File settings plus environment overrides. A `.env` file in the working
/// directory is loaded first when present.
pub fn load(path: Option<&PathBuf>) -> Result<Settings> {
    if let Ok(env_file) = dotenvy::dotenv() {
        tracing::debug!(path = %env_file.display(), "loaded .env file");
    }

    let mut settings = load_settings_with_fallback(path)?;
    settings.apply_env_overrides()?;
    Ok(settings)
}

/// Checks if a settings file exists at the given path
pub fn settings_file_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().is_file()
}
