use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{ChatError, ChatResult};

/// Environment variable holding the Gemini API key
pub const GOOGLE_API_KEY_VAR: &str = "GOOGLE_API_KEY";
/// Environment variable holding the SerpAPI key
pub const SERP_API_KEY_VAR: &str = "SERP_API_KEY";
/// Environment variable overriding the model name
pub const MODEL_VAR: &str = "WAYFARER_MODEL";
/// Environment variable overriding the log filter
pub const LOG_VAR: &str = "WAYFARER_LOG";

/// Configuration for the assistant, layered file < environment
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AssistantConfig {
    pub google_api_key: Option<String>,
    pub serp_api_key: Option<String>,
    pub model_name: Option<String>,
    pub system_prompt: Option<String>,
    pub log_level: Option<String>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            google_api_key: None,
            serp_api_key: None,
            model_name: Some("gemini-2.0-flash".to_string()),
            system_prompt: None,
            log_level: None,
        }
    }
}

impl AssistantConfig {
    /// Loads configuration from a file if it exists, otherwise returns the default config
    pub fn load_from_file(path: &Path) -> ChatResult<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| ChatError::Config(format!("Failed to read config file: {}", e)))?;

            let config: Self = toml::from_str(&content)
                .map_err(|e| ChatError::Config(format!("Failed to parse config file: {}", e)))?;

            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Merges this config with another config, preferring values from the other config if present
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            google_api_key: other
                .google_api_key
                .clone()
                .or_else(|| self.google_api_key.clone()),
            serp_api_key: other
                .serp_api_key
                .clone()
                .or_else(|| self.serp_api_key.clone()),
            model_name: other.model_name.clone().or_else(|| self.model_name.clone()),
            system_prompt: other
                .system_prompt
                .clone()
                .or_else(|| self.system_prompt.clone()),
            log_level: other.log_level.clone().or_else(|| self.log_level.clone()),
        }
    }

    /// Overlays values from the process environment on top of this config.
    ///
    /// Environment variables win over file-sourced values; empty variables
    /// are treated as unset.
    pub fn overlay_env(self) -> Self {
        let env_layer = Self {
            google_api_key: non_empty_var(GOOGLE_API_KEY_VAR),
            serp_api_key: non_empty_var(SERP_API_KEY_VAR),
            model_name: non_empty_var(MODEL_VAR),
            system_prompt: None,
            log_level: non_empty_var(LOG_VAR),
        };
        self.merge(&env_layer)
    }

    /// Loads the layered configuration: default path file, then environment
    pub fn load() -> ChatResult<Self> {
        let config = match default_config_file() {
            Ok(path) => Self::load_from_file(&path)?,
            Err(_) => Self::default(),
        };
        Ok(config.overlay_env())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

/// Default config directory: `~/.config/wayfarer`
pub fn default_config_dir() -> ChatResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| ChatError::Config("Could not determine home directory".to_string()))?;

    Ok(home_dir.join(".config").join("wayfarer"))
}

/// Default config file path: `~/.config/wayfarer/config.toml`
pub fn default_config_file() -> ChatResult<PathBuf> {
    Ok(default_config_dir()?.join("config.toml"))
}
