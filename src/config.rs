use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::TriquiError;

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct TriquiConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Locations of the two account files.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct StoreConfig {
    #[serde(default = "default_text_path")]
    pub text_path: PathBuf,
    #[serde(default = "default_json_path")]
    pub json_path: PathBuf,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_file")]
    pub file: PathBuf,
}

fn default_text_path() -> PathBuf {
    PathBuf::from("usuarios_triqui.txt")
}

fn default_json_path() -> PathBuf {
    PathBuf::from("usuarios_triqui.json")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("triqui.log")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            text_path: default_text_path(),
            json_path: default_json_path(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

impl TriquiConfig {
    /// Parse a config file. Missing sections and keys fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, TriquiError> {
        let s = std::fs::read_to_string(path)?;
        toml::from_str(&s).map_err(|e| TriquiError::Config(e.to_string()))
    }

    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            match Self::load(path) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Error loading config {}: {}. Using defaults.", path.display(), e);
                    Self::default()
                }
            }
        } else {
            let config = Self::default();
            if let Ok(s) = toml::to_string_pretty(&config) {
                let _ = std::fs::write(path, s);
            }
            config
        }
    }
}
