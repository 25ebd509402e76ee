//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::PathBuf;

/// Default workbook path, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "engineering_data.xlsx";

/// Default history path, relative to the working directory
pub const DEFAULT_HISTORY_FILE: &str = "input_history.json";

/// QDL configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ledger workbook path
    pub data_file: Option<PathBuf>,

    /// Input-history file path
    pub history_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/qdl/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&global_path) {
                    if let Ok(global) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(global);
                    }
                }
            }
        }

        // 3. Environment variables
        if let Ok(data_file) = std::env::var("QDL_DATA_FILE") {
            config.data_file = Some(PathBuf::from(data_file));
        }
        if let Ok(history_file) = std::env::var("QDL_HISTORY_FILE") {
            config.history_file = Some(PathBuf::from(history_file));
        }

        config
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "qdl")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.data_file.is_some() {
            self.data_file = other.data_file;
        }
        if other.history_file.is_some() {
            self.history_file = other.history_file;
        }
    }

    /// Workbook path, with the original tool's default
    pub fn data_file(&self) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
    }

    /// History path, with the original tool's default
    pub fn history_file(&self) -> PathBuf {
        self.history_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORY_FILE))
    }
}
