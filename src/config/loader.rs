//! Configuration loader for peerdump
//!
//! Handles loading configuration from TOML files and merging with defaults.

use super::defaults::default_config;
use crate::core::types::CaptureFidelity;
use crate::dump::capture::CaptureSettings;
use crate::process::buffer::GrowingBuffer;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file used when `--config` isn't given
pub const DEFAULT_CONFIG_FILE: &str = "peerdump.toml";

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_capture")]
    pub capture: CaptureConfig,

    #[serde(default = "default_scan")]
    pub scan: ScanConfig,

    #[serde(default = "default_logging")]
    pub logging: LoggingConfig,
}

/// Where dumps go and what they contain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default = "default_image_name")]
    pub default_image_name: String,
    #[serde(default = "default_fidelity")]
    pub fidelity: CaptureFidelity,
    #[serde(default = "default_dump_dir")]
    pub dump_dir: String,
    #[serde(default = "default_max_filename_attempts")]
    pub max_filename_attempts: usize,
}

/// Buffer sizing for process enumeration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default = "default_initial_process_slots")]
    pub initial_process_slots: usize,
    #[serde(default = "default_initial_name_chars")]
    pub initial_name_chars: usize,
    #[serde(default = "default_max_buffer_attempts")]
    pub max_buffer_attempts: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log to this file instead of stderr
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Config {
    /// Capture settings described by this configuration
    pub fn capture_settings(&self) -> CaptureSettings {
        let buffer = |initial| {
            GrowingBuffer::new(initial).with_max_attempts(self.scan.max_buffer_attempts)
        };

        CaptureSettings {
            app_name: self.capture.app_name.clone(),
            default_image_name: self.capture.default_image_name.clone(),
            dump_dir: PathBuf::from(&self.capture.dump_dir),
            max_filename_attempts: self.capture.max_filename_attempts,
            process_ids: buffer(self.scan.initial_process_slots),
            names: buffer(self.scan.initial_name_chars),
        }
    }
}

/// Configuration loader
pub struct ConfigLoader {
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        ConfigLoader {
            config_path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Loads configuration from file
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.config_path.exists() {
            return Err(ConfigError::FileNotFound(
                self.config_path.display().to_string(),
            ));
        }

        let contents = fs::read_to_string(&self.config_path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Loads configuration, falling back to defaults only when the file is missing
    pub fn load_or_default(&self) -> Result<Config, ConfigError> {
        match self.load() {
            Err(ConfigError::FileNotFound(_)) => Ok(Config::default()),
            other => other,
        }
    }

    /// Saves configuration to file
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, contents)?;
        Ok(())
    }
}

// Default functions for serde
fn default_capture() -> CaptureConfig {
    let defaults = default_config();
    CaptureConfig {
        app_name: defaults.capture.app_name,
        default_image_name: defaults.capture.default_image_name,
        fidelity: defaults.capture.fidelity,
        dump_dir: defaults.capture.dump_dir,
        max_filename_attempts: defaults.capture.max_filename_attempts,
    }
}

fn default_scan() -> ScanConfig {
    let defaults = default_config();
    ScanConfig {
        initial_process_slots: defaults.scan.initial_process_slots,
        initial_name_chars: defaults.scan.initial_name_chars,
        max_buffer_attempts: defaults.scan.max_buffer_attempts,
    }
}

fn default_logging() -> LoggingConfig {
    LoggingConfig {
        level: default_config().logging.level,
        file: None,
    }
}

// Individual field defaults
fn default_app_name() -> String {
    default_config().capture.app_name
}

fn default_image_name() -> String {
    default_config().capture.default_image_name
}

fn default_fidelity() -> CaptureFidelity {
    default_config().capture.fidelity
}

fn default_dump_dir() -> String {
    default_config().capture.dump_dir
}

fn default_max_filename_attempts() -> usize {
    default_config().capture.max_filename_attempts
}

fn default_initial_process_slots() -> usize {
    default_config().scan.initial_process_slots
}

fn default_initial_name_chars() -> usize {
    default_config().scan.initial_name_chars
}

fn default_max_buffer_attempts() -> usize {
    default_config().scan.max_buffer_attempts
}

fn default_log_level() -> String {
    default_config().logging.level
}

impl Default for Config {
    fn default() -> Self {
        Config {
            capture: default_capture(),
            scan: default_scan(),
            logging: default_logging(),
        }
    }
}
