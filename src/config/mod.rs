//! Configuration module for peerdump
//!
//! Provides configuration loading, validation, and default settings
//! for dump capture.

mod defaults;
mod loader;
mod validator;

pub use defaults::{default_config, ConfigDefaults};
pub use loader::{ConfigLoader, DEFAULT_CONFIG_FILE};
pub use validator::{validate_config, ConfigValidator};

// Re-export the main configuration structure
pub use loader::{CaptureConfig, Config, LoggingConfig, ScanConfig};

// Configuration-related error type
pub use loader::ConfigError;
