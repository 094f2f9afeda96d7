//! Configuration validator for peerdump
//!
//! Validates configuration values to ensure they are within acceptable ranges.

use super::loader::{CaptureConfig, Config, ConfigError, LoggingConfig, ScanConfig};

/// Doubling a buffer more often than this would overflow its capacity
pub const MAX_BUFFER_ATTEMPTS: usize = 32;

/// Levels accepted by `[logging] level`
pub const VALID_LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates the entire configuration
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        Self::validate_capture(&config.capture)?;
        Self::validate_scan(&config.scan)?;
        Self::validate_logging(&config.logging)?;
        Ok(())
    }

    /// Validates capture configuration
    fn validate_capture(capture: &CaptureConfig) -> Result<(), ConfigError> {
        Self::validate_name("Application name", &capture.app_name)?;
        Self::validate_name("Default image name", &capture.default_image_name)?;

        if capture.dump_dir.is_empty() {
            return Err(ConfigError::Invalid(
                "Dump directory cannot be empty".to_string(),
            ));
        }

        if capture.max_filename_attempts == 0 {
            return Err(ConfigError::Invalid(
                "Filename attempts must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Names end up in file names, so they can't carry a directory
    fn validate_name(what: &str, name: &str) -> Result<(), ConfigError> {
        if name.is_empty() {
            return Err(ConfigError::Invalid(format!("{} cannot be empty", what)));
        }

        if name.contains(['\\', '/']) {
            return Err(ConfigError::Invalid(format!(
                "{} cannot contain a path separator: {}",
                what, name
            )));
        }

        Ok(())
    }

    /// Validates scan configuration
    fn validate_scan(scan: &ScanConfig) -> Result<(), ConfigError> {
        if scan.initial_process_slots == 0 {
            return Err(ConfigError::Invalid(
                "Initial process slots must be at least 1".to_string(),
            ));
        }

        if scan.initial_name_chars == 0 {
            return Err(ConfigError::Invalid(
                "Initial name length must be at least 1".to_string(),
            ));
        }

        if scan.max_buffer_attempts == 0 {
            return Err(ConfigError::Invalid(
                "Buffer attempts must be at least 1".to_string(),
            ));
        }

        if scan.max_buffer_attempts > MAX_BUFFER_ATTEMPTS {
            return Err(ConfigError::Invalid(format!(
                "Buffer attempts cannot exceed {}",
                MAX_BUFFER_ATTEMPTS
            )));
        }

        Ok(())
    }

    /// Validates logging configuration
    fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!(
                "Invalid log level: {}. Must be one of: {:?}",
                logging.level, VALID_LOG_LEVELS
            )));
        }

        if logging.file.as_deref() == Some("") {
            return Err(ConfigError::Invalid(
                "Log file path cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Validates a configuration
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    ConfigValidator::validate(config)
}
