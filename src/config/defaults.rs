//! Default configuration values for peerdump

use crate::core::types::CaptureFidelity;
use crate::dump::allocator::{DEFAULT_APP_NAME, DEFAULT_MAX_ATTEMPTS};
use crate::process::buffer::DEFAULT_MAX_ATTEMPTS as DEFAULT_BUFFER_ATTEMPTS;
use crate::process::inventory::{INITIAL_PROCESS_SLOTS, MAX_PATH};
use crate::process::locator::DEFAULT_IMAGE_NAME;
use serde::{Deserialize, Serialize};

/// Default configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigDefaults {
    pub capture: CaptureDefaults,
    pub scan: ScanDefaults,
    pub logging: LoggingDefaults,
}

/// Default capture configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureDefaults {
    pub app_name: String,
    pub default_image_name: String,
    pub fidelity: CaptureFidelity,
    pub dump_dir: String,
    pub max_filename_attempts: usize,
}

/// Default process scan configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanDefaults {
    pub initial_process_slots: usize,
    pub initial_name_chars: usize,
    pub max_buffer_attempts: usize,
}

/// Default logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingDefaults {
    pub level: String,
}

/// Returns the default configuration
pub fn default_config() -> ConfigDefaults {
    ConfigDefaults {
        capture: CaptureDefaults {
            app_name: DEFAULT_APP_NAME.to_string(),
            default_image_name: DEFAULT_IMAGE_NAME.to_string(),
            fidelity: CaptureFidelity::Mini,
            dump_dir: ".".to_string(),
            max_filename_attempts: DEFAULT_MAX_ATTEMPTS,
        },
        scan: ScanDefaults {
            initial_process_slots: INITIAL_PROCESS_SLOTS,
            initial_name_chars: MAX_PATH,
            max_buffer_attempts: DEFAULT_BUFFER_ATTEMPTS,
        },
        logging: LoggingDefaults {
            level: "info".to_string(),
        },
    }
}
