//! Process inventory records

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ProcessId;

/// Pid reserved for the system idle process
pub const IDLE_PROCESS_ID: ProcessId = 0;

/// A live process as seen by one inventory scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    /// Base name of the process image, without its directory
    pub image_file_name: String,
    pub pid: ProcessId,
}

impl ProcessRecord {
    /// Creates a new record
    pub fn new(image_file_name: impl Into<String>, pid: ProcessId) -> Self {
        ProcessRecord {
            image_file_name: image_file_name.into(),
            pid,
        }
    }

    /// Checks if this record is the idle process, which can never be opened
    pub fn is_idle_process(&self) -> bool {
        self.pid == IDLE_PROCESS_ID
    }

    /// Whether this record is another instance of `image_file_name`
    ///
    /// Comparison is exact and case-sensitive; the caller's own pid never matches.
    pub fn is_peer_of(&self, image_file_name: &str, own_pid: ProcessId) -> bool {
        !self.is_idle_process() && self.pid != own_pid && self.image_file_name == image_file_name
    }
}

impl fmt::Display for ProcessRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (pid {})", self.image_file_name, self.pid)
    }
}
