//! Unique, timestamped dump file creation
//!
//! Files are named `<AppName>-YYYYMMDDThhmmss.dmp` after the current UTC
//! time, with `-1`, `-2`, … appended when that name is already taken.
//! Creation is exclusive, so an existing file is never truncated and two
//! concurrent captures in the same second end up with different names.

use crate::core::types::{MemoryError, MemoryResult};
use chrono::{DateTime, Utc};
use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Application name used in dump file names
pub const DEFAULT_APP_NAME: &str = "ModOrganizer";

/// Candidate names tried per directory, the unsuffixed one included
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

/// Dump file extension
pub const DUMP_EXTENSION: &str = "dmp";

/// A freshly created, empty dump file
#[derive(Debug)]
pub struct DumpFile {
    pub file: File,
    pub path: PathBuf,
}

/// Creates dump files that never overwrite an existing one
#[derive(Debug, Clone)]
pub struct DumpFileAllocator {
    app_name: String,
    max_attempts: usize,
}

impl Default for DumpFileAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_APP_NAME)
    }
}

impl DumpFileAllocator {
    pub fn new(app_name: impl Into<String>) -> Self {
        DumpFileAllocator {
            app_name: app_name.into(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Override how many names are tried per directory
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// `<AppName>-YYYYMMDDThhmmss` for the given time
    pub fn prefix(&self, now: DateTime<Utc>) -> String {
        format!("{}-{}", self.app_name, now.format("%Y%m%dT%H%M%S"))
    }

    /// Path tried on the given attempt; attempt 0 has no counter
    pub fn candidate(dir: &Path, prefix: &str, attempt: usize) -> PathBuf {
        if attempt == 0 {
            dir.join(format!("{}.{}", prefix, DUMP_EXTENSION))
        } else {
            dir.join(format!("{}-{}.{}", prefix, attempt, DUMP_EXTENSION))
        }
    }

    /// Create a dump file in `dir` named after the current time
    pub fn allocate(&self, dir: &Path) -> MemoryResult<DumpFile> {
        self.allocate_at(dir, Utc::now())
    }

    /// Create a dump file in `dir` named after `now`
    ///
    /// Only "already exists" moves on to the next name; any other failure
    /// is returned immediately since renaming won't fix it.
    pub fn allocate_at(&self, dir: &Path, now: DateTime<Utc>) -> MemoryResult<DumpFile> {
        let prefix = self.prefix(now);

        for attempt in 0..self.max_attempts {
            let path = Self::candidate(dir, &prefix, attempt);
            debug!("trying file '{}'", path.display());

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok(DumpFile { file, path }),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    // probably no write access
                    warn!("failed to create dump file '{}': {}", path.display(), e);
                    return Err(e.into());
                }
            }
        }

        warn!("can't create dump file in '{}', ran out of filenames", dir.display());
        Err(MemoryError::FilenamesExhausted {
            dir: dir.to_path_buf(),
            attempts: self.max_attempts,
        })
    }

    /// Try `primary` first, then the directory returned by `fallback`
    pub fn allocate_with_fallback<F>(&self, primary: &Path, fallback: F) -> MemoryResult<DumpFile>
    where
        F: FnOnce() -> MemoryResult<PathBuf>,
    {
        self.allocate_with_fallback_at(primary, fallback, Utc::now())
    }

    /// [`allocate_with_fallback`](Self::allocate_with_fallback) at a fixed time
    pub fn allocate_with_fallback_at<F>(
        &self,
        primary: &Path,
        fallback: F,
        now: DateTime<Utc>,
    ) -> MemoryResult<DumpFile>
    where
        F: FnOnce() -> MemoryResult<PathBuf>,
    {
        match self.allocate_at(primary, now) {
            Ok(dump) => return Ok(dump),
            Err(e) => warn!(
                "cannot write dump file in '{}', trying the temp directory: {}",
                primary.display(),
                e
            ),
        }

        let dir = match fallback() {
            Ok(dir) => dir,
            Err(e) => {
                warn!("failed to get temp path: {}", e);
                return Err(MemoryError::NowhereToWrite);
            }
        };

        self.allocate_at(&dir, now).map_err(|e| {
            warn!("cannot write dump file in '{}': {}", dir.display(), e);
            MemoryError::NowhereToWrite
        })
    }
}
