//! Capture entry points: dump this process or the other instance

use crate::core::types::{CaptureFidelity, MemoryError, MemoryResult, ProcessRecord};
use crate::dump::allocator::{DumpFile, DumpFileAllocator, DEFAULT_APP_NAME, DEFAULT_MAX_ATTEMPTS};
use crate::dump::writer::{write_snapshot, DumpApi, DumpTarget};
use crate::process::buffer::GrowingBuffer;
use crate::process::handle::ProcessAccess;
use crate::process::inventory::{ProcessInventory, INITIAL_PROCESS_SLOTS, MAX_PATH};
use crate::process::locator::{PeerLocator, DEFAULT_IMAGE_NAME};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Knobs for a capture, usually built from the config file
#[derive(Debug, Clone)]
pub struct CaptureSettings {
    pub app_name: String,
    pub default_image_name: String,
    /// Directory tried before the temp directory
    pub dump_dir: PathBuf,
    pub max_filename_attempts: usize,
    pub process_ids: GrowingBuffer,
    pub names: GrowingBuffer,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        CaptureSettings {
            app_name: DEFAULT_APP_NAME.to_string(),
            default_image_name: DEFAULT_IMAGE_NAME.to_string(),
            dump_dir: PathBuf::from("."),
            max_filename_attempts: DEFAULT_MAX_ATTEMPTS,
            process_ids: GrowingBuffer::new(INITIAL_PROCESS_SLOTS),
            names: GrowingBuffer::new(MAX_PATH),
        }
    }
}

/// Writes minidumps of the current process or of its peer
pub struct CoreDumper<A: DumpApi> {
    api: A,
    settings: CaptureSettings,
}

impl<A: DumpApi> CoreDumper<A> {
    pub fn new(api: A) -> Self {
        Self::with_settings(api, CaptureSettings::default())
    }

    pub fn with_settings(api: A, settings: CaptureSettings) -> Self {
        CoreDumper { api, settings }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn settings(&self) -> &CaptureSettings {
        &self.settings
    }

    /// Dump the calling process; returns the path of the dump
    pub fn capture_self(&self, fidelity: CaptureFidelity) -> MemoryResult<PathBuf> {
        info!("creating minidump for the current process");
        self.capture(DumpTarget::CurrentProcess, fidelity)
    }

    /// Dump the other running instance of this executable
    ///
    /// Fails with [`MemoryError::NoPeerProcess`] when there is none, in which
    /// case no file is created.
    pub fn capture_other(&self, fidelity: CaptureFidelity) -> MemoryResult<PathBuf> {
        info!("creating minidump for a running process");

        let pid = self.locator().find_peer()?.ok_or(MemoryError::NoPeerProcess)?;
        info!("found other process with pid {}", pid);

        let handle = self
            .api
            .open_process(pid, ProcessAccess::QUERY_AND_READ)
            .map_err(|e| {
                warn!("failed to open process {}: {}", pid, e);
                e
            })?;

        self.capture(DumpTarget::Process { pid, handle }, fidelity)
    }

    /// Allocate a dump file and write a dump of `target` into it
    ///
    /// A file that was created but couldn't be written is left in place.
    pub fn capture(
        &self,
        target: DumpTarget<A::Handle>,
        fidelity: CaptureFidelity,
    ) -> MemoryResult<PathBuf> {
        let DumpFile { file, path } = self.dump_file()?;
        info!("writing dump to '{}'", path.display());

        write_snapshot(&self.api, &target, &file, fidelity)?;
        Ok(path)
    }

    /// Processes the peer locator would consider
    pub fn list_processes(&self) -> MemoryResult<Vec<ProcessRecord>> {
        ProcessInventory::new(&self.api)
            .with_buffers(self.settings.process_ids, self.settings.names)
            .list_processes()
    }

    fn locator(&self) -> PeerLocator<'_, A> {
        PeerLocator::new(&self.api)
            .with_default_image_name(self.settings.default_image_name.clone())
            .with_buffers(self.settings.process_ids, self.settings.names)
    }

    fn dump_file(&self) -> MemoryResult<DumpFile> {
        DumpFileAllocator::new(self.settings.app_name.clone())
            .with_max_attempts(self.settings.max_filename_attempts)
            .allocate_with_fallback(&self.settings.dump_dir, || self.api.temp_dir())
    }
}

/// Log a capture failure and collapse the outcome to a success flag
pub fn report(result: MemoryResult<PathBuf>) -> bool {
    match result {
        Ok(path) => {
            info!("minidump written to '{}'", path.display());
            true
        }
        Err(MemoryError::NoPeerProcess) => {
            error!("no other process found");
            false
        }
        Err(e) => {
            error!("failed to create minidump: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::DumpFlags;
    use crate::process::api::mock::{MockEntry, MockProcesses};
    use pretty_assertions::assert_eq;
    use std::fs;

    fn settings_in(dir: &std::path::Path) -> CaptureSettings {
        CaptureSettings {
            dump_dir: dir.to_path_buf(),
            ..CaptureSettings::default()
        }
    }

    #[test]
    fn test_capture_self_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let dumper = CoreDumper::with_settings(MockProcesses::new(1, "a.exe"), settings_in(dir.path()));

        let path = dumper.capture_self(CaptureFidelity::Data).unwrap();
        assert_eq!(path.parent(), Some(dir.path()));
        assert_eq!(fs::read(&path).unwrap(), b"MDMP");
        assert_eq!(
            dumper.api().dumps.borrow().as_slice(),
            &[(None::<u32>, DumpFlags::BASE | DumpFlags::WITH_DATA_SEGS)]
        );
    }

    #[test]
    fn test_capture_other_targets_peer() {
        let dir = tempfile::tempdir().unwrap();
        let api = MockProcesses::new(10, "C:\\MO2\\ModOrganizer.exe")
            .with(10, MockEntry::Named("ModOrganizer.exe"))
            .with(20, MockEntry::Named("ModOrganizer.exe"));
        let dumper = CoreDumper::with_settings(api, settings_in(dir.path()));

        dumper.capture_other(CaptureFidelity::Mini).unwrap();
        assert_eq!(dumper.api().dumps.borrow()[0], (Some(20), DumpFlags::BASE));
    }

    #[test]
    fn test_capture_other_without_peer() {
        let dir = tempfile::tempdir().unwrap();
        let api = MockProcesses::new(10, "C:\\MO2\\ModOrganizer.exe")
            .with(10, MockEntry::Named("ModOrganizer.exe"));
        let dumper = CoreDumper::with_settings(api, settings_in(dir.path()));

        let result = dumper.capture_other(CaptureFidelity::Mini);
        assert!(matches!(result, Err(MemoryError::NoPeerProcess)));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
        assert!(!report(result));
    }

    #[test]
    fn test_capture_other_open_failure_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = MockProcesses::new(10, "C:\\MO2\\ModOrganizer.exe")
            .with(10, MockEntry::Named("ModOrganizer.exe"))
            .with(20, MockEntry::Named("ModOrganizer.exe"));
        api.deny_reopen = true;
        let dumper = CoreDumper::with_settings(api, settings_in(dir.path()));

        let result = dumper.capture_other(CaptureFidelity::Mini);
        assert!(matches!(result, Err(MemoryError::AccessDenied { pid: 20, .. })));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
        assert!(dumper.api().dumps.borrow().is_empty());
    }

    #[test]
    fn test_failed_write_leaves_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = MockProcesses::new(1, "a.exe");
        api.dump_fails = true;
        let dumper = CoreDumper::with_settings(api, settings_in(dir.path()));

        assert!(dumper.capture_self(CaptureFidelity::Full).is_err());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_report() {
        assert!(report(Ok(PathBuf::from("x.dmp"))));
        assert!(!report(Err(MemoryError::NowhereToWrite)));
    }
}
