//! Minidump writing

use crate::core::types::{CaptureFidelity, DumpFlags, MemoryResult, ProcessId};
use crate::process::api::ProcessApi;
use std::fmt;
use std::fs::File;
use std::path::PathBuf;
use tracing::info;

/// The process a dump is taken of
pub enum DumpTarget<H> {
    /// The calling process itself
    CurrentProcess,
    /// Another process, opened with query and read access
    Process { pid: ProcessId, handle: H },
}

impl<H> DumpTarget<H> {
    /// Pid of an explicitly opened target
    pub fn pid(&self) -> Option<ProcessId> {
        match self {
            DumpTarget::CurrentProcess => None,
            DumpTarget::Process { pid, .. } => Some(*pid),
        }
    }
}

impl<H> fmt::Display for DumpTarget<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DumpTarget::CurrentProcess => write!(f, "the current process"),
            DumpTarget::Process { pid, .. } => write!(f, "pid {}", pid),
        }
    }
}

/// OS primitives used to place and write a dump
pub trait DumpApi: ProcessApi {
    /// System temp directory, used when the dump directory isn't writable
    fn temp_dir(&self) -> MemoryResult<PathBuf>;

    /// Write a minidump of `target` into `file`
    fn write_dump(
        &self,
        target: &DumpTarget<Self::Handle>,
        file: &File,
        flags: DumpFlags,
    ) -> MemoryResult<()>;
}

/// Write a dump of `target` with the flags for `fidelity`
///
/// Failures are returned exactly as the OS reported them.
pub fn write_snapshot<A: DumpApi>(
    api: &A,
    target: &DumpTarget<A::Handle>,
    file: &File,
    fidelity: CaptureFidelity,
) -> MemoryResult<()> {
    let flags = DumpFlags::for_fidelity(fidelity);
    match fidelity {
        CaptureFidelity::Mini => info!("writing mini minidump of {}", target),
        CaptureFidelity::Data => info!("writing minidump with data of {}", target),
        CaptureFidelity::Full => info!("writing full minidump of {}", target),
    }

    api.write_dump(target, file, flags)?;

    info!(flags = %flags, "minidump written correctly");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::MemoryError;
    use crate::process::api::mock::MockProcesses;
    use pretty_assertions::assert_eq;
    use std::io::Read;

    #[test]
    fn test_target_display() {
        let current: DumpTarget<u32> = DumpTarget::CurrentProcess;
        assert_eq!(current.to_string(), "the current process");
        assert_eq!(current.pid(), None);

        let other = DumpTarget::Process { pid: 42, handle: 42u32 };
        assert_eq!(other.to_string(), "pid 42");
        assert_eq!(other.pid(), Some(42));
    }

    #[test]
    fn test_flags_passed_per_fidelity() {
        let api = MockProcesses::new(1, "a.exe");
        let dir = tempfile::tempdir().unwrap();

        for fidelity in CaptureFidelity::ALL {
            let file = File::create(dir.path().join(format!("{}.dmp", fidelity))).unwrap();
            write_snapshot(&api, &DumpTarget::CurrentProcess, &file, fidelity).unwrap();
        }

        let written: Vec<DumpFlags> = api.dumps.borrow().iter().map(|(_, f)| *f).collect();
        assert_eq!(
            written,
            vec![
                DumpFlags::BASE,
                DumpFlags::BASE | DumpFlags::WITH_DATA_SEGS,
                DumpFlags::BASE | DumpFlags::WITH_FULL_MEMORY,
            ]
        );
    }

    #[test]
    fn test_writes_into_file() {
        let api = MockProcesses::new(1, "a.exe");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.dmp");

        let file = File::create(&path).unwrap();
        let target = DumpTarget::Process { pid: 7, handle: 7 };
        write_snapshot(&api, &target, &file, CaptureFidelity::Mini).unwrap();
        drop(file);

        let mut contents = Vec::new();
        File::open(&path).unwrap().read_to_end(&mut contents).unwrap();
        assert!(contents.starts_with(b"MDMP"));
        assert_eq!(api.dumps.borrow()[0].0, Some(7));
    }

    #[test]
    fn test_failure_is_surfaced_verbatim() {
        let mut api = MockProcesses::new(1, "a.exe");
        api.dump_fails = true;
        let dir = tempfile::tempdir().unwrap();
        let file = File::create(dir.path().join("out.dmp")).unwrap();

        let err = write_snapshot(&api, &DumpTarget::CurrentProcess, &file, CaptureFidelity::Full)
            .unwrap_err();
        match err {
            MemoryError::SystemCall { operation, code, message } => {
                assert_eq!(operation, "MiniDumpWriteDump");
                assert_eq!(code, 0x8007_0012);
                assert_eq!(message, "There are no more files.");
            }
            other => panic!("Expected SystemCall, got {:?}", other),
        }
    }
}
