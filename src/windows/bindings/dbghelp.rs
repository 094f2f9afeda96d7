//! DbgHelp.dll bindings for writing minidumps

use crate::core::types::{DumpFlags, MemoryError, MemoryResult, ProcessId};
use windows::Win32::Foundation::HANDLE as WinHandle;
use windows::Win32::System::Diagnostics::Debug::{MiniDumpWriteDump, MINIDUMP_TYPE};
use winapi::um::winnt::HANDLE;

/// Safe wrapper for MiniDumpWriteDump
///
/// Failures keep the HRESULT and the system message text.
///
/// # Safety
/// `process` must be a process handle with query and read access (or the
/// current process pseudo handle) and `file` a handle open for writing.
pub unsafe fn mini_dump_write_dump(
    process: HANDLE,
    pid: ProcessId,
    file: HANDLE,
    flags: DumpFlags,
) -> MemoryResult<()> {
    MiniDumpWriteDump(
        WinHandle(process as isize),
        pid,
        WinHandle(file as isize),
        MINIDUMP_TYPE(flags.value() as i32),
        None,
        None,
        None,
    )
    .map_err(|e| to_dump_error(&e))
}

fn to_dump_error(error: &windows::core::Error) -> MemoryError {
    MemoryError::system_call(
        "MiniDumpWriteDump",
        error.code().0 as u32,
        error.message().to_string().trim_end(),
    )
}
