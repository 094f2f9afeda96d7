//! The real Windows implementation of the process and dump capabilities

use crate::core::types::{DumpFlags, MemoryResult, ProcessId};
use crate::dump::writer::{DumpApi, DumpTarget};
use crate::process::api::ProcessApi;
use crate::process::buffer::GrowingBuffer;
use crate::process::handle::{ProcessAccess, ProcessHandle};
use crate::windows::bindings::{dbghelp, kernel32, psapi};
use crate::windows::utils::string_conv::wide_to_string;
use std::fs::File;
use std::os::windows::io::AsRawHandle;
use std::path::PathBuf;
use winapi::shared::minwindef::MAX_PATH;
use winapi::um::winnt::HANDLE;

/// Process and dump capabilities backed by kernel32, psapi and dbghelp
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemApi;

impl ProcessApi for SystemApi {
    type Handle = ProcessHandle;

    fn enum_process_ids(&self, buffer: &mut [ProcessId]) -> MemoryResult<usize> {
        psapi::enum_processes(buffer)
    }

    fn open_process(&self, pid: ProcessId, access: ProcessAccess) -> MemoryResult<ProcessHandle> {
        ProcessHandle::open(pid, access)
    }

    fn image_base_name(&self, handle: &ProcessHandle, buffer: &mut [u16]) -> MemoryResult<usize> {
        unsafe { psapi::get_module_base_name(handle.raw(), buffer) }
    }

    fn own_image_path(&self, buffer: &mut [u16]) -> MemoryResult<usize> {
        kernel32::get_module_file_name(buffer)
    }

    fn current_process_id(&self) -> ProcessId {
        std::process::id()
    }
}

impl DumpApi for SystemApi {
    fn temp_dir(&self) -> MemoryResult<PathBuf> {
        let wide = GrowingBuffer::new(MAX_PATH + 1)
            .query("temp path", |buffer| kernel32::get_temp_path(buffer))?;
        Ok(PathBuf::from(wide_to_string(&wide)))
    }

    fn write_dump(
        &self,
        target: &DumpTarget<ProcessHandle>,
        file: &File,
        flags: DumpFlags,
    ) -> MemoryResult<()> {
        let (process, pid) = match target {
            DumpTarget::CurrentProcess => (kernel32::current_process(), std::process::id()),
            DumpTarget::Process { pid, handle } => (unsafe { handle.raw() }, *pid),
        };

        unsafe { dbghelp::mini_dump_write_dump(process, pid, file.as_raw_handle() as HANDLE, flags) }
    }
}
