//! PSAPI.dll bindings for process enumeration and naming

use crate::core::types::{MemoryResult, ProcessId};
use crate::windows::utils::error_codes::{last_error_as_buffer_error, last_error_as_memory_error};
use winapi::shared::minwindef::{DWORD, FALSE};
use winapi::um::psapi::{EnumProcesses, GetModuleBaseNameW};
use winapi::um::winnt::HANDLE;

/// Safe wrapper for EnumProcesses; returns the number of ids written
///
/// A result equal to `pids.len()` may mean the list was cut short.
pub fn enum_processes(pids: &mut [ProcessId]) -> MemoryResult<usize> {
    let bytes_given = std::mem::size_of_val(pids) as DWORD;
    let mut bytes_written: DWORD = 0;

    let result = unsafe { EnumProcesses(pids.as_mut_ptr(), bytes_given, &mut bytes_written) };

    if result == FALSE {
        return Err(last_error_as_memory_error("EnumProcesses"));
    }

    Ok(bytes_written as usize / std::mem::size_of::<DWORD>())
}

/// Base name of the main module of a process; returns characters written
///
/// # Safety
/// The handle must be a valid process handle with query and read access
pub unsafe fn get_module_base_name(handle: HANDLE, buffer: &mut [u16]) -> MemoryResult<usize> {
    let written = GetModuleBaseNameW(
        handle,
        std::ptr::null_mut(),
        buffer.as_mut_ptr(),
        buffer.len() as DWORD,
    );

    if written == 0 {
        Err(last_error_as_buffer_error("GetModuleBaseNameW", buffer.len()))
    } else {
        Ok(written as usize)
    }
}
