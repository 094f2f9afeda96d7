//! Kernel32.dll bindings for process handles, module paths and consoles

use crate::core::types::{MemoryResult, ProcessId};
use crate::windows::utils::error_codes::{
    last_error_as_buffer_error, last_error_as_memory_error, WinError,
};
use crate::windows::utils::string_conv::string_to_wide;
use std::ptr;
use winapi::shared::minwindef::{DWORD, FALSE};
use winapi::um::consoleapi::AllocConsole;
use winapi::um::fileapi::{CreateFileW, GetTempPathW, OPEN_EXISTING};
use winapi::um::handleapi::{CloseHandle, INVALID_HANDLE_VALUE};
use winapi::um::libloaderapi::GetModuleFileNameW;
use winapi::um::processenv::SetStdHandle;
use winapi::um::processthreadsapi::{GetCurrentProcess, OpenProcess};
use winapi::um::wincon::FreeConsole;
use winapi::um::winnt::{
    FILE_ATTRIBUTE_NORMAL, FILE_SHARE_READ, FILE_SHARE_WRITE, GENERIC_READ, GENERIC_WRITE, HANDLE,
};

/// Safe wrapper for OpenProcess
///
/// Access denied is reported as `MemoryError::AccessDenied`.
pub fn open_process(pid: ProcessId, desired_access: u32) -> MemoryResult<HANDLE> {
    unsafe {
        let handle = OpenProcess(desired_access, FALSE, pid);
        if handle.is_null() {
            Err(WinError::last("OpenProcess").to_process_error(pid))
        } else {
            Ok(handle)
        }
    }
}

/// Pseudo handle for the current process; never needs closing
pub fn current_process() -> HANDLE {
    unsafe { GetCurrentProcess() }
}

/// Safe wrapper for CloseHandle
///
/// # Safety
/// The handle must be a valid Windows handle
pub unsafe fn close_handle(handle: HANDLE) -> MemoryResult<()> {
    if handle.is_null() {
        return Ok(());
    }

    if CloseHandle(handle) == FALSE {
        Err(last_error_as_memory_error("CloseHandle"))
    } else {
        Ok(())
    }
}

/// Path of the current executable; returns the number of characters written
///
/// A result equal to `buffer.len()` means the path was truncated.
pub fn get_module_file_name(buffer: &mut [u16]) -> MemoryResult<usize> {
    let written = unsafe {
        GetModuleFileNameW(ptr::null_mut(), buffer.as_mut_ptr(), buffer.len() as DWORD)
    };

    if written == 0 {
        Err(last_error_as_buffer_error("GetModuleFileNameW", buffer.len()))
    } else {
        Ok(written as usize)
    }
}

/// Temp directory path; returns the number of characters written
///
/// When the buffer is too small the required size is returned, which is
/// always at least `buffer.len()`.
pub fn get_temp_path(buffer: &mut [u16]) -> MemoryResult<usize> {
    let written = unsafe { GetTempPathW(buffer.len() as DWORD, buffer.as_mut_ptr()) };

    if written == 0 {
        Err(last_error_as_memory_error("GetTempPathW"))
    } else {
        Ok(written as usize)
    }
}

/// Safe wrapper for AllocConsole; false if the process already has one
pub fn alloc_console() -> bool {
    unsafe { AllocConsole() != FALSE }
}

/// Safe wrapper for FreeConsole
pub fn free_console() -> MemoryResult<()> {
    if unsafe { FreeConsole() } == FALSE {
        Err(last_error_as_memory_error("FreeConsole"))
    } else {
        Ok(())
    }
}

/// Open an existing device or file such as `NUL` or `CONOUT$`
pub fn open_device(name: &str, write: bool) -> MemoryResult<HANDLE> {
    let wide = string_to_wide(name);
    let access = if write { GENERIC_WRITE } else { GENERIC_READ };

    let handle = unsafe {
        CreateFileW(
            wide.as_ptr(),
            access,
            FILE_SHARE_READ | FILE_SHARE_WRITE,
            ptr::null_mut(),
            OPEN_EXISTING,
            FILE_ATTRIBUTE_NORMAL,
            ptr::null_mut(),
        )
    };

    if handle == INVALID_HANDLE_VALUE {
        Err(last_error_as_memory_error(format!("CreateFileW({})", name)))
    } else {
        Ok(handle)
    }
}

/// Safe wrapper for SetStdHandle
///
/// # Safety
/// `handle` must stay open for as long as it is the standard handle
pub unsafe fn set_std_handle(which: DWORD, handle: HANDLE) -> MemoryResult<()> {
    if SetStdHandle(which, handle) == FALSE {
        Err(last_error_as_memory_error("SetStdHandle"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::windows::utils::string_conv::wide_to_string;

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_open_idle_process() {
        assert!(open_process(0, 0x0410).is_err());
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_close_null_handle() {
        unsafe {
            assert!(close_handle(ptr::null_mut()).is_ok());
        }
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_module_file_name_truncates() {
        let mut tiny = vec![0u16; 2];
        assert_eq!(get_module_file_name(&mut tiny).unwrap(), 2);

        let mut buffer = vec![0u16; 4096];
        let written = get_module_file_name(&mut buffer).unwrap();
        assert!(written < buffer.len());
        assert!(wide_to_string(&buffer[..written]).ends_with(".exe"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_temp_path_reports_required_size() {
        let mut tiny = vec![0u16; 1];
        assert!(get_temp_path(&mut tiny).unwrap() >= 1);
    }
}
