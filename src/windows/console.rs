//! Console for interactive diagnostics from a GUI process

use crate::core::types::MemoryResult;
use crate::windows::bindings::kernel32;
use crate::windows::types::Handle;
use tracing::debug;
use winapi::shared::minwindef::DWORD;
use winapi::um::winbase::{STD_ERROR_HANDLE, STD_INPUT_HANDLE, STD_OUTPUT_HANDLE};

/// Allocates a console and points the standard handles at it
///
/// On drop the standard handles are redirected to `NUL`, so stray writes
/// after the console is gone go nowhere, and the console is freed.
pub struct ConsoleGuard {
    allocated: bool,
    streams: Vec<(DWORD, Handle)>,
}

impl ConsoleGuard {
    pub fn new() -> MemoryResult<Self> {
        // fails when the process already has a console, which is fine
        let allocated = kernel32::alloc_console();
        debug!(allocated, "console ready");

        // on early return the guard's drop undoes what was done so far
        let mut guard = ConsoleGuard {
            allocated,
            streams: Vec::with_capacity(3),
        };
        for (which, device, write) in [
            (STD_INPUT_HANDLE, "CONIN$", false),
            (STD_OUTPUT_HANDLE, "CONOUT$", true),
            (STD_ERROR_HANDLE, "CONOUT$", true),
        ] {
            let handle = Handle::new(kernel32::open_device(device, write)?);
            unsafe { kernel32::set_std_handle(which, handle.raw())? };
            guard.streams.push((which, handle));
        }

        Ok(guard)
    }
}

impl Drop for ConsoleGuard {
    fn drop(&mut self) {
        for (which, _) in self.streams.iter().rev() {
            let write = *which != STD_INPUT_HANDLE;
            if let Ok(nul) = kernel32::open_device("NUL", write) {
                // the NUL handle stays open as the new standard handle
                let _ = unsafe { kernel32::set_std_handle(*which, nul) };
            }
        }
        self.streams.clear();

        if self.allocated {
            let _ = kernel32::free_console();
        }
    }
}
