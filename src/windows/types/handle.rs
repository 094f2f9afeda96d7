//! Owned kernel HANDLE, closed on drop

use crate::windows::bindings::kernel32;
use winapi::um::handleapi::INVALID_HANDLE_VALUE;
use winapi::um::winnt::HANDLE;

/// Owned kernel object handle
///
/// Both null and `INVALID_HANDLE_VALUE` count as "no handle" and are never
/// closed.
pub struct Handle {
    handle: HANDLE,
}

impl Handle {
    /// Take ownership of a raw handle
    pub fn new(handle: HANDLE) -> Self {
        Handle { handle }
    }

    /// Check if handle is null or `INVALID_HANDLE_VALUE`
    pub fn is_null(&self) -> bool {
        self.handle.is_null() || self.handle == INVALID_HANDLE_VALUE
    }

    /// Get the raw handle
    pub fn raw(&self) -> HANDLE {
        self.handle
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        if !self.is_null() {
            // nothing useful to do if closing fails
            unsafe {
                let _ = kernel32::close_handle(self.handle);
            }
        }
    }
}

// HANDLE values are process-wide, not thread-affine
unsafe impl Send for Handle {}
unsafe impl Sync for Handle {}
