//! Process access rights and the owned process handle

use std::fmt;

#[cfg(windows)]
use crate::core::types::{MemoryResult, ProcessId};
#[cfg(windows)]
use crate::windows::bindings::kernel32;
#[cfg(windows)]
use crate::windows::types::Handle;
#[cfg(windows)]
use winapi::um::winnt::HANDLE;

/// Access rights for process handles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessAccess {
    value: u32,
}

impl ProcessAccess {
    /// Query information access
    pub const QUERY_INFORMATION: Self = Self { value: 0x0400 };
    /// Read memory access
    pub const VM_READ: Self = Self { value: 0x0010 };

    /// Rights needed to name a process and to write a minidump of it
    pub const QUERY_AND_READ: Self = Self {
        value: Self::QUERY_INFORMATION.value | Self::VM_READ.value,
    };

    /// Get raw value
    pub fn value(&self) -> u32 {
        self.value
    }
}

impl fmt::Display for ProcessAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.value)
    }
}

/// Owned handle to another process, closed on drop
#[cfg(windows)]
pub struct ProcessHandle {
    handle: Handle,
    pid: ProcessId,
    access: ProcessAccess,
}

#[cfg(windows)]
impl ProcessHandle {
    /// Open a process with specified access rights
    pub fn open(pid: ProcessId, access: ProcessAccess) -> MemoryResult<Self> {
        let raw_handle = kernel32::open_process(pid, access.value())?;
        Ok(ProcessHandle {
            handle: Handle::new(raw_handle),
            pid,
            access,
        })
    }

    /// Get the process ID
    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    /// Get the raw handle
    ///
    /// # Safety
    /// The returned handle is only valid as long as this ProcessHandle exists
    pub unsafe fn raw(&self) -> HANDLE {
        self.handle.raw()
    }

    /// Check if handle is valid
    pub fn is_valid(&self) -> bool {
        !self.handle.is_null()
    }
}

#[cfg(windows)]
impl fmt::Debug for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessHandle")
            .field("pid", &self.pid)
            .field("valid", &self.is_valid())
            .field("access", &self.access.to_string())
            .finish()
    }
}
