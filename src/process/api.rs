//! Process introspection capabilities
//!
//! Everything the inventory and the peer locator need from the operating
//! system goes through [`ProcessApi`]. The Windows implementation lives in
//! `crate::windows::system`.

use crate::core::types::{MemoryResult, ProcessId};
use crate::process::handle::ProcessAccess;

/// OS primitives used for process discovery
///
/// Sized queries report the number of elements written. A count equal to
/// the buffer length, or [`MemoryError::BufferTooSmall`], means the buffer
/// may have been too small.
///
/// [`MemoryError::BufferTooSmall`]: crate::core::types::MemoryError::BufferTooSmall
pub trait ProcessApi {
    /// Owned handle to an opened process, released on drop
    type Handle;

    /// Fill `buffer` with the ids of all live processes
    fn enum_process_ids(&self, buffer: &mut [ProcessId]) -> MemoryResult<usize>;

    /// Open a process; access denied must be reported as
    /// [`MemoryError::AccessDenied`](crate::core::types::MemoryError::AccessDenied)
    fn open_process(&self, pid: ProcessId, access: ProcessAccess) -> MemoryResult<Self::Handle>;

    /// Base name of the main module of an opened process, as UTF-16
    fn image_base_name(&self, handle: &Self::Handle, buffer: &mut [u16]) -> MemoryResult<usize>;

    /// Full path of the current process image, as UTF-16
    fn own_image_path(&self, buffer: &mut [u16]) -> MemoryResult<usize>;

    /// Id of the current process
    fn current_process_id(&self) -> ProcessId;
}
