//! Minidump capture
//!
//! Unique dump file allocation, the snapshot writer and the two capture
//! entry points built on top of the process discovery in `crate::process`.

pub mod allocator;
pub mod capture;
pub mod writer;

pub use allocator::{DumpFile, DumpFileAllocator};
pub use capture::{report, CaptureSettings, CoreDumper};
pub use writer::{write_snapshot, DumpApi, DumpTarget};

#[cfg(windows)]
use crate::core::types::CaptureFidelity;

/// Write a minidump of the current process; false on any failure
#[cfg(windows)]
pub fn coredump(fidelity: CaptureFidelity) -> bool {
    report(CoreDumper::new(crate::windows::SystemApi).capture_self(fidelity))
}

/// Write a minidump of the other running instance; false on any failure
#[cfg(windows)]
pub fn coredump_other(fidelity: CaptureFidelity) -> bool {
    report(CoreDumper::new(crate::windows::SystemApi).capture_other(fidelity))
}
