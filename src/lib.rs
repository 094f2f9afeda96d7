//! peerdump library for writing minidumps of the current process or of
//! another running instance of the same executable

pub mod config;
pub mod core;
pub mod dump;
pub mod process;
pub mod windows;

// Re-export main types from core module
pub use core::types::{
    CaptureFidelity, DumpFlags, MemoryError, MemoryResult, ProcessId, ProcessRecord,
};

pub use dump::{report, CaptureSettings, CoreDumper, DumpApi, DumpTarget};
#[cfg(windows)]
pub use dump::{coredump, coredump_other};
pub use process::{find_peer, list_processes, ProcessApi};

// Re-export core directly for full access
pub use core::*;
