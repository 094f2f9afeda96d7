//! Core module containing fundamental types for peerdump
//!
//! This module provides the building blocks shared by process discovery
//! and dump capture: process records, capture fidelity, dump flags and
//! error types.

pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    CaptureFidelity,
    DumpFlags,
    MemoryError,
    MemoryResult,
    ProcessId,
    ProcessRecord,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
