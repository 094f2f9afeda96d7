//! Core type definitions for peerdump
//!
//! This module contains the fundamental types used throughout the crate:
//! process records, capture fidelity, minidump flags and error types.

mod capture;
mod error;
mod process_record;

// Re-export all public types
pub use capture::{CaptureFidelity, DumpFlags};
pub use error::{MemoryError, MemoryResult};
pub use process_record::{ProcessRecord, IDLE_PROCESS_ID};

// Common type aliases
pub type ProcessId = u32;
