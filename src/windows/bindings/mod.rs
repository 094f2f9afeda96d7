//! Windows API bindings
//!
//! Low-level FFI bindings to Windows system libraries.

pub mod dbghelp;
pub mod kernel32;
pub mod psapi;
