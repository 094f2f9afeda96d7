//! Windows API layer
//!
//! Provides safe wrappers around the Windows functions used for process
//! discovery and minidump writing. All unsafe FFI calls are contained
//! within this module. The string and error code helpers in `utils` are
//! plain Rust and available everywhere.

pub mod utils;

#[cfg(windows)]
pub mod bindings;
#[cfg(windows)]
pub mod console;
#[cfg(windows)]
pub mod system;
#[cfg(windows)]
pub mod types;

// Re-export commonly used types
#[cfg(windows)]
pub use console::ConsoleGuard;
#[cfg(windows)]
pub use system::SystemApi;
#[cfg(windows)]
pub use types::Handle;
pub use utils::{ErrorCode, WinError};
