//! Process discovery
//!
//! This module provides the capability trait over the OS process APIs,
//! the shared growing-buffer retry routine, the process inventory and the
//! peer locator that finds another instance of the current executable.

pub mod api;
pub mod buffer;
pub mod handle;
pub mod inventory;
pub mod locator;

pub use api::ProcessApi;
pub use buffer::GrowingBuffer;
#[cfg(windows)]
pub use handle::ProcessHandle;
pub use handle::ProcessAccess;
pub use inventory::{list_processes, ProcessInventory};
pub use locator::{find_peer, PeerLocator};
