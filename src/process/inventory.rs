//! Process inventory built on `EnumProcesses`-style id enumeration

use crate::core::types::{MemoryResult, ProcessId, ProcessRecord, IDLE_PROCESS_ID};
use crate::process::api::ProcessApi;
use crate::process::buffer::GrowingBuffer;
use crate::process::handle::ProcessAccess;
use crate::windows::utils::string_conv::{extract_filename, wide_to_string};
use tracing::{debug, warn};

/// Initial number of process id slots, unlikely to be more than that
pub const INITIAL_PROCESS_SLOTS: usize = 300;

/// Initial name buffer size in UTF-16 units
pub const MAX_PATH: usize = 260;

/// Scans live processes and names them
pub struct ProcessInventory<'a, A: ProcessApi> {
    api: &'a A,
    ids: GrowingBuffer,
    names: GrowingBuffer,
}

impl<'a, A: ProcessApi> ProcessInventory<'a, A> {
    /// Create an inventory with the default buffer estimates
    pub fn new(api: &'a A) -> Self {
        ProcessInventory {
            api,
            ids: GrowingBuffer::new(INITIAL_PROCESS_SLOTS),
            names: GrowingBuffer::new(MAX_PATH),
        }
    }

    /// Use custom growth policies for id and name queries
    pub fn with_buffers(mut self, ids: GrowingBuffer, names: GrowingBuffer) -> Self {
        self.ids = ids;
        self.names = names;
        self
    }

    /// Ids of all live processes, in enumeration order
    pub fn process_ids(&self) -> MemoryResult<Vec<ProcessId>> {
        self.ids
            .query("process ids", |buffer| self.api.enum_process_ids(buffer))
    }

    /// Every process that could be opened and named
    ///
    /// Processes that can't be opened or named are skipped; only a failure
    /// to enumerate at all is an error.
    pub fn list_processes(&self) -> MemoryResult<Vec<ProcessRecord>> {
        let ids = self.process_ids()?;
        debug!("enumerated {} process ids", ids.len());

        let records: Vec<ProcessRecord> = ids
            .into_iter()
            .filter(|&pid| pid != IDLE_PROCESS_ID)
            .filter_map(|pid| self.resolve(pid))
            .collect();

        debug!("named {} processes", records.len());
        Ok(records)
    }

    fn resolve(&self, pid: ProcessId) -> Option<ProcessRecord> {
        let handle = match self.api.open_process(pid, ProcessAccess::QUERY_AND_READ) {
            Ok(handle) => handle,
            Err(e) if e.is_access_denied() => {
                // system and elevated processes
                debug!(pid, "skipping process, access denied");
                return None;
            }
            Err(e) => {
                warn!(pid, "skipping process, failed to open: {}", e);
                return None;
            }
        };

        let name = match self
            .names
            .query("process name", |buffer| self.api.image_base_name(&handle, buffer))
        {
            Ok(wide) => extract_filename(&wide_to_string(&wide)),
            Err(e) => {
                warn!(pid, "skipping process, failed to get its filename: {}", e);
                return None;
            }
        };

        if name.is_empty() {
            return None;
        }

        Some(ProcessRecord::new(name, pid))
    }
}

/// Enumerate all running processes that can be named
pub fn list_processes<A: ProcessApi>(api: &A) -> MemoryResult<Vec<ProcessRecord>> {
    ProcessInventory::new(api).list_processes()
}
