//! Finds another running instance of the current executable

use crate::core::types::{MemoryResult, ProcessId};
use crate::process::api::ProcessApi;
use crate::process::buffer::GrowingBuffer;
use crate::process::inventory::{ProcessInventory, MAX_PATH};
use crate::windows::utils::string_conv::{extract_filename, wide_to_string};
use tracing::{debug, info, warn};

/// Image name assumed when the current process can't be named
pub const DEFAULT_IMAGE_NAME: &str = "ModOrganizer.exe";

/// Looks for a process with the same image name and a different pid
pub struct PeerLocator<'a, A: ProcessApi> {
    api: &'a A,
    default_image_name: String,
    ids: Option<GrowingBuffer>,
    names: GrowingBuffer,
}

impl<'a, A: ProcessApi> PeerLocator<'a, A> {
    pub fn new(api: &'a A) -> Self {
        PeerLocator {
            api,
            default_image_name: DEFAULT_IMAGE_NAME.to_string(),
            ids: None,
            names: GrowingBuffer::new(MAX_PATH),
        }
    }

    /// Name used when the own image name can't be resolved
    pub fn with_default_image_name(mut self, name: impl Into<String>) -> Self {
        self.default_image_name = name.into();
        self
    }

    /// Use custom growth policies for id and name queries
    pub fn with_buffers(mut self, ids: GrowingBuffer, names: GrowingBuffer) -> Self {
        self.ids = Some(ids);
        self.names = names;
        self
    }

    /// File name of the current process image
    pub fn own_image_name(&self) -> String {
        let resolved = self
            .names
            .query("current process filename", |buffer| self.api.own_image_path(buffer))
            .map(|wide| extract_filename(&wide_to_string(&wide)));

        match resolved {
            Ok(name) if !name.is_empty() => name,
            Ok(_) => {
                warn!("current process filename is empty, assuming {}", self.default_image_name);
                self.default_image_name.clone()
            }
            Err(e) => {
                warn!(
                    "failed to get filename for the current process, assuming {}: {}",
                    self.default_image_name, e
                );
                self.default_image_name.clone()
            }
        }
    }

    /// Pid of the first other process running the same executable
    ///
    /// `Ok(None)` means the scan ran and found nothing.
    pub fn find_peer(&self) -> MemoryResult<Option<ProcessId>> {
        let filename = self.own_image_name();
        let own_pid = self.api.current_process_id();
        debug!(own_pid, "looking for other processes named {}", filename);

        let mut inventory = ProcessInventory::new(self.api);
        if let Some(ids) = self.ids {
            inventory = inventory.with_buffers(ids, self.names);
        }

        let processes = inventory.list_processes()?;
        info!("there are {} processes running", processes.len());

        if let Some(peer) = processes.iter().find(|p| p.is_peer_of(&filename, own_pid)) {
            info!("found other process {}", peer);
            return Ok(Some(peer.pid));
        }

        info!(
            "no other process named {}; it may not be running, or it may be running \
             as administrator, in which case try again as administrator",
            filename
        );
        Ok(None)
    }
}

/// Find another instance of the current executable with the default settings
pub fn find_peer<A: ProcessApi>(api: &A) -> MemoryResult<Option<ProcessId>> {
    PeerLocator::new(api).find_peer()
}
