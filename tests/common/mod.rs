//! Scripted process table shared by the integration tests

#![allow(dead_code)]

use peerdump::core::types::{DumpFlags, MemoryError, MemoryResult, ProcessId};
use peerdump::dump::{DumpApi, DumpTarget};
use peerdump::process::{ProcessAccess, ProcessApi};
use std::cell::RefCell;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

/// A process the fake OS knows about; `None` means it can't be opened
pub struct FakeProcess {
    pub pid: ProcessId,
    pub image: Option<&'static str>,
}

pub struct FakeSystem {
    pub own_pid: ProcessId,
    pub own_path: &'static str,
    pub processes: Vec<FakeProcess>,
    pub temp_dir: Option<PathBuf>,
    /// Pids that can be opened once, then refuse access
    pub open_once: Vec<ProcessId>,
    pub opens: RefCell<Vec<ProcessId>>,
    pub dumped: RefCell<Vec<Option<ProcessId>>>,
}

impl FakeSystem {
    pub fn new(own_pid: ProcessId, own_path: &'static str) -> Self {
        FakeSystem {
            own_pid,
            own_path,
            processes: Vec::new(),
            temp_dir: None,
            open_once: Vec::new(),
            opens: RefCell::new(Vec::new()),
            dumped: RefCell::new(Vec::new()),
        }
    }

    pub fn process(mut self, pid: ProcessId, image: &'static str) -> Self {
        self.processes.push(FakeProcess {
            pid,
            image: Some(image),
        });
        self
    }

    pub fn protected(mut self, pid: ProcessId) -> Self {
        self.processes.push(FakeProcess { pid, image: None });
        self
    }
}

fn copy_wide(text: &str, buffer: &mut [u16]) -> usize {
    let wide: Vec<u16> = text.encode_utf16().collect();
    let n = wide.len().min(buffer.len());
    buffer[..n].copy_from_slice(&wide[..n]);
    n
}

impl ProcessApi for FakeSystem {
    type Handle = ProcessId;

    fn enum_process_ids(&self, buffer: &mut [ProcessId]) -> MemoryResult<usize> {
        for (slot, process) in buffer.iter_mut().zip(&self.processes) {
            *slot = process.pid;
        }
        Ok(self.processes.len().min(buffer.len()))
    }

    fn open_process(&self, pid: ProcessId, _access: ProcessAccess) -> MemoryResult<ProcessId> {
        let reopened = self.opens.borrow().contains(&pid);
        self.opens.borrow_mut().push(pid);
        if reopened && self.open_once.contains(&pid) {
            return Err(MemoryError::access_denied(pid, "Access is denied."));
        }

        match self.processes.iter().find(|p| p.pid == pid) {
            Some(FakeProcess { image: Some(_), .. }) => Ok(pid),
            Some(_) => Err(MemoryError::access_denied(pid, "Access is denied.")),
            None => Err(MemoryError::system_call("OpenProcess", 87, "The parameter is incorrect.")),
        }
    }

    fn image_base_name(&self, handle: &ProcessId, buffer: &mut [u16]) -> MemoryResult<usize> {
        let image = self
            .processes
            .iter()
            .find(|p| p.pid == *handle)
            .and_then(|p| p.image)
            .ok_or_else(|| MemoryError::system_call("GetModuleBaseNameW", 6, "The handle is invalid."))?;
        Ok(copy_wide(image, buffer))
    }

    fn own_image_path(&self, buffer: &mut [u16]) -> MemoryResult<usize> {
        Ok(copy_wide(self.own_path, buffer))
    }

    fn current_process_id(&self) -> ProcessId {
        self.own_pid
    }
}

impl DumpApi for FakeSystem {
    fn temp_dir(&self) -> MemoryResult<PathBuf> {
        self.temp_dir
            .clone()
            .ok_or_else(|| MemoryError::system_call("GetTempPathW", 3, "path not found"))
    }

    fn write_dump(
        &self,
        target: &DumpTarget<ProcessId>,
        mut file: &File,
        _flags: DumpFlags,
    ) -> MemoryResult<()> {
        self.dumped.borrow_mut().push(target.pid());
        file.write_all(b"MDMP")?;
        Ok(())
    }
}
