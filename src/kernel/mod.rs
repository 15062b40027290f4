/*!
 * Kernel
 * Process and resource manager: owns the process tree, the resource table
 * and the ready queues, and recomputes the running process after every
 * mutation
 */

use crate::core::limits::INIT_PRIORITY;
use crate::core::types::{KernelResult, Pid};
use crate::process::{ProcessControlBlock, ProcessTable, ReadyQueues};
use crate::resources::ResourceTable;
use serde::{Deserialize, Serialize};
use tracing::info;

mod allocator;
mod lifecycle;
mod scheduling;
mod shared;
mod status;

pub use shared::SharedKernel;
pub use status::{KernelStatus, ProcessInfo, ReadyQueueInfo, ResourceInfo, WaiterInfo};

/// Operation counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct KernelStats {
    pub created: u64,
    pub destroyed: u64,
    pub grants: u64,
    pub blocks: u64,
    pub wakeups: u64,
    pub timeouts: u64,
    pub context_switches: u64,
}

/// Process and resource manager
///
/// Methods take `&mut self`: one operation at a time, each running to
/// completion. Wrap in [`SharedKernel`] to share between owners.
#[derive(Debug, Clone)]
pub struct Kernel {
    processes: ProcessTable,
    resources: ResourceTable,
    ready: ReadyQueues,
    running: Pid,
    stats: KernelStats,
}

impl Kernel {
    /// Create a kernel in its initial state: init running, all units free
    pub fn new() -> Self {
        let processes = ProcessTable::new();
        let root = processes.root();
        let mut kernel = Self {
            processes,
            resources: ResourceTable::default(),
            ready: ReadyQueues::new(),
            running: root,
            stats: KernelStats::default(),
        };
        kernel.ready.push_back(INIT_PRIORITY, root);
        kernel.mark_running(root);
        kernel
    }

    /// Reset to the initial state (`init` command)
    pub fn init(&mut self) -> KernelResult<Pid> {
        *self = Self::new();
        info!(running = %self.running_name(), "kernel initialized");
        Ok(self.running)
    }

    /// Handle of the running process
    #[inline(always)]
    pub fn running(&self) -> Pid {
        self.running
    }

    /// Name of the running process
    pub fn running_name(&self) -> &str {
        self.processes.name(self.running)
    }

    /// Handle of the init process
    #[inline(always)]
    pub fn init_pid(&self) -> Pid {
        self.processes.root()
    }

    /// Find a live process by name (depth-first from init)
    pub fn find(&self, name: &str) -> Option<Pid> {
        self.processes.find_by_name(name)
    }

    pub fn process(&self, pid: Pid) -> Option<&ProcessControlBlock> {
        self.processes.get(pid)
    }

    pub fn process_count(&self) -> usize {
        self.processes.len()
    }

    pub fn resources(&self) -> &ResourceTable {
        &self.resources
    }

    pub fn ready_queues(&self) -> &ReadyQueues {
        &self.ready
    }

    pub fn stats(&self) -> KernelStats {
        self.stats
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::new()
    }
}
