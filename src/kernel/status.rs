/*!
 * Kernel Status
 * Serializable snapshots and invariant verification
 */

use super::{Kernel, KernelStats};
use crate::core::errors::KernelError;
use crate::core::types::{KernelResult, Priority, Units};
use crate::process::{Location, ProcessControlBlock, ProcessState};
use crate::resources::ResourceControlBlock;
use serde::Serialize;

/// Snapshot of one process
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessInfo {
    pub name: String,
    pub priority: Priority,
    pub state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub holdings: Vec<(String, Units)>,
}

/// Snapshot of one blocked request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaiterInfo {
    pub process: String,
    pub units: Units,
}

/// Snapshot of one resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceInfo {
    pub name: String,
    pub max: Units,
    pub available: Units,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub waiting: Vec<WaiterInfo>,
}

/// Snapshot of one ready queue, head first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadyQueueInfo {
    pub priority: Priority,
    pub processes: Vec<String>,
}

/// Whole-kernel status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KernelStatus {
    pub running: String,
    pub ready: Vec<ReadyQueueInfo>,
    /// Depth-first from init
    pub processes: Vec<ProcessInfo>,
    pub resources: Vec<ResourceInfo>,
    pub stats: KernelStats,
}

impl Kernel {
    /// Snapshot a process by name
    pub fn process_info(&self, name: &str) -> KernelResult<ProcessInfo> {
        self.find(name)
            .and_then(|pid| self.processes.get(pid))
            .map(|pcb| self.describe_process(pcb))
            .ok_or_else(|| KernelError::ProcessNotFound(name.to_string()))
    }

    /// Snapshot a resource by (case-insensitive) name
    pub fn resource_info(&self, name: &str) -> KernelResult<ResourceInfo> {
        self.resources
            .lookup(name)
            .map(|rid| self.describe_resource(self.resources.get(rid)))
            .ok_or_else(|| KernelError::ResourceNotFound(name.to_string()))
    }

    pub fn status(&self) -> KernelStatus {
        let ready = Priority::DESCENDING
            .iter()
            .map(|&priority| ReadyQueueInfo {
                priority,
                processes: self
                    .ready
                    .queue(priority)
                    .iter()
                    .map(|pid| self.processes.name(*pid).to_string())
                    .collect(),
            })
            .collect();

        let processes = self
            .processes
            .dfs_from(self.processes.root())
            .into_iter()
            .filter_map(|pid| self.processes.get(pid))
            .map(|pcb| self.describe_process(pcb))
            .collect();

        KernelStatus {
            running: self.running_name().to_string(),
            ready,
            processes,
            resources: self
                .resources
                .iter()
                .map(|rcb| self.describe_resource(rcb))
                .collect(),
            stats: self.stats,
        }
    }

    fn describe_process(&self, pcb: &ProcessControlBlock) -> ProcessInfo {
        let (state, blocked_on) = match pcb.state {
            ProcessState::Ready => ("ready", None),
            ProcessState::Running => ("running", None),
            ProcessState::Blocked { on } => {
                ("blocked", Some(self.resources.get(on).name().to_string()))
            }
        };

        ProcessInfo {
            name: pcb.name.to_string(),
            priority: pcb.priority,
            state,
            blocked_on,
            parent: pcb.parent.map(|p| self.processes.name(p).to_string()),
            children: pcb
                .children
                .iter()
                .map(|c| self.processes.name(*c).to_string())
                .collect(),
            holdings: pcb
                .holdings
                .iter()
                .map(|h| (self.resources.get(h.resource).name().to_string(), h.units))
                .collect(),
        }
    }

    fn describe_resource(&self, rcb: &ResourceControlBlock) -> ResourceInfo {
        ResourceInfo {
            name: rcb.name().to_string(),
            max: rcb.max(),
            available: rcb.available(),
            waiting: rcb
                .waiters()
                .map(|w| WaiterInfo {
                    process: self.processes.name(w.pid).to_string(),
                    units: w.units,
                })
                .collect(),
        }
    }

    /// Verify the global invariants, reporting the first violation
    pub fn check_invariants(&self) -> KernelResult<()> {
        let violation = |msg: String| Err(KernelError::InvariantViolation(msg));

        // Exactly one running process, and it is the scheduler's choice
        let running: Vec<_> = self.processes.iter().filter(|p| p.is_running()).collect();
        if running.len() != 1 || running[0].pid != self.running {
            return violation(format!("{} processes marked running", running.len()));
        }
        if self.ready.highest() != Some(self.running) {
            return violation(format!(
                "running process {} is not the head of the highest ready queue",
                self.running_name()
            ));
        }

        // Tree: connected from init, parent links agree with child lists
        let reachable = self.processes.dfs_from(self.processes.root());
        if reachable.len() != self.processes.len() {
            return violation(format!(
                "{} of {} processes reachable from init",
                reachable.len(),
                self.processes.len()
            ));
        }
        for pcb in self.processes.iter() {
            let linked = match pcb.parent {
                None => pcb.pid == self.processes.root(),
                Some(parent) => self
                    .processes
                    .get(parent)
                    .is_some_and(|p| p.children.iter().filter(|c| **c == pcb.pid).count() == 1),
            };
            if !linked {
                return violation(format!("process {} has a broken parent link", pcb.name));
            }
        }

        // Queue membership matches state
        for pcb in self.processes.iter() {
            let in_ready = self.ready.occurrences(pcb.pid);
            let in_waiting: usize = self
                .resources
                .iter()
                .map(|r| r.waiters().filter(|w| w.pid == pcb.pid).count())
                .sum();
            let consistent = match pcb.location() {
                Location::Ready(priority) => {
                    in_ready == 1 && in_waiting == 0 && self.ready.queue(priority).contains(&pcb.pid)
                }
                Location::Waiting(rid) => {
                    in_ready == 0
                        && in_waiting == 1
                        && self.resources.get(rid).waiters().any(|w| w.pid == pcb.pid)
                }
            };
            if !consistent {
                return violation(format!(
                    "process {} is in {} ready and {} waiting queues",
                    pcb.name, in_ready, in_waiting
                ));
            }
        }
        if self.ready.len() + self.resources.iter().map(|r| r.waiting_len()).sum::<usize>()
            != self.processes.len()
        {
            return violation("queues reference destroyed processes".to_string());
        }

        // Conservation: available + held == max
        for rcb in self.resources.iter() {
            let held: Units = self
                .processes
                .iter()
                .map(|p| p.held(rcb.id()))
                .sum();
            if rcb.available() + held != rcb.max() {
                return violation(format!(
                    "{}: {} available + {} held != {} max",
                    rcb.name(),
                    rcb.available(),
                    held,
                    rcb.max()
                ));
            }
        }

        for pcb in self.processes.iter() {
            for (i, h) in pcb.holdings.iter().enumerate() {
                if h.units == 0 || pcb.holdings[i + 1..].iter().any(|o| o.resource == h.resource) {
                    return violation(format!("process {} has a malformed holding", pcb.name));
                }
            }
        }

        Ok(())
    }
}
