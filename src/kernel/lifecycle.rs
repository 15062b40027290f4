/*!
 * Process Lifecycle
 * Create and cascading destroy over the process tree
 */

use super::Kernel;
use crate::core::errors::KernelError;
use crate::core::types::{KernelResult, Pid, Priority};
use crate::process::Location;
use tracing::{debug, info, warn};

impl Kernel {
    /// Create a child of the running process (`cr <name> <priority>`)
    ///
    /// `level` must be 1 (Low) or 2 (High). The name must be unique across
    /// the whole tree.
    pub fn create(&mut self, name: &str, level: u8) -> KernelResult<Pid> {
        let priority = Priority::from_level(level)
            .filter(|p| p.is_user())
            .ok_or(KernelError::InvalidPriority(level))?;

        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(KernelError::InvalidName(name.to_string()));
        }

        if self.processes.find_by_name(name).is_some() {
            warn!(name, "duplicate process name");
            return Err(KernelError::DuplicateProcess(name.to_string()));
        }

        let parent = self.running;
        let pid = self
            .processes
            .insert(name.into(), priority, parent)
            .ok_or(KernelError::NoRunnableProcess)?;
        self.ready.push_back(priority, pid);
        self.stats.created += 1;

        info!(
            name,
            %pid,
            priority = %priority,
            parent = %self.processes.name(parent),
            "process created"
        );

        self.schedule()
    }

    /// Destroy a process and its entire subtree (`de <name>`)
    ///
    /// Children are torn down before their parents. Every held unit is
    /// released as if the process released it itself, which may wake
    /// waiters outside the subtree.
    pub fn destroy(&mut self, name: &str) -> KernelResult<Pid> {
        let pid = self
            .processes
            .find_by_name(name)
            .ok_or_else(|| KernelError::ProcessNotFound(name.to_string()))?;

        if pid == self.processes.root() {
            warn!("refusing to destroy init");
            return Err(KernelError::InitNotDestroyable);
        }

        let doomed = self.processes.subtree_post_order(pid);
        let count = doomed.len();
        for victim in doomed {
            self.teardown(victim);
        }

        info!(name, destroyed = count, "process tree destroyed");
        self.schedule()
    }

    /// Remove one process from its queue, return its units, drop it
    fn teardown(&mut self, pid: Pid) {
        // Read after earlier teardowns: a cascade may have just woken it
        let Some(pcb) = self.processes.get(pid) else {
            return;
        };
        let location = pcb.location();
        let holdings = pcb.holdings.clone();

        match location {
            Location::Ready(priority) => {
                self.ready.remove(priority, pid);
            }
            Location::Waiting(resource) => {
                // Pending request is cancelled; nothing was granted yet
                self.resources.get_mut(resource).remove_waiter(pid);
            }
        }

        for holding in holdings {
            self.release_units(pid, holding.resource, holding.units);
        }

        if let Some(pcb) = self.processes.remove(pid) {
            debug!(name = %pcb.name, %pid, "process torn down");
        }
        self.stats.destroyed += 1;
    }
}
