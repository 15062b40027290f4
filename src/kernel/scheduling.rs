/*!
 * Scheduling
 * Running-process selection and time-slice expiry
 */

use super::Kernel;
use crate::core::errors::KernelError;
use crate::core::types::{KernelResult, Pid};
use crate::process::ProcessState;
use tracing::{debug, error, info};

impl Kernel {
    /// Recompute the running process from the ready queues
    ///
    /// Final step of every mutating operation. The init queue is never
    /// empty, so failing to find a candidate is a fatal defect.
    pub(crate) fn schedule(&mut self) -> KernelResult<Pid> {
        let Some(candidate) = self.ready.highest() else {
            error!("ready queues are empty, init process is gone");
            return Err(KernelError::NoRunnableProcess);
        };

        if candidate != self.running {
            let previous = self.running;
            // A destroyed or blocked predecessor keeps whatever state it has
            if let Some(prev) = self.processes.get_mut(previous) {
                if prev.is_running() {
                    prev.state = ProcessState::Ready;
                }
            }
            self.stats.context_switches += 1;
            debug!(
                from = %self.processes.name(previous),
                to = %self.processes.name(candidate),
                "context switch"
            );
        }

        self.mark_running(candidate);
        Ok(candidate)
    }

    pub(super) fn mark_running(&mut self, pid: Pid) {
        if let Some(pcb) = self.processes.get_mut(pid) {
            pcb.state = ProcessState::Running;
        }
        self.running = pid;
    }

    /// Time-slice expiry (`to` command)
    ///
    /// Rotates the highest non-empty user class (High, then Low). The init
    /// process is never time-sliced, so with only init ready this is a no-op.
    pub fn timeout(&mut self) -> KernelResult<Pid> {
        match self.ready.first_preemptible() {
            Some(priority) => {
                if let Some(pid) = self.ready.rotate(priority) {
                    self.stats.timeouts += 1;
                    debug!(
                        process = %self.processes.name(pid),
                        priority = %priority,
                        "time slice expired"
                    );
                }
            }
            None => debug!("timeout with only init ready"),
        }

        let running = self.schedule()?;
        info!(running = %self.processes.name(running), "timeout");
        Ok(running)
    }
}
