/*!
 * Resource Allocator
 * Request and release on behalf of the running process, with the
 * head-of-line waiter cascade
 */

use super::Kernel;
use crate::core::errors::KernelError;
use crate::core::types::{KernelResult, Pid, Units};
use crate::process::ProcessState;
use crate::resources::{ResourceId, Waiter};
use tracing::{debug, info, warn};

impl Kernel {
    /// Request units of a resource for the running process (`req`)
    ///
    /// Grants immediately when enough units are free, otherwise blocks the
    /// running process at the tail of the resource's waiting queue.
    pub fn request(&mut self, resource: &str, units: Units) -> KernelResult<Pid> {
        let rid = self.resolve_resource(resource)?;
        let pid = self.running;
        let rcb = self.resources.get(rid);
        let name = rcb.name();

        if units == 0 {
            return Err(KernelError::ZeroUnits {
                resource: name.to_string(),
            });
        }

        // A request that fits the maximum but never the pool blocks for good
        if units > rcb.max() {
            return Err(KernelError::RequestTooLarge {
                resource: name.to_string(),
                units,
                max: rcb.max(),
            });
        }

        if rcb.can_grant(units) {
            self.resources.get_mut(rid).take(units);
            if let Some(pcb) = self.processes.get_mut(pid) {
                pcb.grant(rid, units);
            }
            self.stats.grants += 1;
            info!(
                process = %self.processes.name(pid),
                resource = name,
                units,
                "request granted"
            );
        } else {
            if pid == self.processes.root() {
                warn!(resource = name, units, "init process cannot block");
                return Err(KernelError::InitCannotBlock {
                    resource: name.to_string(),
                    units,
                });
            }
            self.block(pid, rid, units);
        }

        self.schedule()
    }

    /// Release units held by the running process (`rel`)
    pub fn release(&mut self, resource: &str, units: Units) -> KernelResult<Pid> {
        let rid = self.resolve_resource(resource)?;
        let pid = self.running;
        let rcb = self.resources.get(rid);
        let name = rcb.name();

        let held = self.processes.get(pid).map_or(0, |p| p.held(rid));
        if held == 0 {
            return Err(KernelError::NotHolding {
                process: self.processes.name(pid).to_string(),
                resource: name.to_string(),
            });
        }

        if units == 0 {
            return Err(KernelError::ZeroUnits {
                resource: name.to_string(),
            });
        }

        let allowed = held.min(rcb.max() - rcb.available());
        if units > allowed {
            return Err(KernelError::ReleaseTooLarge {
                resource: name.to_string(),
                units,
                allowed,
            });
        }

        info!(
            process = %self.processes.name(pid),
            resource = name,
            units,
            "release"
        );
        self.release_units(pid, rid, units);
        self.schedule()
    }

    fn resolve_resource(&self, resource: &str) -> KernelResult<ResourceId> {
        self.resources
            .lookup(resource)
            .ok_or_else(|| KernelError::ResourceNotFound(resource.to_string()))
    }

    /// Park the running process on a resource's waiting queue
    fn block(&mut self, pid: Pid, rid: ResourceId, units: Units) {
        if let Some(pcb) = self.processes.get_mut(pid) {
            self.ready.remove(pcb.priority, pid);
            pcb.state = ProcessState::Blocked { on: rid };
        }
        self.resources.get_mut(rid).enqueue(Waiter { pid, units });
        self.stats.blocks += 1;
        info!(
            process = %self.processes.name(pid),
            resource = self.resources.get(rid).name(),
            units,
            "process blocked"
        );
    }

    /// Return units to the pool and wake waiters, without validation
    ///
    /// Shared by `release` and destroy teardown.
    pub(super) fn release_units(&mut self, pid: Pid, rid: ResourceId, units: Units) {
        if let Some(pcb) = self.processes.get_mut(pid) {
            pcb.surrender(rid, units);
        }
        self.resources.get_mut(rid).put(units);
        self.wake_waiters(rid);
    }

    /// Serve the waiting queue from its head while the head fits
    fn wake_waiters(&mut self, rid: ResourceId) {
        while let Some(waiter) = self.resources.get_mut(rid).grant_head() {
            let Some(pcb) = self.processes.get_mut(waiter.pid) else {
                // Stale waiter: hand the units straight back
                self.resources.get_mut(rid).put(waiter.units);
                warn!(pid = %waiter.pid, "dropped waiter for missing process");
                continue;
            };

            pcb.grant(rid, waiter.units);
            pcb.state = ProcessState::Ready;
            let priority = pcb.priority;
            self.ready.push_back(priority, waiter.pid);
            self.stats.wakeups += 1;

            debug!(
                process = %self.processes.name(waiter.pid),
                resource = self.resources.get(rid).name(),
                units = waiter.units,
                "waiter granted"
            );
        }
    }
}
