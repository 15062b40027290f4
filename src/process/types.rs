/*!
 * Process Types
 * Process control blocks, states and queue locations
 */

use crate::core::types::{Pid, Priority, ProcessName, Units};
use crate::resources::ResourceId;
use serde::{Deserialize, Serialize};

/// Process state
///
/// A blocked process carries the resource it waits on, so the state can
/// never disagree with the queue the process is parked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Eligible to run, queued behind the running process
    Ready,
    /// Selected by the scheduler
    Running,
    /// Parked on a resource's waiting queue
    Blocked { on: ResourceId },
}

/// Queue a live process currently belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Ready(Priority),
    Waiting(ResourceId),
}

/// Units of one resource held by a process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    pub resource: ResourceId,
    pub units: Units,
}

/// Process control block
#[derive(Debug, Clone)]
pub struct ProcessControlBlock {
    pub pid: Pid,
    pub name: ProcessName,
    pub priority: Priority,
    pub state: ProcessState,
    pub parent: Option<Pid>,
    pub children: Vec<Pid>,
    /// Acquisition order; at most one entry per resource
    pub holdings: Vec<Holding>,
}

impl ProcessControlBlock {
    #[inline]
    #[must_use]
    pub fn new(pid: Pid, name: ProcessName, priority: Priority, parent: Option<Pid>) -> Self {
        Self {
            pid,
            name,
            priority,
            state: ProcessState::Ready,
            parent,
            children: Vec::new(),
            holdings: Vec::new(),
        }
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.state, ProcessState::Running)
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_blocked(&self) -> bool {
        matches!(self.state, ProcessState::Blocked { .. })
    }

    /// Queue this process must be a member of
    #[inline]
    pub const fn location(&self) -> Location {
        match self.state {
            ProcessState::Ready | ProcessState::Running => Location::Ready(self.priority),
            ProcessState::Blocked { on } => Location::Waiting(on),
        }
    }

    /// Units of `resource` currently held
    pub fn held(&self, resource: ResourceId) -> Units {
        self.holdings
            .iter()
            .find(|h| h.resource == resource)
            .map_or(0, |h| h.units)
    }

    /// Record granted units, merging with an existing holding
    pub(crate) fn grant(&mut self, resource: ResourceId, units: Units) {
        match self.holdings.iter_mut().find(|h| h.resource == resource) {
            Some(holding) => holding.units += units,
            None => self.holdings.push(Holding { resource, units }),
        }
    }

    /// Give back units; the holding disappears when it reaches zero
    pub(crate) fn surrender(&mut self, resource: ResourceId, units: Units) {
        if let Some(pos) = self.holdings.iter().position(|h| h.resource == resource) {
            let holding = &mut self.holdings[pos];
            holding.units = holding.units.saturating_sub(units);
            if holding.units == 0 {
                self.holdings.remove(pos);
            }
        }
    }
}
