/*!
 * Resource Types
 * Resource control blocks and their FIFO waiting queues
 */

use crate::core::types::{Pid, Units};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Index of a resource in the resource table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub(crate) u8);

impl ResourceId {
    #[inline(always)]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Blocked request parked on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Waiter {
    pub pid: Pid,
    pub units: Units,
}

/// Resource control block
///
/// `available` plus the units held by every process always equals `max`;
/// waiting requests are not counted until they are granted.
#[derive(Debug, Clone)]
pub struct ResourceControlBlock {
    id: ResourceId,
    name: &'static str,
    max: Units,
    available: Units,
    waiting: VecDeque<Waiter>,
}

impl ResourceControlBlock {
    pub fn new(id: ResourceId, name: &'static str, max: Units) -> Self {
        Self {
            id,
            name,
            max,
            available: max,
            waiting: VecDeque::new(),
        }
    }

    #[inline(always)]
    pub fn id(&self) -> ResourceId {
        self.id
    }

    #[inline(always)]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline(always)]
    pub fn max(&self) -> Units {
        self.max
    }

    #[inline(always)]
    pub fn available(&self) -> Units {
        self.available
    }

    /// Units currently granted to processes
    #[inline(always)]
    pub fn allocated(&self) -> Units {
        self.max - self.available
    }

    pub fn waiters(&self) -> impl Iterator<Item = &Waiter> {
        self.waiting.iter()
    }

    pub fn waiting_len(&self) -> usize {
        self.waiting.len()
    }

    #[inline]
    pub fn can_grant(&self, units: Units) -> bool {
        units <= self.available
    }

    /// Take units out of the pool; caller checked `can_grant`
    pub(crate) fn take(&mut self, units: Units) {
        debug_assert!(units <= self.available, "over-allocation of {}", self.name);
        self.available -= units;
    }

    /// Return units to the pool
    pub(crate) fn put(&mut self, units: Units) {
        debug_assert!(self.available + units <= self.max, "over-release of {}", self.name);
        self.available += units;
    }

    pub(crate) fn enqueue(&mut self, waiter: Waiter) {
        self.waiting.push_back(waiter);
    }

    /// Cancel a pending request (the process is being destroyed)
    pub(crate) fn remove_waiter(&mut self, pid: Pid) -> Option<Waiter> {
        let pos = self.waiting.iter().position(|w| w.pid == pid)?;
        self.waiting.remove(pos)
    }

    /// Grant the head of the waiting queue if it fits
    ///
    /// Strict head-of-line: a satisfiable waiter further back is never
    /// served while the head is still too large.
    pub(crate) fn grant_head(&mut self) -> Option<Waiter> {
        let head = *self.waiting.front()?;
        if head.units > self.available {
            return None;
        }
        self.waiting.pop_front();
        self.available -= head.units;
        Some(head)
    }
}
