/*!
 * Ready Queue Operations
 * Enqueue, remove, pick and rotate
 */

use super::ReadyQueues;
use crate::core::types::{Pid, Priority};

impl ReadyQueues {
    /// Append to the tail of a priority class
    #[inline]
    pub fn push_back(&mut self, priority: Priority, pid: Pid) {
        self.queues[priority.index()].push_back(pid);
    }

    /// Remove a process from its class queue
    pub fn remove(&mut self, priority: Priority, pid: Pid) -> bool {
        let queue = &mut self.queues[priority.index()];
        match queue.iter().position(|p| *p == pid) {
            Some(pos) => queue.remove(pos).is_some(),
            None => false,
        }
    }

    /// Scheduling decision: head of the highest non-empty queue
    pub fn highest(&self) -> Option<Pid> {
        Priority::DESCENDING
            .iter()
            .find_map(|p| self.queues[p.index()].front().copied())
    }

    /// Highest time-sliced class with a queued process
    pub fn first_preemptible(&self) -> Option<Priority> {
        Priority::PREEMPTIBLE
            .iter()
            .copied()
            .find(|p| !self.queues[p.index()].is_empty())
    }

    /// Move the head of a class to its tail, returning the moved process
    pub fn rotate(&mut self, priority: Priority) -> Option<Pid> {
        let queue = &mut self.queues[priority.index()];
        let head = queue.pop_front()?;
        queue.push_back(head);
        Some(head)
    }
}
