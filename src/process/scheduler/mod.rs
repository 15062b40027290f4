/*!
 * Ready Queues
 * One FIFO queue per priority class; the scheduling decision reads them
 */

use crate::core::limits::PRIORITY_CLASSES;
use crate::core::types::{Pid, Priority};
use std::collections::VecDeque;

mod operations;

/// Per-priority ready queues
///
/// Holds every process that is Ready or Running. The running process is
/// always the head of the highest non-empty queue.
#[derive(Debug, Clone, Default)]
pub struct ReadyQueues {
    queues: [VecDeque<Pid>; PRIORITY_CLASSES],
}

impl ReadyQueues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue for one priority class, head first
    pub fn queue(&self, priority: Priority) -> &VecDeque<Pid> {
        &self.queues[priority.index()]
    }

    pub fn len(&self) -> usize {
        self.queues.iter().map(VecDeque::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.iter().all(VecDeque::is_empty)
    }

    /// Number of queues containing `pid` (at most one when consistent)
    pub fn occurrences(&self, pid: Pid) -> usize {
        self.queues
            .iter()
            .map(|q| q.iter().filter(|p| **p == pid).count())
            .sum()
    }
}
