/*!
 * Process Table
 * Arena of process control blocks forming the process tree
 */

use super::types::ProcessControlBlock;
use crate::core::limits::{INIT_PRIORITY, INIT_PROCESS_NAME};
use crate::core::types::{Pid, Priority, ProcessName};
use ahash::AHashMap;

/// Process arena
///
/// Parent and child links are stored as [`Pid`] handles; the table owns
/// every control block. The root is the init process.
#[derive(Debug, Clone)]
pub struct ProcessTable {
    processes: AHashMap<Pid, ProcessControlBlock>,
    next_pid: u32,
    root: Pid,
}

impl ProcessTable {
    /// Create a table holding only the init process
    pub fn new() -> Self {
        let root = Pid(0);
        let mut processes = AHashMap::new();
        processes.insert(
            root,
            ProcessControlBlock::new(root, INIT_PROCESS_NAME.into(), INIT_PRIORITY, None),
        );
        Self {
            processes,
            next_pid: 1,
            root,
        }
    }

    #[inline(always)]
    pub fn root(&self) -> Pid {
        self.root
    }

    pub fn get(&self, pid: Pid) -> Option<&ProcessControlBlock> {
        self.processes.get(&pid)
    }

    pub fn get_mut(&mut self, pid: Pid) -> Option<&mut ProcessControlBlock> {
        self.processes.get_mut(&pid)
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.processes.contains_key(&pid)
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Name of a live process, or an empty string for a stale handle
    pub fn name(&self, pid: Pid) -> &str {
        self.processes.get(&pid).map_or("", |p| p.name.as_str())
    }

    /// Allocate a new Ready process and append it to `parent`'s children
    ///
    /// Returns `None` if the parent does not exist; nothing is inserted then.
    pub fn insert(&mut self, name: ProcessName, priority: Priority, parent: Pid) -> Option<Pid> {
        let pid = Pid(self.next_pid);
        self.processes.get_mut(&parent)?.children.push(pid);
        self.next_pid += 1;
        self.processes
            .insert(pid, ProcessControlBlock::new(pid, name, priority, Some(parent)));
        Some(pid)
    }

    /// Depth-first search from the root, children in creation order
    pub fn find_by_name(&self, name: &str) -> Option<Pid> {
        self.dfs_from(self.root)
            .into_iter()
            .find(|pid| self.name(*pid) == name)
    }

    /// Pre-order walk of the subtree rooted at `start`
    pub fn dfs_from(&self, start: Pid) -> Vec<Pid> {
        let mut order = Vec::with_capacity(self.processes.len());
        let mut stack = vec![start];
        while let Some(pid) = stack.pop() {
            let Some(pcb) = self.processes.get(&pid) else {
                continue;
            };
            order.push(pid);
            // Reverse so the first child is visited first
            stack.extend(pcb.children.iter().rev().copied());
        }
        order
    }

    /// Post-order walk: every child appears before its parent
    pub fn subtree_post_order(&self, start: Pid) -> Vec<Pid> {
        let mut order = Vec::new();
        let mut stack = vec![(start, false)];
        while let Some((pid, expanded)) = stack.pop() {
            if expanded {
                order.push(pid);
                continue;
            }
            let Some(pcb) = self.processes.get(&pid) else {
                continue;
            };
            stack.push((pid, true));
            stack.extend(pcb.children.iter().rev().map(|c| (*c, false)));
        }
        order
    }

    /// Drop a process from the arena and unlink it from its parent
    ///
    /// Children are not touched; callers remove them first.
    pub fn remove(&mut self, pid: Pid) -> Option<ProcessControlBlock> {
        let pcb = self.processes.remove(&pid)?;
        if let Some(parent) = pcb.parent.and_then(|p| self.processes.get_mut(&p)) {
            parent.children.retain(|c| *c != pid);
        }
        Some(pcb)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProcessControlBlock> {
        self.processes.values()
    }
}

impl Default for ProcessTable {
    fn default() -> Self {
        Self::new()
    }
}
