/*!
 * Process Module
 * Process control blocks, the process tree and the ready queues
 */

pub mod scheduler;
pub mod table;
pub mod types;

// Re-export for convenience
pub use scheduler::ReadyQueues;
pub use table::ProcessTable;
pub use types::{Holding, Location, ProcessControlBlock, ProcessState};
