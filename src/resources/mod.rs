/*!
 * Resources Module
 * Finite resource pools with FIFO waiting queues
 */

pub mod table;
pub mod types;

pub use table::ResourceTable;
pub use types::{ResourceControlBlock, ResourceId, Waiter};
