/*!
 * Process & Resource Manager Kernel
 * Priority scheduler over a finite-resource allocator and a process tree
 */

pub mod core;
pub mod kernel;
pub mod monitoring;
pub mod process;
pub mod resources;
pub mod shell;

// Re-exports
pub use crate::core::errors::{ErrorKind, KernelError};
pub use crate::core::types::{KernelResult, Pid, Priority, Units};
pub use kernel::{Kernel, KernelStats, KernelStatus, SharedKernel};
pub use monitoring::init_tracing;
pub use process::{ProcessControlBlock, ProcessState};
pub use resources::ResourceId;
pub use shell::{Command, DriverConfig, OutputFormat, Session, SessionError, ShellError, Transcript};
