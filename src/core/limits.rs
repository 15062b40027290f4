/*!
 * System Limits and Constants
 *
 * Centralized location for the fixed kernel configuration: the resource
 * pool, the init process identity and command vocabulary bounds.
 */

use super::types::{Priority, Units};

// =============================================================================
// PROCESS
// =============================================================================

/// Name of the root process created by `init`
pub const INIT_PROCESS_NAME: &str = "init";

/// Priority class of the root process
pub const INIT_PRIORITY: Priority = Priority::Init;

/// Number of ready queues (one per priority class)
pub const PRIORITY_CLASSES: usize = 3;

// =============================================================================
// RESOURCES
// =============================================================================

/// Resource pool created at initialization: (id, maximum units)
/// Fixed for the lifetime of a kernel; never resized at runtime
pub const RESOURCE_POOL: [(&str, Units); 4] = [("R1", 1), ("R2", 2), ("R3", 3), ("R4", 4)];

// =============================================================================
// DRIVER
// =============================================================================

/// Environment variable enabling JSON log output
pub const TRACE_JSON_ENV: &str = "PRM_TRACE_JSON";

/// Environment fallback for the driver's input script
pub const INPUT_ENV: &str = "PRM_INPUT";

/// Environment fallback for the driver's transcript destination
pub const OUTPUT_ENV: &str = "PRM_OUTPUT";
