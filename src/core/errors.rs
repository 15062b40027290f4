/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::Units;

/// Error taxonomy reported to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Conflict,
    NotFound,
    State,
    Permission,
}

/// Kernel operation errors with serialization support
///
/// Every variant except [`KernelError::NoRunnableProcess`] is raised before
/// any state is touched, so a failed operation leaves the kernel unchanged.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum KernelError {
    #[error("priority must be 1 or 2, got {0}")]
    #[diagnostic(
        code(process::invalid_priority),
        help("Level 0 is reserved for the init process.")
    )]
    InvalidPriority(u8),

    #[error("invalid process name: {0:?}")]
    #[diagnostic(
        code(process::invalid_name),
        help("Process names must be non-empty and contain no whitespace.")
    )]
    InvalidName(String),

    #[error("duplicate process name: {0}")]
    #[diagnostic(
        code(process::duplicate_name),
        help("Process names are unique across the whole process tree.")
    )]
    DuplicateProcess(String),

    #[error("process does not exist: {0}")]
    #[diagnostic(
        code(process::not_found),
        help("The process may have been destroyed along with an ancestor.")
    )]
    ProcessNotFound(String),

    #[error("cannot destroy the init process")]
    #[diagnostic(
        code(process::init_not_destroyable),
        help("The init process is the idle fallback and lives as long as the kernel.")
    )]
    InitNotDestroyable,

    #[error("non-existent resource: {0}")]
    #[diagnostic(code(resource::not_found), help("Known resources are R1, R2, R3 and R4."))]
    ResourceNotFound(String),

    #[error("units must be positive: 0/{resource}")]
    #[diagnostic(code(resource::zero_units))]
    ZeroUnits { resource: String },

    #[error("request too many units: {units}/{resource}")]
    #[diagnostic(
        code(resource::request_too_large),
        help("Requests may not exceed the resource maximum ({max}).")
    )]
    RequestTooLarge {
        resource: String,
        units: Units,
        max: Units,
    },

    #[error("release too many units: {units}/{resource}:{allowed}")]
    #[diagnostic(
        code(resource::release_too_large),
        help("Only units currently held by the running process can be released.")
    )]
    ReleaseTooLarge {
        resource: String,
        units: Units,
        allowed: Units,
    },

    #[error("not holding resource: {resource}")]
    #[diagnostic(code(resource::not_holding))]
    NotHolding { process: String, resource: String },

    #[error("init process cannot block on {resource} ({units} units unavailable)")]
    #[diagnostic(
        code(resource::init_cannot_block),
        help("The init process is the scheduling fallback and must stay runnable.")
    )]
    InitCannotBlock { resource: String, units: Units },

    #[error("no process runnable")]
    #[diagnostic(
        code(scheduler::no_runnable_process),
        help("The init process disappeared from the ready queues. This is a kernel defect.")
    )]
    NoRunnableProcess,

    #[error("invariant violated: {0}")]
    #[diagnostic(code(kernel::invariant_violation))]
    InvariantViolation(String),
}

impl KernelError {
    /// Taxonomy bucket for this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPriority(_)
            | Self::InvalidName(_)
            | Self::ZeroUnits { .. }
            | Self::RequestTooLarge { .. }
            | Self::ReleaseTooLarge { .. } => ErrorKind::Validation,
            Self::DuplicateProcess(_) => ErrorKind::Conflict,
            Self::ProcessNotFound(_) | Self::ResourceNotFound(_) => ErrorKind::NotFound,
            Self::NotHolding { .. }
            | Self::InitCannotBlock { .. }
            | Self::NoRunnableProcess
            | Self::InvariantViolation(_) => ErrorKind::State,
            Self::InitNotDestroyable => ErrorKind::Permission,
        }
    }

    /// Unrecoverable scheduler failure; the kernel must be reinitialized
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::NoRunnableProcess | Self::InvariantViolation(_))
    }
}
