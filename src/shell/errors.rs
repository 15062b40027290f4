/*!
 * Shell Errors
 * Parse failures and the combined error recorded in transcripts
 */

use crate::core::errors::KernelError;
use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

/// Command-line parse errors; never reach the kernel
#[derive(Error, Debug, Clone, Serialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ShellError {
    #[error("invalid operation: {0}")]
    #[diagnostic(
        code(shell::invalid_operation),
        help("Valid commands: init, quit, cr, de, req, rel, to.")
    )]
    InvalidOperation(String),

    #[error("{command}: missing argument <{name}>")]
    #[diagnostic(code(shell::missing_argument))]
    MissingArgument { command: String, name: &'static str },

    #[error("invalid argument: {0}")]
    #[diagnostic(
        code(shell::invalid_argument),
        help("Priorities and units are non-negative integers.")
    )]
    InvalidArgument(String),
}

/// Error recorded for a failed command
#[derive(Error, Debug, Clone, Serialize, PartialEq, Eq, Diagnostic)]
#[serde(rename_all = "snake_case")]
pub enum SessionError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Shell(#[from] ShellError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Kernel(#[from] KernelError),
}

impl SessionError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Kernel(err) if err.is_fatal())
    }
}
