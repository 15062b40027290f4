/*!
 * Monitoring Module
 * Structured logging for kernel operations
 */

pub mod tracer;

pub use tracer::{init_tracing, CommandSpan};
