/*!
 * Shell Module
 * Textual command vocabulary, sessions and the script driver
 */

pub mod command;
pub mod driver;
pub mod errors;
pub mod session;
pub mod transcript;

pub use command::Command;
pub use driver::{run, DriverConfig};
pub use errors::{SessionError, ShellError};
pub use session::Session;
pub use transcript::{Entry, OutputFormat, Transcript};
