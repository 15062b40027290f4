/*!
 * Shell Session
 * Executes commands against one kernel and records the transcript
 */

use super::command::Command;
use super::errors::SessionError;
use super::transcript::{Entry, Transcript};
use crate::kernel::Kernel;
use crate::monitoring::CommandSpan;
use tracing::{error, info, warn};

/// Command-at-a-time driver over a kernel
#[derive(Debug, Default)]
pub struct Session {
    kernel: Kernel,
    transcript: Transcript,
    check_invariants: bool,
    finished: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kernel(kernel: Kernel) -> Self {
        Self {
            kernel,
            ..Self::default()
        }
    }

    /// Verify kernel invariants after every successful command
    pub fn check_invariants(mut self, enabled: bool) -> Self {
        self.check_invariants = enabled;
        self
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn into_transcript(self) -> Transcript {
        self.transcript
    }

    /// `quit` was seen or a fatal error occurred
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Run one command; `Ok(None)` means nothing is recorded (`quit`)
    pub fn execute(&mut self, command: &Command) -> Result<Option<String>, SessionError> {
        let kernel = &mut self.kernel;
        let outcome = match command {
            Command::Init => kernel.init(),
            Command::Quit => {
                info!("quit requested");
                self.finished = true;
                return Ok(None);
            }
            Command::Create { name, priority } => kernel.create(name, *priority),
            Command::Destroy { name } => kernel.destroy(name),
            Command::Request { resource, units } => kernel.request(resource, *units),
            Command::Release { resource, units } => kernel.release(resource, *units),
            Command::Timeout => kernel.timeout(),
        };
        outcome?;

        if self.check_invariants {
            self.kernel.check_invariants()?;
        }
        Ok(Some(self.kernel.running_name().to_string()))
    }

    /// Parse and run one script line, recording its outcome
    ///
    /// Blank lines and lines after `quit` produce no entry.
    pub fn feed_line(&mut self, line_no: usize, line: &str) -> Option<&Entry> {
        let text = line.trim();
        if text.is_empty() || self.finished {
            return None;
        }

        let span = CommandSpan::new(line_no, text);
        let _entered = span.enter();

        let result = text
            .parse::<Command>()
            .map_err(SessionError::from)
            .and_then(|command| self.execute(&command));

        let entry = match result {
            Ok(None) => return None,
            Ok(Some(running)) => {
                span.record_running(&running);
                Entry::success(line_no, text.to_string(), running)
            }
            Err(err) => {
                span.record_error(&err.to_string());
                if err.is_fatal() {
                    error!(line = line_no, error = %err, "fatal kernel error, ending session");
                    self.finished = true;
                } else {
                    warn!(line = line_no, error = %err, "command failed");
                }
                Entry::failure(line_no, text.to_string(), err)
            }
        };

        self.transcript.push(entry);
        self.transcript.last()
    }

    /// Run every line of a script
    pub fn run_script(&mut self, script: &str) -> &Transcript {
        for (i, line) in script.lines().enumerate() {
            if self.finished {
                break;
            }
            self.feed_line(i + 1, line);
        }
        &self.transcript
    }
}
