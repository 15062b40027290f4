/*!
 * Script Driver
 * Reads a command script, runs it, writes the transcript
 */

use super::session::Session;
use super::transcript::{OutputFormat, Transcript};
use crate::core::limits::{INPUT_ENV, OUTPUT_ENV};
use anyhow::{Context, Result};
use clap::Parser;
use std::io::{Read, Write};
use std::path::PathBuf;
use tracing::info;

/// Process and resource manager simulator
#[derive(Debug, Clone, Parser)]
#[command(name = "prm", version, about)]
pub struct DriverConfig {
    /// Command script to run (stdin when omitted)
    #[arg(short, long, env = INPUT_ENV)]
    pub input: Option<PathBuf>,

    /// Transcript destination (stdout when omitted)
    #[arg(short, long, env = OUTPUT_ENV)]
    pub output: Option<PathBuf>,

    /// Transcript format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Verify kernel invariants after every successful command
    #[arg(long)]
    pub check_invariants: bool,
}

/// Run a script end to end
pub fn run(config: &DriverConfig) -> Result<Transcript> {
    let script = match &config.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read script from stdin")?;
            buf
        }
    };

    let mut session = Session::new().check_invariants(config.check_invariants);
    session.run_script(&script);
    let transcript = session.into_transcript();

    let rendered = transcript
        .render(config.format)
        .context("failed to render transcript")?;

    match &config.output {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("failed to write transcript {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .and_then(|()| stdout.flush())
                .context("failed to write transcript to stdout")?;
        }
    }

    info!(
        commands = transcript.len(),
        errors = transcript.error_count(),
        "script complete"
    );
    Ok(transcript)
}
