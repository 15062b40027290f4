/*!
 * Transcript
 * Per-command outcomes accumulated by a session
 */

use super::errors::SessionError;
use serde::Serialize;

/// Output rendering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One line per command: running process or `error: <message>`
    #[default]
    Text,
    /// One JSON object per command
    Json,
}

/// Outcome of one command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// 1-based line number in the script
    pub line: usize,
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub running: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<SessionError>,
}

impl Entry {
    pub fn success(line: usize, command: String, running: String) -> Self {
        Self {
            line,
            command,
            running: Some(running),
            error: None,
        }
    }

    pub fn failure(line: usize, command: String, error: SessionError) -> Self {
        Self {
            line,
            command,
            running: None,
            error: Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Text form: running process name or `error: <message>`
    pub fn render(&self) -> String {
        match (&self.running, &self.error) {
            (_, Some(err)) => format!("error: {err}"),
            (Some(running), None) => running.clone(),
            (None, None) => String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Transcript {
    entries: Vec<Entry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&Entry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_error()).count()
    }

    /// Entries rendered as text, one per line
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(Entry::render).collect()
    }

    pub fn render(&self, format: OutputFormat) -> serde_json::Result<String> {
        let mut out = String::new();
        for entry in &self.entries {
            match format {
                OutputFormat::Text => out.push_str(&entry.render()),
                OutputFormat::Json => out.push_str(&serde_json::to_string(entry)?),
            }
            out.push('\n');
        }
        Ok(out)
    }
}
