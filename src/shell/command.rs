/*!
 * Shell Commands
 * Parsing of the textual command vocabulary
 */

use super::errors::ShellError;
use crate::core::types::Units;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// One parsed command line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    Init,
    Quit,
    Create { name: String, priority: u8 },
    Destroy { name: String },
    Request { resource: String, units: Units },
    Release { resource: String, units: Units },
    Timeout,
}

impl Command {
    /// Command word as written in scripts
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Quit => "quit",
            Self::Create { .. } => "cr",
            Self::Destroy { .. } => "de",
            Self::Request { .. } => "req",
            Self::Release { .. } => "rel",
            Self::Timeout => "to",
        }
    }
}

impl FromStr for Command {
    type Err = ShellError;

    /// Parse a non-blank line; extra trailing tokens are ignored
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let word = tokens.next().unwrap_or_default();

        let mut arg = |name: &'static str| {
            tokens.next().ok_or_else(|| ShellError::MissingArgument {
                command: keyword(word),
                name,
            })
        };

        match word.to_ascii_lowercase().as_str() {
            "init" => Ok(Self::Init),
            "quit" => Ok(Self::Quit),
            "to" => Ok(Self::Timeout),
            "cr" => {
                let name = arg("name")?.to_string();
                let priority = number(arg("priority")?)?;
                Ok(Self::Create { name, priority })
            }
            "de" => Ok(Self::Destroy {
                name: arg("name")?.to_string(),
            }),
            "req" => {
                let resource = arg("resource")?.to_string();
                let units = number(arg("units")?)?;
                Ok(Self::Request { resource, units })
            }
            "rel" => {
                let resource = arg("resource")?.to_string();
                let units = number(arg("units")?)?;
                Ok(Self::Release { resource, units })
            }
            _ => Err(ShellError::InvalidOperation(word.to_string())),
        }
    }
}

fn keyword(word: &str) -> String {
    word.to_ascii_lowercase()
}

fn number<T: FromStr>(token: &str) -> Result<T, ShellError> {
    token
        .parse()
        .map_err(|_| ShellError::InvalidArgument(token.to_string()))
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create { name, priority } => write!(f, "cr {name} {priority}"),
            Self::Destroy { name } => write!(f, "de {name}"),
            Self::Request { resource, units } => write!(f, "req {resource} {units}"),
            Self::Release { resource, units } => write!(f, "rel {resource} {units}"),
            other => f.write_str(other.keyword()),
        }
    }
}
