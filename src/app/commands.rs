//! Inbound commands to the runtime.
//!
//! These represent requests from the outside world (console, editor
//! command palette, tests) that the [`Runtime`](crate::runtime::Runtime)
//! routes to the engine or the scheduler.

use core::fmt;
use core::str::FromStr;

use crate::pet::actions::CareAction;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Feed, play, sleep/wake, or clean.
    Care(CareAction),

    /// Discard the pet and hatch a new egg.
    Reset,

    /// Change the pet's name.
    Rename(String),

    /// Report the current snapshot.
    Status,

    /// Change the live tick interval (milliseconds).
    SetTickInterval(u64),

    /// Save and stop.
    Quit,
}

/// Text that is not a known command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCommandError {
    Empty,
    Unknown(String),
    MissingArgument(&'static str),
    InvalidInterval(String),
}

impl fmt::Display for ParseCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty command"),
            Self::Unknown(word) => write!(f, "unknown command '{}'", word),
            Self::MissingArgument(cmd) => write!(f, "'{}' needs an argument", cmd),
            Self::InvalidInterval(raw) => write!(f, "'{}' is not a number of milliseconds", raw),
        }
    }
}

impl std::error::Error for ParseCommandError {}

impl FromStr for Command {
    type Err = ParseCommandError;

    /// Parse one console line, e.g. `feed`, `rename Mochi`, `interval 5000`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "" => Err(ParseCommandError::Empty),
            "feed" => Ok(Self::Care(CareAction::Feed)),
            "play" => Ok(Self::Care(CareAction::Play)),
            "sleep" | "wake" => Ok(Self::Care(CareAction::Sleep)),
            "clean" => Ok(Self::Care(CareAction::Clean)),
            "reset" => Ok(Self::Reset),
            "status" => Ok(Self::Status),
            "quit" | "exit" => Ok(Self::Quit),
            "rename" if rest.is_empty() => Err(ParseCommandError::MissingArgument("rename")),
            "rename" => Ok(Self::Rename(rest.to_string())),
            "interval" if rest.is_empty() => Err(ParseCommandError::MissingArgument("interval")),
            "interval" => rest
                .parse()
                .map(Self::SetTickInterval)
                .map_err(|_| ParseCommandError::InvalidInterval(rest.to_string())),
            other => Err(ParseCommandError::Unknown(other.to_string())),
        }
    }
}
