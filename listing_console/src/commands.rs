//! # Console Commands
//!
//! ## Command Set
//!
//! Reuse operations:
//! - `reuse [path]` - Navigate from the current listing (focused line if no path)
//! - `up` - Navigate to the parent directory
//! - `at <path>` - Focus an entry, then navigate to it
//! - `home [path]` - Jump to the home listing
//! - `toggle` - Toggle persistent/path-derived naming
//!
//! Host setup and inspection:
//! - `mkdir <path>` / `touch <path>` / `deny <path>` - Shape the simulated tree
//! - `open <path>` - Open a new listing
//! - `focus <name>` - Focus a listing by name
//! - `point <path>` - Move the focus line of the current listing
//! - `answer <path>` / `cancel` - Queue an answer for the next prompt
//! - `ls` - List open listings
//! - `quit` - Stop

use thiserror::Error;

/// Console command error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Missing argument: {0}")]
    MissingArgument(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}

/// Console commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingCommand {
    /// Navigate from the current listing
    Reuse { path: Option<String> },
    /// Navigate to the parent directory
    Up,
    /// Focus an entry and navigate to it
    At { path: String },
    /// Jump to the home listing
    Home { path: Option<String> },
    /// Toggle naming of the current listing
    Toggle,
    /// List open listings
    List,
    /// Focus a listing by name
    Focus { name: String },
    /// Create a directory in the simulated tree
    Mkdir { path: String },
    /// Create a file in the simulated tree
    Touch { path: String },
    /// Make a path unreadable
    Deny { path: String },
    /// Open a new listing
    Open { path: String },
    /// Move the focus line of the current listing
    Point { path: String },
    /// Queue a prompt answer
    Answer { path: String },
    /// Queue a prompt cancellation
    Cancel,
    /// Stop the session
    Quit,
}

/// Console command parser
pub struct ListingCommandParser;

impl ListingCommandParser {
    /// Parses a command line
    pub fn parse(input: &str) -> Result<ListingCommand, CommandError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(CommandError::InvalidCommand("Empty command".to_string()));
        }

        let (word, rest) = match input.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (input, ""),
        };
        let optional = || (!rest.is_empty()).then(|| rest.to_string());
        let required = |name: &str| {
            if rest.is_empty() {
                Err(CommandError::MissingArgument(name.to_string()))
            } else {
                Ok(rest.to_string())
            }
        };

        let command = match word {
            "reuse" => ListingCommand::Reuse { path: optional() },
            "up" => ListingCommand::Up,
            "at" => ListingCommand::At {
                path: required("path")?,
            },
            "home" => ListingCommand::Home { path: optional() },
            "toggle" => ListingCommand::Toggle,
            "ls" => ListingCommand::List,
            "focus" => ListingCommand::Focus {
                name: required("name")?,
            },
            "mkdir" => ListingCommand::Mkdir {
                path: required("path")?,
            },
            "touch" => ListingCommand::Touch {
                path: required("path")?,
            },
            "deny" => ListingCommand::Deny {
                path: required("path")?,
            },
            "open" => ListingCommand::Open {
                path: required("path")?,
            },
            "point" => ListingCommand::Point {
                path: required("path")?,
            },
            "answer" => ListingCommand::Answer {
                path: required("path")?,
            },
            "cancel" => ListingCommand::Cancel,
            "quit" | "exit" => ListingCommand::Quit,
            other => return Err(CommandError::UnknownCommand(other.to_string())),
        };

        let takes_no_argument = matches!(
            command,
            ListingCommand::Up
                | ListingCommand::Toggle
                | ListingCommand::List
                | ListingCommand::Cancel
                | ListingCommand::Quit
        );
        if takes_no_argument && !rest.is_empty() {
            return Err(CommandError::InvalidCommand(format!(
                "{} takes no arguments",
                word
            )));
        }

        Ok(command)
    }
}
