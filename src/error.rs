//! Error types for cmdroute

use std::fmt;
use thiserror::Error;

/// Message used when the tokenizer rejects a flag without a custom message
pub const UNKNOWN_FLAG_MESSAGE: &str = "Parsed unknown option flag(s)!";

/// Result type alias for cmdroute operations
pub type Result<T> = std::result::Result<T, RouteError>;

/// Main error type for cmdroute
#[derive(Error, Debug)]
pub enum RouteError {
    /// Mis-wired CLI definition
    #[error("{0}")]
    Build(#[from] BuildError),

    /// Invalid user input
    #[error("{0}")]
    Parse(#[from] ParseError),
}

/// Registration errors. These are programmer errors and are expected to
/// abort the defining process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Command already exists: {0}")]
    DuplicateCommand(String),

    #[error("{0}")]
    Mode(ModeMisuse),

    #[error("Cannot call `alias()` before defining a command")]
    AliasBeforeCommand,

    #[error("Command usage must begin with a name: {0:?}")]
    MissingName(String),
}

/// Builder calls that are forbidden in single-command mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeMisuse {
    Command,
    Alias,
}

impl fmt::Display for ModeMisuse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeMisuse::Command => f.write_str("Disable \"single\" mode to add commands"),
            ModeMisuse::Alias => f.write_str("Cannot call `alias()` in \"single\" mode"),
        }
    }
}

/// Argument-vector errors, reported to the user with the error block
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("No command specified.")]
    NoCommand,

    #[error("Insufficient arguments!")]
    InsufficientArguments { command: Option<String> },

    #[error("{}", .message.as_deref().unwrap_or(UNKNOWN_FLAG_MESSAGE))]
    UnknownFlag {
        flag: String,
        message: Option<String>,
    },

    #[error("No handler defined for `{0}`")]
    MissingHandler(String),
}

impl ParseError {
    /// The program (and command) name to suggest in the `--help` hint
    pub fn help_target(&self, bin: &str) -> String {
        match self {
            ParseError::InsufficientArguments {
                command: Some(name),
            } => format!("{} {}", bin, name),
            _ => bin.to_string(),
        }
    }
}

/// Specialized result type for registration
pub type BuildResult<T> = std::result::Result<T, BuildError>;

/// Specialized result type for parsing and dispatch
pub type ParseResult<T> = std::result::Result<T, ParseError>;
