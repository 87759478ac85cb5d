#![forbid(unsafe_code)]

//! Errors raised by commands and the controller.

use std::fmt;

use textcmd_text::PositionError;

/// Result of executing, undoing, or redoing a command.
pub type CommandResult<T = ()> = Result<T, CommandError>;

/// Errors that can occur while building or running commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The operation is not legal in the current state (e.g. undo with an
    /// empty history).
    PreconditionFailed(String),
    /// A numeric setting was outside its legal domain.
    OutOfRange { name: &'static str, value: i64 },
    /// An argument cannot be used to build the command.
    InvalidArgument(String),
    /// A position failed to resolve against the buffer.
    Position(PositionError),
    /// A command reported its own failure.
    Failed(String),
}

impl CommandError {
    /// Shorthand for [`CommandError::Failed`].
    #[must_use]
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PreconditionFailed(msg) => write!(f, "precondition failed: {msg}"),
            Self::OutOfRange { name, value } => {
                write!(f, "{name} out of range: {value}")
            }
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::Position(err) => write!(f, "{err}"),
            Self::Failed(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Position(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PositionError> for CommandError {
    fn from(err: PositionError) -> Self {
        Self::Position(err)
    }
}
