#![forbid(unsafe_code)]

//! textcmd public facade crate.
//!
//! Re-exports the text model from `textcmd-text` and the command runtime
//! from `textcmd-runtime`, with a prelude for host editors.
//!
//! ```rust,ignore
//! use textcmd::prelude::*;
//!
//! let mut controller = UndoRedoController::new();
//! controller.execute(CommandEntry::undoable(my_insert), &mut document)?;
//! controller.undo(&mut document)?;
//! ```

use std::fmt;

// --- Text model re-exports -------------------------------------------------

pub use textcmd_text::{
    CharacterPosition, GraphemeWordTokenizer, LinePosition, PositionError, PositionResult,
    SingleLineTextRange, TextPosition, TextRange, WordSearchDirection, WordTokenizer,
};

// --- Runtime re-exports ----------------------------------------------------

pub use textcmd_runtime::editing::composites::{
    join_next_paragraph, join_previous_paragraph, paste, split_paragraph,
};
pub use textcmd_runtime::{
    Command, CommandController, CommandEntry, CommandError, CommandResult, CompositeCommand,
    CompositeHooks, ConfigError, ControllerConfig, Deferrer, DoTypes, MergeableCommand,
    OnceCommand, TextEditingCommand, TextEditingCommandFactory, UndoEntry, UndoRedoController,
    UndoableCommand,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for textcmd hosts.
#[derive(Debug)]
pub enum Error {
    /// A command or controller operation failed.
    Command(CommandError),
    /// Loading or validating a controller configuration failed.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Command(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<CommandError> for Error {
    fn from(err: CommandError) -> Self {
        Self::Command(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<PositionError> for Error {
    fn from(err: PositionError) -> Self {
        Self::Command(CommandError::Position(err))
    }
}

/// Standard result type for textcmd hosts.
pub type Result<T> = std::result::Result<T, Error>;

/// Build a controller from a configuration, validating it first.
///
/// # Errors
///
/// [`Error::Config`] listing every invalid parameter.
pub fn controller_from_config<C>(config: ControllerConfig) -> Result<UndoRedoController<C>> {
    let config = config.validated()?;
    Ok(UndoRedoController::with_config(&config)?)
}

// --- Prelude ---------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CharacterPosition, Command, CommandController, CommandEntry, CommandError, CommandResult,
        CompositeCommand, DoTypes, Error, LinePosition, MergeableCommand, OnceCommand, Result,
        SingleLineTextRange, TextEditingCommand, TextEditingCommandFactory, TextPosition,
        TextRange, UndoRedoController, UndoableCommand,
    };

    pub use crate::{runtime, text};
}

pub use textcmd_runtime as runtime;
pub use textcmd_text as text;
