#![forbid(unsafe_code)]

//! textcmd runtime
//!
//! Command execution with undo, redo, merging, and deferral, independent
//! of any editor or text storage.
//!
//! # Key Components
//!
//! - [`Command`] / [`UndoableCommand`] / [`MergeableCommand`] - Command contracts
//! - [`CommandEntry`] - A command tagged with its capabilities
//! - [`CompositeCommand`] - Several reversible commands acting as one
//! - [`UndoRedoController`] - Undo/redo/merge/defer state machine
//! - [`editing`] - Text-editing contracts and paragraph composites
//!
//! # Logging
//! Controller operations open `controller.execute`, `controller.undo`, and
//! `controller.redo` debug spans. Merges, evictions, and deferred drains are
//! reported under the `textcmd.controller` target; composite sub-command
//! steps under `textcmd.composite`.

pub mod command;
pub mod composite;
pub mod config;
pub mod controller;
pub mod editing;
pub mod error;

pub use command::{Command, CommandEntry, MergeableCommand, OnceCommand, UndoEntry, UndoableCommand};
pub use composite::{CompositeCommand, CompositeHooks};
pub use config::{ConfigError, ControllerConfig};
pub use controller::{CommandController, Deferrer, UndoRedoController};
pub use editing::{DoTypes, TextEditingCommand, TextEditingCommandFactory};
pub use error::{CommandError, CommandResult};
