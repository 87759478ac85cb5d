#![forbid(unsafe_code)]

//! Command contracts.
//!
//! A command is parameterized by the context `C` it operates on (usually a
//! document or buffer). The capability ladder is:
//!
//! - [`Command`]: can be executed once.
//! - [`UndoableCommand`]: can also be undone and redone.
//! - [`MergeableCommand`]: can also absorb a later command of a compatible
//!   kind (e.g. consecutive typing).
//!
//! The controller never inspects a command's type at dispatch. Capabilities
//! are picked once, when the caller wraps the command in a [`CommandEntry`].
//!
//! # Invariants
//!
//! - `execute()` followed by `undo()` restores the prior context.
//! - `undo()` followed by `redo()` restores the executed context.
//! - `merge_from(other)` is only called after `can_merge_from(other)`
//!   returned true.

use std::any::Any;
use std::fmt;

use crate::error::CommandResult;

/// A command that can be executed against a context.
pub trait Command<C> {
    /// Apply the command.
    fn execute(&mut self, context: &mut C) -> CommandResult;

    /// Human-readable description for UI display.
    fn description(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// A command that can be reversed.
pub trait UndoableCommand<C>: Command<C> {
    /// Revert the effect of the last `execute` or `redo`.
    fn undo(&mut self, context: &mut C) -> CommandResult;

    /// Reapply the command after it was undone.
    fn redo(&mut self, context: &mut C) -> CommandResult {
        self.execute(context)
    }

    /// Whether the command is reversible right now. When false the
    /// controller clears its undo history instead of recording it.
    fn can_undo(&self) -> bool {
        true
    }

    /// Transient commands are reversible in principle but are never
    /// recorded in the history.
    fn is_transient(&self) -> bool {
        false
    }
}

/// A reversible command that can absorb a later compatible command.
pub trait MergeableCommand<C>: UndoableCommand<C> {
    /// Whether `other` can be folded into this command.
    fn can_merge_from(&self, other: &dyn MergeableCommand<C>) -> bool;

    /// Fold `other` into this command. `other` has already been executed.
    fn merge_from(&mut self, other: &dyn MergeableCommand<C>);

    /// Downcast support for `can_merge_from` / `merge_from`.
    fn as_any(&self) -> &dyn Any;
}

impl<C, T: Command<C> + ?Sized> Command<C> for Box<T> {
    fn execute(&mut self, context: &mut C) -> CommandResult {
        (**self).execute(context)
    }

    fn description(&self) -> &str {
        (**self).description()
    }
}

impl<C, T: UndoableCommand<C> + ?Sized> UndoableCommand<C> for Box<T> {
    fn undo(&mut self, context: &mut C) -> CommandResult {
        (**self).undo(context)
    }

    fn redo(&mut self, context: &mut C) -> CommandResult {
        (**self).redo(context)
    }

    fn can_undo(&self) -> bool {
        (**self).can_undo()
    }

    fn is_transient(&self) -> bool {
        (**self).is_transient()
    }
}

// ============================================================================
// Capability-resolved entries
// ============================================================================

/// A reversible command as stored in the undo/redo history.
pub enum UndoEntry<C> {
    Undoable(Box<dyn UndoableCommand<C>>),
    Mergeable(Box<dyn MergeableCommand<C>>),
}

impl<C> UndoEntry<C> {
    pub fn execute(&mut self, context: &mut C) -> CommandResult {
        match self {
            Self::Undoable(cmd) => cmd.execute(context),
            Self::Mergeable(cmd) => cmd.execute(context),
        }
    }

    pub fn undo(&mut self, context: &mut C) -> CommandResult {
        match self {
            Self::Undoable(cmd) => cmd.undo(context),
            Self::Mergeable(cmd) => cmd.undo(context),
        }
    }

    pub fn redo(&mut self, context: &mut C) -> CommandResult {
        match self {
            Self::Undoable(cmd) => cmd.redo(context),
            Self::Mergeable(cmd) => cmd.redo(context),
        }
    }

    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            Self::Undoable(cmd) => cmd.description(),
            Self::Mergeable(cmd) => cmd.description(),
        }
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        match self {
            Self::Undoable(cmd) => cmd.can_undo(),
            Self::Mergeable(cmd) => cmd.can_undo(),
        }
    }

    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Undoable(cmd) => cmd.is_transient(),
            Self::Mergeable(cmd) => cmd.is_transient(),
        }
    }

    /// True when the entry belongs in the history: it can be undone and is
    /// not transient.
    #[must_use]
    pub fn is_recordable(&self) -> bool {
        self.can_undo() && !self.is_transient()
    }

    /// The mergeable view of this entry, if it has one.
    #[must_use]
    pub fn as_mergeable(&self) -> Option<&(dyn MergeableCommand<C> + 'static)> {
        match self {
            Self::Undoable(_) => None,
            Self::Mergeable(cmd) => Some(&**cmd),
        }
    }

    pub fn as_mergeable_mut(&mut self) -> Option<&mut (dyn MergeableCommand<C> + 'static)> {
        match self {
            Self::Undoable(_) => None,
            Self::Mergeable(cmd) => Some(&mut **cmd),
        }
    }
}

impl<C> fmt::Debug for UndoEntry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Undoable(_) => "Undoable",
            Self::Mergeable(_) => "Mergeable",
        };
        f.debug_struct("UndoEntry")
            .field("kind", &kind)
            .field("description", &self.description())
            .finish()
    }
}

/// A command handed to the controller, tagged with its capabilities.
pub enum CommandEntry<C> {
    /// Executed once and never recorded.
    Once(Box<dyn Command<C>>),
    /// Recorded in the history when it reports `can_undo` and is not
    /// transient.
    Reversible(UndoEntry<C>),
}

impl<C> CommandEntry<C> {
    /// Wrap a do-only command.
    pub fn once(command: impl Command<C> + 'static) -> Self {
        Self::Once(Box::new(command))
    }

    /// Wrap a reversible command.
    pub fn undoable(command: impl UndoableCommand<C> + 'static) -> Self {
        Self::Reversible(UndoEntry::Undoable(Box::new(command)))
    }

    /// Wrap a reversible command that may merge with its neighbours.
    pub fn mergeable(command: impl MergeableCommand<C> + 'static) -> Self {
        Self::Reversible(UndoEntry::Mergeable(Box::new(command)))
    }

    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            Self::Once(cmd) => cmd.description(),
            Self::Reversible(entry) => entry.description(),
        }
    }

    /// True when the command will be recorded after executing.
    #[must_use]
    pub fn is_recordable(&self) -> bool {
        match self {
            Self::Once(_) => false,
            Self::Reversible(entry) => entry.is_recordable(),
        }
    }
}

impl<C> From<UndoEntry<C>> for CommandEntry<C> {
    fn from(entry: UndoEntry<C>) -> Self {
        Self::Reversible(entry)
    }
}

impl<C> fmt::Debug for CommandEntry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Once(cmd) => f
                .debug_struct("Once")
                .field("description", &cmd.description())
                .finish(),
            Self::Reversible(entry) => f.debug_tuple("Reversible").field(entry).finish(),
        }
    }
}

// ============================================================================
// OnceCommand
// ============================================================================

/// Closure-backed command that is executed and never recorded.
pub struct OnceCommand<F> {
    description: String,
    action: F,
}

impl<F> OnceCommand<F> {
    #[must_use]
    pub fn new(description: impl Into<String>, action: F) -> Self {
        Self {
            description: description.into(),
            action,
        }
    }
}

impl<C, F> Command<C> for OnceCommand<F>
where
    F: FnMut(&mut C) -> CommandResult,
{
    fn execute(&mut self, context: &mut C) -> CommandResult {
        (self.action)(context)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

impl<F> fmt::Debug for OnceCommand<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnceCommand")
            .field("description", &self.description)
            .finish()
    }
}
