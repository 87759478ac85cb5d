#![forbid(unsafe_code)]

//! Composite commands: an ordered group of reversible commands that
//! executes, undoes, and redoes as one history entry.
//!
//! Sub-commands run in insertion order on execute and redo, and in reverse
//! order on undo. The first failing sub-command aborts the operation and
//! its error is returned; steps already applied are not rolled back.

use std::fmt;

use crate::command::{Command, UndoableCommand};
use crate::error::CommandResult;

/// Hooks run around a composite's operations.
///
/// Every hook defaults to a no-op. `()` implements it for composites that
/// need no hooks.
pub trait CompositeHooks<C> {
    fn pre_execute(&mut self, _context: &mut C) -> CommandResult {
        Ok(())
    }

    fn post_execute(&mut self, _context: &mut C) -> CommandResult {
        Ok(())
    }

    fn pre_undo(&mut self, _context: &mut C) -> CommandResult {
        Ok(())
    }

    fn post_undo(&mut self, _context: &mut C) -> CommandResult {
        Ok(())
    }

    fn pre_redo(&mut self, _context: &mut C) -> CommandResult {
        Ok(())
    }

    fn post_redo(&mut self, _context: &mut C) -> CommandResult {
        Ok(())
    }
}

impl<C> CompositeHooks<C> for () {}

/// A sequence of reversible commands treated as a single command.
pub struct CompositeCommand<C, H = ()> {
    /// Sub-commands in execution order.
    commands: Vec<Box<dyn UndoableCommand<C>>>,
    hooks: H,
    description: String,
    can_undo: bool,
    is_transient: bool,
}

impl<C> CompositeCommand<C> {
    /// Create an empty, undoable, non-transient composite.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self::with_hooks(description, ())
    }
}

impl<C, H: CompositeHooks<C>> CompositeCommand<C, H> {
    /// Create an empty composite that runs `hooks` around each operation.
    #[must_use]
    pub fn with_hooks(description: impl Into<String>, hooks: H) -> Self {
        Self {
            commands: Vec::new(),
            hooks,
            description: description.into(),
            can_undo: true,
            is_transient: false,
        }
    }

    /// Set whether the composite reports itself as undoable.
    #[must_use]
    pub fn with_can_undo(mut self, can_undo: bool) -> Self {
        self.can_undo = can_undo;
        self
    }

    /// Set whether the composite is kept out of the history.
    #[must_use]
    pub fn with_transient(mut self, is_transient: bool) -> Self {
        self.is_transient = is_transient;
        self
    }

    /// Append a sub-command.
    pub fn push(&mut self, command: impl UndoableCommand<C> + 'static) {
        self.commands.push(Box::new(command));
    }

    /// Append an already boxed sub-command.
    pub fn push_boxed(&mut self, command: Box<dyn UndoableCommand<C>>) {
        self.commands.push(command);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Sub-commands in execution order.
    pub fn commands(&self) -> impl Iterator<Item = &dyn UndoableCommand<C>> {
        self.commands.iter().map(|cmd| &**cmd as &dyn UndoableCommand<C>)
    }

    #[must_use]
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }
}

impl<C, H: CompositeHooks<C>> Command<C> for CompositeCommand<C, H> {
    fn execute(&mut self, context: &mut C) -> CommandResult {
        self.hooks.pre_execute(context)?;
        for (step, cmd) in self.commands.iter_mut().enumerate() {
            tracing::trace!(
                target: "textcmd.composite",
                step,
                command = cmd.description(),
                "execute sub-command"
            );
            cmd.execute(context)?;
        }
        self.hooks.post_execute(context)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

impl<C, H: CompositeHooks<C>> UndoableCommand<C> for CompositeCommand<C, H> {
    fn undo(&mut self, context: &mut C) -> CommandResult {
        self.hooks.pre_undo(context)?;
        for (step, cmd) in self.commands.iter_mut().enumerate().rev() {
            tracing::trace!(
                target: "textcmd.composite",
                step,
                command = cmd.description(),
                "undo sub-command"
            );
            cmd.undo(context)?;
        }
        self.hooks.post_undo(context)
    }

    fn redo(&mut self, context: &mut C) -> CommandResult {
        self.hooks.pre_redo(context)?;
        for (step, cmd) in self.commands.iter_mut().enumerate() {
            tracing::trace!(
                target: "textcmd.composite",
                step,
                command = cmd.description(),
                "redo sub-command"
            );
            cmd.redo(context)?;
        }
        self.hooks.post_redo(context)
    }

    fn can_undo(&self) -> bool {
        self.can_undo
    }

    fn is_transient(&self) -> bool {
        self.is_transient
    }
}

impl<C, H> fmt::Debug for CompositeCommand<C, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeCommand")
            .field("description", &self.description)
            .field("commands_count", &self.commands.len())
            .field("can_undo", &self.can_undo)
            .field("is_transient", &self.is_transient)
            .finish()
    }
}
