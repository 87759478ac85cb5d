#![forbid(unsafe_code)]

//! Undo/redo controller.
//!
//! [`UndoRedoController`] executes commands against a caller-owned context
//! and keeps the history needed to reverse them:
//!
//! - **Branching**: executing any command clears the redo stack.
//! - **Merging**: a mergeable command may be folded into the mergeable
//!   command on top of the undo stack instead of being pushed.
//! - **Depth limit**: the oldest entries are evicted once the undo stack
//!   exceeds `maximum_undo_commands`.
//! - **Deferral**: commands queued through a [`Deferrer`] while a command
//!   executes run after it, each through the ordinary execute path.
//!
//! ```text
//! execute(c3)
//! ┌───────────────────────────────────────────────┐
//! │ Undo Stack: [c1, c2, c3]                      │
//! │ Redo Stack: []                                │
//! └───────────────────────────────────────────────┘
//!
//! undo() x2
//! ┌───────────────────────────────────────────────┐
//! │ Undo Stack: [c1]                              │
//! │ Redo Stack: [c3, c2]                          │
//! └───────────────────────────────────────────────┘
//!
//! execute(c4)  <-- new branch, clears redo
//! ┌───────────────────────────────────────────────┐
//! │ Undo Stack: [c1, c4]                          │
//! │ Redo Stack: []                                │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. `undo_count() <= maximum_undo_commands()` after any operation.
//! 2. The redo stack is empty after every `execute`.
//! 3. Redo never merges.
//! 4. Commands deferred while undoing or redoing are discarded.
//!
//! The controller is single-threaded: the deferred queue is shared through
//! `Rc<RefCell<..>>`, so it is not `Send`.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use crate::command::{CommandEntry, UndoEntry};
use crate::config::ControllerConfig;
use crate::error::{CommandError, CommandResult};

// ============================================================================
// Deferrer
// ============================================================================

/// Handle for queueing commands to run after the current top-level execute.
///
/// Cloned handles share one queue. Commands that need to defer work hold a
/// clone obtained from [`UndoRedoController::deferrer`].
pub struct Deferrer<C> {
    queue: Rc<RefCell<VecDeque<CommandEntry<C>>>>,
}

impl<C> Clone for Deferrer<C> {
    fn clone(&self) -> Self {
        Self {
            queue: Rc::clone(&self.queue),
        }
    }
}

impl<C> Default for Deferrer<C> {
    fn default() -> Self {
        Self {
            queue: Rc::new(RefCell::new(VecDeque::new())),
        }
    }
}

impl<C> Deferrer<C> {
    /// Queue a command.
    pub fn defer(&self, command: impl Into<CommandEntry<C>>) {
        let command = command.into();
        tracing::trace!(
            target: "textcmd.controller",
            command = command.description(),
            "deferred command queued"
        );
        self.queue.borrow_mut().push_back(command);
    }

    /// Number of queued commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    /// Take every queued command, oldest first.
    fn take_all(&self) -> VecDeque<CommandEntry<C>> {
        std::mem::take(&mut *self.queue.borrow_mut())
    }
}

impl<C> fmt::Debug for Deferrer<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferrer").field("pending", &self.len()).finish()
    }
}

// ============================================================================
// CommandController
// ============================================================================

/// The public surface of a command controller.
pub trait CommandController<C> {
    /// Execute a command and record it if it is reversible.
    fn execute(&mut self, command: CommandEntry<C>, context: &mut C) -> CommandResult;

    /// Undo the most recent entry, returning its description.
    fn undo(&mut self, context: &mut C) -> CommandResult<String>;

    /// Redo the most recently undone entry, returning its description.
    fn redo(&mut self, context: &mut C) -> CommandResult<String>;

    /// Queue a command to run after the current execute.
    fn defer(&self, command: CommandEntry<C>);

    fn can_undo(&self) -> bool;

    fn can_redo(&self) -> bool;
}

// ============================================================================
// UndoRedoController
// ============================================================================

/// Executes commands and maintains undo/redo history.
pub struct UndoRedoController<C> {
    /// Entries available for undo (newest at back).
    undo_stack: VecDeque<UndoEntry<C>>,
    /// Entries available for redo (newest at back).
    redo_stack: VecDeque<UndoEntry<C>>,
    deferred: Deferrer<C>,
    maximum_undo_commands: usize,
}

impl<C> Default for UndoRedoController<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for UndoRedoController<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UndoRedoController")
            .field("undo_depth", &self.undo_stack.len())
            .field("redo_depth", &self.redo_stack.len())
            .field("deferred", &self.deferred.len())
            .field("maximum_undo_commands", &self.maximum_undo_commands)
            .finish()
    }
}

impl<C> UndoRedoController<C> {
    /// Create a controller with unbounded history.
    #[must_use]
    pub fn new() -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            deferred: Deferrer::default(),
            maximum_undo_commands: usize::MAX,
        }
    }

    /// Create a controller from a configuration.
    ///
    /// # Errors
    ///
    /// [`CommandError::OutOfRange`] if the configured maximum is negative.
    pub fn with_config(config: &ControllerConfig) -> CommandResult<Self> {
        let mut controller = Self::new();
        controller.set_maximum_undo_commands(config.maximum_undo_commands)?;
        Ok(controller)
    }

    // ========================================================================
    // Core Operations
    // ========================================================================

    /// Execute a command.
    ///
    /// A command that is not reversible, or reports `can_undo() == false`,
    /// clears the undo history. The redo history is always cleared. After
    /// the command runs, commands deferred during it are executed in order.
    ///
    /// # Errors
    ///
    /// The first error returned by the command or a deferred command.
    pub fn execute(&mut self, command: CommandEntry<C>, context: &mut C) -> CommandResult {
        let _span = tracing::debug_span!(
            "controller.execute",
            command = command.description(),
            undo_depth = self.undo_stack.len(),
        )
        .entered();

        let reversible = matches!(&command, CommandEntry::Reversible(entry) if entry.can_undo());
        if !reversible && !self.undo_stack.is_empty() {
            tracing::debug!(
                target: "textcmd.controller",
                discarded = self.undo_stack.len(),
                "irreversible command clears undo history"
            );
            self.undo_stack.clear();
        }
        self.redo_stack.clear();

        match command {
            CommandEntry::Once(mut cmd) => cmd.execute(context)?,
            CommandEntry::Reversible(mut entry) => {
                entry.execute(context)?;
                if entry.is_recordable() {
                    self.push_undo(entry, true);
                }
            }
        }

        self.drain_deferred(context)
    }

    /// Undo the most recent entry and move it to the redo stack.
    ///
    /// Commands deferred while undoing are discarded.
    ///
    /// # Errors
    ///
    /// - [`CommandError::PreconditionFailed`] if there is nothing to undo.
    /// - The entry's own error; the entry is then dropped from the history.
    pub fn undo(&mut self, context: &mut C) -> CommandResult<String> {
        let Some(mut entry) = self.undo_stack.pop_back() else {
            return Err(CommandError::PreconditionFailed(
                "nothing to undo".to_string(),
            ));
        };
        let description = entry.description().to_string();
        let _span = tracing::debug_span!("controller.undo", command = %description).entered();

        let result = entry.undo(context);
        self.discard_deferred();
        result?;

        self.redo_stack.push_back(entry);
        tracing::debug!(
            target: "textcmd.controller",
            undo_depth = self.undo_stack.len(),
            redo_depth = self.redo_stack.len(),
            "undo complete"
        );
        Ok(description)
    }

    /// Redo the most recently undone entry and move it back to the undo
    /// stack. The entry is never merged with its neighbour.
    ///
    /// Commands deferred while redoing are discarded.
    ///
    /// # Errors
    ///
    /// - [`CommandError::PreconditionFailed`] if there is nothing to redo.
    /// - The entry's own error; the entry is then dropped from the history.
    pub fn redo(&mut self, context: &mut C) -> CommandResult<String> {
        let Some(mut entry) = self.redo_stack.pop_back() else {
            return Err(CommandError::PreconditionFailed(
                "nothing to redo".to_string(),
            ));
        };
        let description = entry.description().to_string();
        let _span = tracing::debug_span!("controller.redo", command = %description).entered();

        let result = entry.redo(context);
        self.discard_deferred();
        result?;

        self.push_undo(entry, false);
        tracing::debug!(
            target: "textcmd.controller",
            undo_depth = self.undo_stack.len(),
            redo_depth = self.redo_stack.len(),
            "redo complete"
        );
        Ok(description)
    }

    /// Queue a command to run after the current top-level execute.
    pub fn defer(&self, command: impl Into<CommandEntry<C>>) {
        self.deferred.defer(command);
    }

    /// A handle that commands can hold to defer work.
    #[must_use]
    pub fn deferrer(&self) -> Deferrer<C> {
        self.deferred.clone()
    }

    // ========================================================================
    // Info
    // ========================================================================

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    #[must_use]
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    #[must_use]
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Description of the entry `undo` would reverse.
    #[must_use]
    pub fn next_undo_description(&self) -> Option<&str> {
        self.undo_stack.back().map(UndoEntry::description)
    }

    /// Description of the entry `redo` would reapply.
    #[must_use]
    pub fn next_redo_description(&self) -> Option<&str> {
        self.redo_stack.back().map(UndoEntry::description)
    }

    #[must_use]
    pub fn maximum_undo_commands(&self) -> usize {
        self.maximum_undo_commands
    }

    /// Set the undo depth limit, evicting the oldest entries immediately if
    /// the history is already deeper.
    ///
    /// # Errors
    ///
    /// [`CommandError::OutOfRange`] if `maximum` is negative. Values beyond
    /// `usize::MAX` saturate.
    pub fn set_maximum_undo_commands(&mut self, maximum: i64) -> CommandResult {
        if maximum < 0 {
            return Err(CommandError::OutOfRange {
                name: "maximum_undo_commands",
                value: maximum,
            });
        }
        self.maximum_undo_commands = usize::try_from(maximum).unwrap_or(usize::MAX);
        self.enforce_limit();
        Ok(())
    }

    // ========================================================================
    // Maintenance
    // ========================================================================

    /// Clear both stacks. Deferred commands are kept.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn push_undo(&mut self, entry: UndoEntry<C>, merge: bool) {
        if merge {
            let top = self.undo_stack.back_mut().and_then(UndoEntry::as_mergeable_mut);
            if let (Some(top), Some(incoming)) = (top, entry.as_mergeable()) {
                if top.can_merge_from(incoming) {
                    top.merge_from(incoming);
                    tracing::trace!(
                        target: "textcmd.controller",
                        into = top.description(),
                        "merged command into undo top"
                    );
                    return;
                }
            }
        }
        self.undo_stack.push_back(entry);
        self.enforce_limit();
    }

    fn enforce_limit(&mut self) {
        while self.undo_stack.len() > self.maximum_undo_commands {
            if let Some(evicted) = self.undo_stack.pop_front() {
                tracing::trace!(
                    target: "textcmd.controller",
                    command = evicted.description(),
                    "evicted oldest undo entry"
                );
            }
        }
    }

    fn drain_deferred(&mut self, context: &mut C) -> CommandResult {
        loop {
            let pending = self.deferred.take_all();
            if pending.is_empty() {
                return Ok(());
            }
            tracing::trace!(
                target: "textcmd.controller",
                count = pending.len(),
                "draining deferred commands"
            );
            for command in pending {
                self.execute(command, context)?;
            }
        }
    }

    fn discard_deferred(&mut self) {
        let discarded = self.deferred.take_all();
        if !discarded.is_empty() {
            tracing::debug!(
                target: "textcmd.controller",
                count = discarded.len(),
                "discarded commands deferred during undo/redo"
            );
        }
    }
}

impl<C> CommandController<C> for UndoRedoController<C> {
    fn execute(&mut self, command: CommandEntry<C>, context: &mut C) -> CommandResult {
        UndoRedoController::execute(self, command, context)
    }

    fn undo(&mut self, context: &mut C) -> CommandResult<String> {
        UndoRedoController::undo(self, context)
    }

    fn redo(&mut self, context: &mut C) -> CommandResult<String> {
        UndoRedoController::redo(self, context)
    }

    fn defer(&self, command: CommandEntry<C>) {
        UndoRedoController::defer(self, command);
    }

    fn can_undo(&self) -> bool {
        UndoRedoController::can_undo(self)
    }

    fn can_redo(&self) -> bool {
        UndoRedoController::can_redo(self)
    }
}
