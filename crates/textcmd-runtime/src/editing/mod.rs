#![forbid(unsafe_code)]

//! Text-editing command contracts.
//!
//! This crate does not store text. A host editor supplies concrete insert
//! and delete commands through [`TextEditingCommandFactory`]; the
//! [`composites`] module builds multi-step edits (split, join, paste) out of
//! them.

pub mod composites;

use bitflags::bitflags;
use textcmd_text::{LinePosition, SingleLineTextRange, TextPosition};

use crate::command::UndoableCommand;

bitflags! {
    /// Operations during which a command should move the caret or selection.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DoTypes: u8 {
        /// Never.
        const NONE = 0b000;
        /// On the first execute.
        const EXECUTE = 0b001;
        /// On undo.
        const UNDO = 0b010;
        /// On redo.
        const REDO = 0b100;
        /// On execute and redo, but not undo.
        const EXECUTE_AND_REDO = Self::EXECUTE.bits() | Self::REDO.bits();
        /// On every operation.
        const ALL = Self::EXECUTE.bits() | Self::UNDO.bits() | Self::REDO.bits();
    }
}

impl Default for DoTypes {
    fn default() -> Self {
        Self::NONE
    }
}

/// A reversible command that edits text and may update the caret or
/// selection held by the context.
pub trait TextEditingCommand<C>: UndoableCommand<C> {
    /// When the command should move the caret.
    fn update_text_position(&self) -> DoTypes;

    fn set_update_text_position(&mut self, value: DoTypes);

    /// When the command should update the selection.
    fn update_text_selection(&self) -> DoTypes;

    fn set_update_text_selection(&mut self, value: DoTypes);
}

/// Builds the primitive text-editing commands for a host buffer.
pub trait TextEditingCommandFactory<C> {
    /// Insert `text` at `position`.
    fn create_insert_text_command(
        &self,
        position: TextPosition,
        text: &str,
    ) -> Box<dyn TextEditingCommand<C>>;

    /// Insert, at `position`, the text currently covered by `source`.
    fn create_insert_text_from_text_range_command(
        &self,
        position: TextPosition,
        source: SingleLineTextRange,
    ) -> Box<dyn TextEditingCommand<C>>;

    /// Delete the text covered by `range`.
    fn create_delete_text_command(
        &self,
        range: SingleLineTextRange,
    ) -> Box<dyn TextEditingCommand<C>>;

    /// Insert an empty line so that it becomes line `line`.
    fn create_insert_line_command(&self, line: LinePosition) -> Box<dyn TextEditingCommand<C>>;

    /// Delete line `line`.
    fn create_delete_line_command(&self, line: LinePosition) -> Box<dyn TextEditingCommand<C>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_flags() {
        assert!(DoTypes::ALL.contains(DoTypes::UNDO));
        assert!(DoTypes::EXECUTE_AND_REDO.contains(DoTypes::EXECUTE));
        assert!(DoTypes::EXECUTE_AND_REDO.contains(DoTypes::REDO));
        assert!(!DoTypes::EXECUTE_AND_REDO.contains(DoTypes::UNDO));
        assert_eq!(DoTypes::default(), DoTypes::NONE);
        assert!(DoTypes::NONE.is_empty());
    }
}
