#![allow(dead_code)]

//! In-memory line buffer and concrete editing commands shared by the
//! integration tests.

use std::any::Any;

use textcmd_runtime::{
    Command, CommandError, CommandResult, DoTypes, MergeableCommand, TextEditingCommand,
    TextEditingCommandFactory, UndoableCommand,
};
use textcmd_text::{
    GraphemeWordTokenizer, LinePosition, SingleLineTextRange, TextPosition,
};

// ============================================================================
// Document
// ============================================================================

/// A line-addressed buffer with a caret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub lines: Vec<String>,
    /// Caret as (line, char offset).
    pub caret: (usize, usize),
}

impl Document {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| (*l).to_string()).collect(),
            caret: (0, 0),
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    fn line_index(&self, line: LinePosition) -> CommandResult<usize> {
        let index = line.normalize(self.lines.len())?;
        if index >= self.lines.len() {
            return Err(CommandError::failed(format!("no line {index}")));
        }
        Ok(index)
    }

    fn resolve(&self, position: TextPosition) -> CommandResult<(usize, usize)> {
        let line = self.line_index(position.line())?;
        let character = position.character().normalize(&self.lines[line])?;
        Ok((line, character))
    }

    fn resolve_range(&self, range: SingleLineTextRange) -> CommandResult<(usize, usize, usize)> {
        let line = self.line_index(range.line())?;
        let (first, last) =
            range.first_and_last_character_indices(&self.lines[line], &GraphemeWordTokenizer)?;
        Ok((line, first, last))
    }

    fn insert_at(&mut self, line: usize, character: usize, text: &str) {
        let target = &mut self.lines[line];
        let at = byte_offset(target, character);
        target.insert_str(at, text);
    }

    fn remove_at(&mut self, line: usize, first: usize, last: usize) -> String {
        let target = &mut self.lines[line];
        let start = byte_offset(target, first);
        let end = byte_offset(target, last);
        target.drain(start..end).collect()
    }
}

fn byte_offset(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map_or(s.len(), |(i, _)| i)
}

/// Which operation is running, to check against the update flags.
#[derive(Clone, Copy)]
enum Phase {
    Execute,
    Undo,
    Redo,
}

#[derive(Debug, Clone, Copy, Default)]
struct Flags {
    position: DoTypes,
    selection: DoTypes,
}

impl Flags {
    fn moves_caret(self, phase: Phase) -> bool {
        let wanted = match phase {
            Phase::Execute => DoTypes::EXECUTE,
            Phase::Undo => DoTypes::UNDO,
            Phase::Redo => DoTypes::REDO,
        };
        self.position.contains(wanted)
    }
}

macro_rules! text_editing_flags {
    ($ty:ty) => {
        impl TextEditingCommand<Document> for $ty {
            fn update_text_position(&self) -> DoTypes {
                self.flags.position
            }

            fn set_update_text_position(&mut self, value: DoTypes) {
                self.flags.position = value;
            }

            fn update_text_selection(&self) -> DoTypes {
                self.flags.selection
            }

            fn set_update_text_selection(&mut self, value: DoTypes) {
                self.flags.selection = value;
            }
        }
    };
}

// ============================================================================
// Insert text
// ============================================================================

pub struct InsertText {
    position: TextPosition,
    text: String,
    flags: Flags,
    applied: Option<(usize, usize)>,
}

impl InsertText {
    pub fn new(position: TextPosition, text: &str) -> Self {
        Self {
            position,
            text: text.to_string(),
            flags: Flags::default(),
            applied: None,
        }
    }

    fn apply(&mut self, doc: &mut Document, phase: Phase) -> CommandResult {
        let (line, character) = doc.resolve(self.position)?;
        doc.insert_at(line, character, &self.text);
        self.applied = Some((line, character));
        if self.flags.moves_caret(phase) {
            doc.caret = (line, character + self.text.chars().count());
        }
        Ok(())
    }
}

impl Command<Document> for InsertText {
    fn execute(&mut self, doc: &mut Document) -> CommandResult {
        self.apply(doc, Phase::Execute)
    }

    fn description(&self) -> &str {
        "Insert text"
    }
}

impl UndoableCommand<Document> for InsertText {
    fn undo(&mut self, doc: &mut Document) -> CommandResult {
        let (line, character) = self
            .applied
            .take()
            .ok_or_else(|| CommandError::failed("insert was never applied"))?;
        doc.remove_at(line, character, character + self.text.chars().count());
        if self.flags.moves_caret(Phase::Undo) {
            doc.caret = (line, character);
        }
        Ok(())
    }

    fn redo(&mut self, doc: &mut Document) -> CommandResult {
        self.apply(doc, Phase::Redo)
    }
}

text_editing_flags!(InsertText);

// ============================================================================
// Insert text copied from a range
// ============================================================================

pub struct InsertTextFromRange {
    position: TextPosition,
    source: SingleLineTextRange,
    flags: Flags,
    applied: Option<(usize, usize, usize)>,
}

impl InsertTextFromRange {
    pub fn new(position: TextPosition, source: SingleLineTextRange) -> Self {
        Self {
            position,
            source,
            flags: Flags::default(),
            applied: None,
        }
    }

    fn apply(&mut self, doc: &mut Document, phase: Phase) -> CommandResult {
        let (source_line, first, last) = doc.resolve_range(self.source)?;
        let copied: String = doc.lines[source_line]
            .chars()
            .skip(first)
            .take(last - first)
            .collect();
        let (line, character) = doc.resolve(self.position)?;
        doc.insert_at(line, character, &copied);
        let len = copied.chars().count();
        self.applied = Some((line, character, len));
        if self.flags.moves_caret(phase) {
            doc.caret = (line, character);
        }
        Ok(())
    }
}

impl Command<Document> for InsertTextFromRange {
    fn execute(&mut self, doc: &mut Document) -> CommandResult {
        self.apply(doc, Phase::Execute)
    }

    fn description(&self) -> &str {
        "Insert text from range"
    }
}

impl UndoableCommand<Document> for InsertTextFromRange {
    fn undo(&mut self, doc: &mut Document) -> CommandResult {
        let (line, character, len) = self
            .applied
            .take()
            .ok_or_else(|| CommandError::failed("copy was never applied"))?;
        doc.remove_at(line, character, character + len);
        if self.flags.moves_caret(Phase::Undo) {
            doc.caret = (line, character);
        }
        Ok(())
    }

    fn redo(&mut self, doc: &mut Document) -> CommandResult {
        self.apply(doc, Phase::Redo)
    }
}

text_editing_flags!(InsertTextFromRange);

// ============================================================================
// Delete text
// ============================================================================

pub struct DeleteText {
    range: SingleLineTextRange,
    flags: Flags,
    removed: Option<(usize, usize, String)>,
}

impl DeleteText {
    pub fn new(range: SingleLineTextRange) -> Self {
        Self {
            range,
            flags: Flags::default(),
            removed: None,
        }
    }

    fn apply(&mut self, doc: &mut Document, phase: Phase) -> CommandResult {
        let (line, first, last) = doc.resolve_range(self.range)?;
        let removed = doc.remove_at(line, first, last);
        self.removed = Some((line, first, removed));
        if self.flags.moves_caret(phase) {
            doc.caret = (line, first);
        }
        Ok(())
    }
}

impl Command<Document> for DeleteText {
    fn execute(&mut self, doc: &mut Document) -> CommandResult {
        self.apply(doc, Phase::Execute)
    }

    fn description(&self) -> &str {
        "Delete text"
    }
}

impl UndoableCommand<Document> for DeleteText {
    fn undo(&mut self, doc: &mut Document) -> CommandResult {
        let (line, first, text) = self
            .removed
            .take()
            .ok_or_else(|| CommandError::failed("delete was never applied"))?;
        doc.insert_at(line, first, &text);
        if self.flags.moves_caret(Phase::Undo) {
            doc.caret = (line, first + text.chars().count());
        }
        Ok(())
    }

    fn redo(&mut self, doc: &mut Document) -> CommandResult {
        self.apply(doc, Phase::Redo)
    }
}

text_editing_flags!(DeleteText);

// ============================================================================
// Insert / delete line
// ============================================================================

pub struct InsertLine {
    line: LinePosition,
    flags: Flags,
    applied: Option<usize>,
}

impl InsertLine {
    pub fn new(line: LinePosition) -> Self {
        Self {
            line,
            flags: Flags::default(),
            applied: None,
        }
    }

    fn apply(&mut self, doc: &mut Document, phase: Phase) -> CommandResult {
        let index = self.line.normalize(doc.lines.len())?;
        doc.lines.insert(index, String::new());
        self.applied = Some(index);
        if self.flags.moves_caret(phase) {
            doc.caret = (index, 0);
        }
        Ok(())
    }
}

impl Command<Document> for InsertLine {
    fn execute(&mut self, doc: &mut Document) -> CommandResult {
        self.apply(doc, Phase::Execute)
    }

    fn description(&self) -> &str {
        "Insert line"
    }
}

impl UndoableCommand<Document> for InsertLine {
    fn undo(&mut self, doc: &mut Document) -> CommandResult {
        let index = self
            .applied
            .take()
            .ok_or_else(|| CommandError::failed("line insert was never applied"))?;
        doc.lines.remove(index);
        if self.flags.moves_caret(Phase::Undo) {
            doc.caret = (index.saturating_sub(1), 0);
        }
        Ok(())
    }

    fn redo(&mut self, doc: &mut Document) -> CommandResult {
        self.apply(doc, Phase::Redo)
    }
}

text_editing_flags!(InsertLine);

pub struct DeleteLine {
    line: LinePosition,
    flags: Flags,
    removed: Option<(usize, String)>,
}

impl DeleteLine {
    pub fn new(line: LinePosition) -> Self {
        Self {
            line,
            flags: Flags::default(),
            removed: None,
        }
    }

    fn apply(&mut self, doc: &mut Document, phase: Phase) -> CommandResult {
        let index = doc.line_index(self.line)?;
        let text = doc.lines.remove(index);
        self.removed = Some((index, text));
        if self.flags.moves_caret(phase) {
            doc.caret = (index.saturating_sub(1), 0);
        }
        Ok(())
    }
}

impl Command<Document> for DeleteLine {
    fn execute(&mut self, doc: &mut Document) -> CommandResult {
        self.apply(doc, Phase::Execute)
    }

    fn description(&self) -> &str {
        "Delete line"
    }
}

impl UndoableCommand<Document> for DeleteLine {
    fn undo(&mut self, doc: &mut Document) -> CommandResult {
        let (index, text) = self
            .removed
            .take()
            .ok_or_else(|| CommandError::failed("line delete was never applied"))?;
        doc.lines.insert(index, text);
        if self.flags.moves_caret(Phase::Undo) {
            doc.caret = (index, 0);
        }
        Ok(())
    }

    fn redo(&mut self, doc: &mut Document) -> CommandResult {
        self.apply(doc, Phase::Redo)
    }
}

text_editing_flags!(DeleteLine);

// ============================================================================
// Factory
// ============================================================================

/// Builds the commands above.
pub struct DocumentFactory;

impl TextEditingCommandFactory<Document> for DocumentFactory {
    fn create_insert_text_command(
        &self,
        position: TextPosition,
        text: &str,
    ) -> Box<dyn TextEditingCommand<Document>> {
        Box::new(InsertText::new(position, text))
    }

    fn create_insert_text_from_text_range_command(
        &self,
        position: TextPosition,
        source: SingleLineTextRange,
    ) -> Box<dyn TextEditingCommand<Document>> {
        Box::new(InsertTextFromRange::new(position, source))
    }

    fn create_delete_text_command(
        &self,
        range: SingleLineTextRange,
    ) -> Box<dyn TextEditingCommand<Document>> {
        Box::new(DeleteText::new(range))
    }

    fn create_insert_line_command(
        &self,
        line: LinePosition,
    ) -> Box<dyn TextEditingCommand<Document>> {
        Box::new(InsertLine::new(line))
    }

    fn create_delete_line_command(
        &self,
        line: LinePosition,
    ) -> Box<dyn TextEditingCommand<Document>> {
        Box::new(DeleteLine::new(line))
    }
}

// ============================================================================
// Typing (mergeable)
// ============================================================================

/// Inserts text at a concrete position; consecutive typing merges.
pub struct Typing {
    line: usize,
    character: usize,
    text: String,
}

impl Typing {
    pub fn new(line: usize, character: usize, text: &str) -> Self {
        Self {
            line,
            character,
            text: text.to_string(),
        }
    }

    fn end(&self) -> usize {
        self.character + self.text.chars().count()
    }
}

impl Command<Document> for Typing {
    fn execute(&mut self, doc: &mut Document) -> CommandResult {
        let position = TextPosition::at(self.line, self.character);
        let (line, character) = doc.resolve(position)?;
        doc.insert_at(line, character, &self.text);
        doc.caret = (line, self.end());
        Ok(())
    }

    fn description(&self) -> &str {
        "Typing"
    }
}

impl UndoableCommand<Document> for Typing {
    fn undo(&mut self, doc: &mut Document) -> CommandResult {
        doc.remove_at(self.line, self.character, self.end());
        doc.caret = (self.line, self.character);
        Ok(())
    }
}

impl MergeableCommand<Document> for Typing {
    fn can_merge_from(&self, other: &dyn MergeableCommand<Document>) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|next| next.line == self.line && next.character == self.end())
    }

    fn merge_from(&mut self, other: &dyn MergeableCommand<Document>) {
        if let Some(next) = other.as_any().downcast_ref::<Self>() {
            self.text.push_str(&next.text);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A command that always fails.
pub struct Broken;

impl Command<Document> for Broken {
    fn execute(&mut self, _doc: &mut Document) -> CommandResult {
        Err(CommandError::failed("broken"))
    }
}

impl UndoableCommand<Document> for Broken {
    fn undo(&mut self, _doc: &mut Document) -> CommandResult {
        Err(CommandError::failed("broken"))
    }
}
