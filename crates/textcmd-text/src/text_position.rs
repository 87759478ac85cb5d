#![forbid(unsafe_code)]

//! A line + character position inside a buffer.

use std::cmp::Ordering;
use std::fmt;

use crate::position::{CharacterPosition, LinePosition};

/// An immutable position: a line and a character offset within it.
///
/// Lines are logical lines (paragraphs), not wrapped display rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextPosition {
    line: LinePosition,
    character: CharacterPosition,
}

impl TextPosition {
    /// Create a position from its components.
    #[must_use]
    pub const fn new(line: LinePosition, character: CharacterPosition) -> Self {
        Self { line, character }
    }

    /// Shorthand for a fully concrete position.
    #[must_use]
    pub const fn at(line: usize, character: usize) -> Self {
        Self::new(LinePosition::Index(line), CharacterPosition::Index(character))
    }

    /// The line component.
    #[must_use]
    pub const fn line(&self) -> LinePosition {
        self.line
    }

    /// The character component.
    #[must_use]
    pub const fn character(&self) -> CharacterPosition {
        self.character
    }

    /// Total order over positions.
    ///
    /// Lines compare first (`End` after every index). On the same line:
    ///
    /// | left \ right | Word    | Index(j)  | End     |
    /// |--------------|---------|-----------|---------|
    /// | Word         | Equal   | Less      | Less    |
    /// | Index(i)     | Greater | i cmp j   | Less    |
    /// | End          | Greater | Greater   | Equal   |
    #[must_use]
    pub fn compare(a: &Self, b: &Self) -> Ordering {
        a.line
            .cmp(&b.line)
            .then_with(|| a.character.cmp(&b.character))
    }
}

impl Ord for TextPosition {
    fn cmp(&self, other: &Self) -> Ordering {
        Self::compare(self, other)
    }
}

impl PartialOrd for TextPosition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TextPosition({}, {})",
            self.line.index_string(),
            self.character.index_string()
        )
    }
}
