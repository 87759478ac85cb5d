#![forbid(unsafe_code)]

//! Ranges of text, on one line or spanning several.
//!
//! Ranges are plain values: they never touch a buffer. Resolving a range to
//! concrete offsets takes the line's text (and a tokenizer for `Word`
//! endpoints) explicitly.

use std::fmt;

use crate::error::PositionResult;
use crate::position::{CharacterPosition, LinePosition};
use crate::text_position::TextPosition;
use crate::word::{WordSearchDirection, WordTokenizer};

// ============================================================================
// SingleLineTextRange
// ============================================================================

/// A range of characters on a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SingleLineTextRange {
    line: LinePosition,
    begin: CharacterPosition,
    end: CharacterPosition,
}

impl SingleLineTextRange {
    /// Create a range on `line` from `begin` to `end`.
    #[must_use]
    pub const fn new(line: LinePosition, begin: CharacterPosition, end: CharacterPosition) -> Self {
        Self { line, begin, end }
    }

    /// The whole of `line`.
    #[must_use]
    pub const fn whole_line(line: LinePosition) -> Self {
        Self::new(line, CharacterPosition::BEGIN, CharacterPosition::End)
    }

    #[must_use]
    pub const fn line(&self) -> LinePosition {
        self.line
    }

    #[must_use]
    pub const fn begin(&self) -> CharacterPosition {
        self.begin
    }

    #[must_use]
    pub const fn end(&self) -> CharacterPosition {
        self.end
    }

    /// True when `begin <= end`.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.begin <= self.end
    }

    /// True when both endpoints are the same position.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// The lesser endpoint.
    #[must_use]
    pub fn first(&self) -> CharacterPosition {
        self.begin.min(self.end)
    }

    /// The greater endpoint.
    #[must_use]
    pub fn last(&self) -> CharacterPosition {
        self.begin.max(self.end)
    }

    /// A copy with the endpoints swapped if needed so that it is ordered.
    #[must_use]
    pub fn ordered(&self) -> Self {
        Self::new(self.line, self.first(), self.last())
    }

    #[must_use]
    pub const fn begin_position(&self) -> TextPosition {
        TextPosition::new(self.line, self.begin)
    }

    #[must_use]
    pub const fn end_position(&self) -> TextPosition {
        TextPosition::new(self.line, self.end)
    }

    /// Resolve both endpoints against `text`.
    ///
    /// A `Word` begin searches left from the end; a `Word` end searches
    /// right from the begin. Returns `(begin, end)` in range order.
    ///
    /// # Errors
    ///
    /// Any [`PositionError`](crate::PositionError) raised by normalization.
    pub fn character_indices<T>(&self, text: &str, tokenizer: &T) -> PositionResult<(usize, usize)>
    where
        T: WordTokenizer + ?Sized,
    {
        let begin = self
            .begin
            .normalize_word(text, self.end, WordSearchDirection::Left, tokenizer)?;
        let end = self
            .end
            .normalize_word(text, self.begin, WordSearchDirection::Right, tokenizer)?;
        Ok((begin, end))
    }

    /// Like [`character_indices`](Self::character_indices), sorted so the
    /// first offset is never greater than the second.
    ///
    /// # Errors
    ///
    /// Any [`PositionError`](crate::PositionError) raised by normalization.
    pub fn first_and_last_character_indices<T>(
        &self,
        text: &str,
        tokenizer: &T,
    ) -> PositionResult<(usize, usize)>
    where
        T: WordTokenizer + ?Sized,
    {
        let (begin, end) = self.character_indices(text, tokenizer)?;
        Ok((begin.min(end), begin.max(end)))
    }
}

impl fmt::Display for SingleLineTextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SingleLineTextRange({}, {} to {})",
            self.line.index_string(),
            self.begin.index_string(),
            self.end.index_string()
        )
    }
}

// ============================================================================
// TextRange
// ============================================================================

/// A range between two text positions, possibly on different lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextRange {
    begin: TextPosition,
    end: TextPosition,
}

impl Default for TextRange {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl TextRange {
    /// An empty range at the start of the buffer.
    pub const EMPTY: Self = Self::new(
        TextPosition::new(LinePosition::BEGIN, CharacterPosition::BEGIN),
        TextPosition::new(LinePosition::BEGIN, CharacterPosition::BEGIN),
    );

    #[must_use]
    pub const fn new(begin: TextPosition, end: TextPosition) -> Self {
        Self { begin, end }
    }

    #[must_use]
    pub const fn begin(&self) -> TextPosition {
        self.begin
    }

    #[must_use]
    pub const fn end(&self) -> TextPosition {
        self.end
    }

    /// The lesser of the two positions.
    #[must_use]
    pub fn first(&self) -> TextPosition {
        self.begin.min(self.end)
    }

    /// The greater of the two positions.
    #[must_use]
    pub fn last(&self) -> TextPosition {
        self.begin.max(self.end)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.begin <= self.end
    }

    #[must_use]
    pub fn is_same_line(&self) -> bool {
        self.begin.line() == self.end.line()
    }

    /// A copy with `begin <= end`.
    #[must_use]
    pub fn ordered(&self) -> Self {
        Self::new(self.first(), self.last())
    }

    /// The single-line form of this range, if both ends share a line.
    #[must_use]
    pub fn as_single_line(&self) -> Option<SingleLineTextRange> {
        self.is_same_line().then(|| {
            SingleLineTextRange::new(
                self.begin.line(),
                self.begin.character(),
                self.end.character(),
            )
        })
    }
}

impl From<SingleLineTextRange> for TextRange {
    fn from(range: SingleLineTextRange) -> Self {
        Self::new(range.begin_position(), range.end_position())
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TextRange(({}, {}) to ({}, {}))",
            self.begin.line().index_string(),
            self.begin.character().index_string(),
            self.end.line().index_string(),
            self.end.character().index_string()
        )
    }
}
