#![forbid(unsafe_code)]

//! Symbolic line and character positions.
//!
//! A position is either a concrete zero-based index or a sentinel that is
//! resolved ("normalized") against the buffer it is applied to:
//!
//! | type                  | sentinels      |
//! |-----------------------|----------------|
//! | [`CharacterPosition`] | `End`, `Word`  |
//! | [`LinePosition`]      | `End`          |
//!
//! `Begin` is not a separate sentinel: it is the zero index, so
//! `CharacterPosition::BEGIN == CharacterPosition::Index(0)`.
//!
//! Character offsets count `char`s, not bytes.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{PositionError, PositionResult};
use crate::word::{WordSearchDirection, WordTokenizer};

/// Render an index with thousands separators (`1000` -> `1,000`).
fn group_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn index_from_raw(value: i64) -> PositionResult<usize> {
    usize::try_from(value).map_err(|_| PositionError::OutOfRange { value })
}

// ============================================================================
// CharacterPosition
// ============================================================================

/// A position within a single line of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterPosition {
    /// A concrete character offset.
    Index(usize),
    /// The end of the line.
    End,
    /// The nearest word boundary, resolved with a search origin and direction.
    Word,
}

impl Default for CharacterPosition {
    fn default() -> Self {
        Self::BEGIN
    }
}

impl CharacterPosition {
    /// The beginning of the line.
    pub const BEGIN: Self = Self::Index(0);

    /// Create a position at a concrete offset.
    #[must_use]
    pub const fn at(index: usize) -> Self {
        Self::Index(index)
    }

    /// Concrete offset, if this is not a sentinel.
    #[must_use]
    pub const fn index(self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(index),
            Self::End | Self::Word => None,
        }
    }

    /// Symbolic rendering: `Begin`, `End`, `Word`, or the grouped index.
    #[must_use]
    pub fn index_string(self) -> String {
        match self {
            Self::Index(0) => "Begin".to_string(),
            Self::Index(index) => group_thousands(index),
            Self::End => "End".to_string(),
            Self::Word => "Word".to_string(),
        }
    }

    /// Resolve against `text` without word-search context.
    ///
    /// # Errors
    ///
    /// - [`PositionError::IndexOutOfRange`] if the index is past the end.
    /// - [`PositionError::InvalidOperation`] for [`CharacterPosition::Word`].
    pub fn normalize(self, text: &str) -> PositionResult<usize> {
        let len = text.chars().count();
        match self {
            Self::Index(index) if index > len => {
                Err(PositionError::IndexOutOfRange { index, bound: len })
            }
            Self::Index(index) => Ok(index),
            Self::End => Ok(len),
            Self::Word => Err(PositionError::InvalidOperation(
                "cannot normalize a Word position without a search origin",
            )),
        }
    }

    /// Resolve against `text`, searching for a word boundary from
    /// `search_from` in `direction` when this is [`CharacterPosition::Word`].
    ///
    /// # Errors
    ///
    /// - [`PositionError::IndexOutOfRange`] if an index is past the end.
    /// - [`PositionError::WordSearchExhausted`] when searching left from 0
    ///   or right from the end of the text.
    /// - [`PositionError::InvalidOperation`] if `search_from` is itself `Word`.
    pub fn normalize_word<T>(
        self,
        text: &str,
        search_from: CharacterPosition,
        direction: WordSearchDirection,
        tokenizer: &T,
    ) -> PositionResult<usize>
    where
        T: WordTokenizer + ?Sized,
    {
        if self != Self::Word {
            return self.normalize(text);
        }

        let len = text.chars().count();
        let origin = search_from.normalize(text)?;
        let exhausted = match direction {
            WordSearchDirection::Left => origin == 0,
            WordSearchDirection::Right => origin == len,
        };
        if exhausted {
            return Err(PositionError::WordSearchExhausted {
                offset: origin,
                direction,
            });
        }

        let found = match direction {
            WordSearchDirection::Left => tokenizer.previous_word_boundary(text, origin),
            WordSearchDirection::Right => tokenizer.next_word_boundary(text, origin),
        };
        Ok(found.min(len))
    }
}

impl From<usize> for CharacterPosition {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl TryFrom<i64> for CharacterPosition {
    type Error = PositionError;

    fn try_from(value: i64) -> PositionResult<Self> {
        index_from_raw(value).map(Self::Index)
    }
}

impl Ord for CharacterPosition {
    /// `Word` sorts before everything else, `End` after everything else,
    /// and concrete indices compare numerically.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Word, Self::Word) | (Self::End, Self::End) => Ordering::Equal,
            (Self::Word, _) | (_, Self::End) => Ordering::Less,
            (_, Self::Word) | (Self::End, _) => Ordering::Greater,
            (Self::Index(a), Self::Index(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for CharacterPosition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CharacterPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CharacterPosition({})", self.index_string())
    }
}

// ============================================================================
// LinePosition
// ============================================================================

/// A zero-based line index, or the end of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinePosition {
    /// A concrete line index.
    Index(usize),
    /// One past the last line.
    End,
}

impl Default for LinePosition {
    fn default() -> Self {
        Self::BEGIN
    }
}

impl LinePosition {
    /// The first line.
    pub const BEGIN: Self = Self::Index(0);

    /// Create a position at a concrete line.
    #[must_use]
    pub const fn at(index: usize) -> Self {
        Self::Index(index)
    }

    /// Concrete line index, if this is not a sentinel.
    #[must_use]
    pub const fn index(self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(index),
            Self::End => None,
        }
    }

    /// Symbolic rendering: `Begin`, `End`, or the grouped index.
    #[must_use]
    pub fn index_string(self) -> String {
        match self {
            Self::Index(0) => "Begin".to_string(),
            Self::Index(index) => group_thousands(index),
            Self::End => "End".to_string(),
        }
    }

    /// Resolve against a buffer with `line_count` lines.
    ///
    /// # Errors
    ///
    /// [`PositionError::IndexOutOfRange`] if the index exceeds `line_count`.
    pub fn normalize(self, line_count: usize) -> PositionResult<usize> {
        match self {
            Self::Index(index) if index > line_count => Err(PositionError::IndexOutOfRange {
                index,
                bound: line_count,
            }),
            Self::Index(index) => Ok(index),
            Self::End => Ok(line_count),
        }
    }
}

impl From<usize> for LinePosition {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl TryFrom<i64> for LinePosition {
    type Error = PositionError;

    fn try_from(value: i64) -> PositionResult<Self> {
        index_from_raw(value).map(Self::Index)
    }
}

impl Ord for LinePosition {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::End, Self::End) => Ordering::Equal,
            (Self::End, _) => Ordering::Greater,
            (_, Self::End) => Ordering::Less,
            (Self::Index(a), Self::Index(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for LinePosition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for LinePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LinePosition({})", self.index_string())
    }
}
