#![forbid(unsafe_code)]

//! Word-boundary search used to resolve [`CharacterPosition::Word`].
//!
//! The tokenizer is a capability handed to whichever operation needs it;
//! there is no process-wide default. [`GraphemeWordTokenizer`] is provided
//! for callers that do not bring their own.
//!
//! [`CharacterPosition::Word`]: crate::CharacterPosition::Word

use std::fmt;

use unicode_segmentation::UnicodeSegmentation;

/// Direction to search when resolving a word position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordSearchDirection {
    /// Toward the start of the text.
    Left,
    /// Toward the end of the text.
    Right,
}

impl fmt::Display for WordSearchDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// Finds word boundaries inside a single line of text.
///
/// Offsets are character (`char`) offsets. For any `from` strictly inside
/// the text, implementations return a value within `0..=len` that moves
/// toward the respective end.
pub trait WordTokenizer {
    /// Offset of the next word boundary at or after `from`.
    fn next_word_boundary(&self, text: &str, from: usize) -> usize;

    /// Offset of the previous word boundary at or before `from`.
    fn previous_word_boundary(&self, text: &str, from: usize) -> usize;
}

impl<T: WordTokenizer + ?Sized> WordTokenizer for &T {
    fn next_word_boundary(&self, text: &str, from: usize) -> usize {
        (**self).next_word_boundary(text, from)
    }

    fn previous_word_boundary(&self, text: &str, from: usize) -> usize {
        (**self).previous_word_boundary(text, from)
    }
}

/// Tokenizer that skips runs of graphemes sharing a class
/// (whitespace, word characters, punctuation).
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphemeWordTokenizer;

impl GraphemeWordTokenizer {
    /// Create a new tokenizer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GraphemeClass {
    Space,
    Word,
    Punct,
}

fn grapheme_class(g: &str) -> GraphemeClass {
    if g.chars().all(char::is_whitespace) {
        GraphemeClass::Space
    } else if g.chars().any(char::is_alphanumeric) {
        GraphemeClass::Word
    } else {
        GraphemeClass::Punct
    }
}

/// Start offset (in chars) and class of every grapheme, plus the char length.
fn segments(text: &str) -> (Vec<(usize, GraphemeClass)>, usize) {
    let mut out = Vec::new();
    let mut offset = 0usize;
    for g in text.graphemes(true) {
        out.push((offset, grapheme_class(g)));
        offset = offset.saturating_add(g.chars().count());
    }
    (out, offset)
}

/// Number of graphemes that start before `from`.
fn grapheme_index(segments: &[(usize, GraphemeClass)], from: usize) -> usize {
    segments.partition_point(|(start, _)| *start < from)
}

impl WordTokenizer for GraphemeWordTokenizer {
    fn next_word_boundary(&self, text: &str, from: usize) -> usize {
        let (segs, len) = segments(text);
        if from >= len {
            return len;
        }
        // Grapheme containing `from`, so a mid-cluster offset keeps its word.
        let mut idx = segs
            .partition_point(|(start, _)| *start <= from)
            .saturating_sub(1);
        let target = segs[idx].1;
        while idx < segs.len() && segs[idx].1 == target {
            idx += 1;
        }
        segs.get(idx).map_or(len, |(start, _)| *start)
    }

    fn previous_word_boundary(&self, text: &str, from: usize) -> usize {
        let (segs, _) = segments(text);
        let mut idx = grapheme_index(&segs, from);
        if idx == 0 {
            return 0;
        }
        let target = segs[idx - 1].1;
        while idx > 0 && segs[idx - 1].1 == target {
            idx -= 1;
        }
        segs.get(idx).map_or(0, |(start, _)| *start)
    }
}
