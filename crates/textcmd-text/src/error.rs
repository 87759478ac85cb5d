#![forbid(unsafe_code)]

//! Errors raised while constructing or normalizing positions.

use std::fmt;

use crate::word::WordSearchDirection;

/// Result alias for position operations.
pub type PositionResult<T> = Result<T, PositionError>;

/// Errors that can occur when building or resolving a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// A raw index was outside the legal domain (negative).
    OutOfRange { value: i64 },
    /// A concrete index is beyond the bound it was normalized against.
    IndexOutOfRange { index: usize, bound: usize },
    /// A word search has no room to move in the requested direction.
    WordSearchExhausted {
        offset: usize,
        direction: WordSearchDirection,
    },
    /// The position cannot be resolved without more context.
    InvalidOperation(&'static str),
}

impl PositionError {
    /// True for the errors raised when a position does not fit its bound.
    #[must_use]
    pub fn is_index_out_of_range(&self) -> bool {
        matches!(
            self,
            Self::IndexOutOfRange { .. } | Self::WordSearchExhausted { .. }
        )
    }
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { value } => {
                write!(f, "position {value} is negative")
            }
            Self::IndexOutOfRange { index, bound } => {
                write!(f, "position {index} is beyond bound {bound}")
            }
            Self::WordSearchExhausted { offset, direction } => {
                write!(f, "cannot find word {direction} of offset {offset}")
            }
            Self::InvalidOperation(msg) => write!(f, "invalid operation: {msg}"),
        }
    }
}

impl std::error::Error for PositionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_values() {
        let err = PositionError::IndexOutOfRange {
            index: 1000,
            bound: 5,
        };
        let text = err.to_string();
        assert!(text.contains("1000"));
        assert!(text.contains('5'));
    }

    #[test]
    fn word_exhaustion_counts_as_index_out_of_range() {
        let err = PositionError::WordSearchExhausted {
            offset: 0,
            direction: WordSearchDirection::Left,
        };
        assert!(err.is_index_out_of_range());
        assert!(!PositionError::OutOfRange { value: -1 }.is_index_out_of_range());
    }
}
