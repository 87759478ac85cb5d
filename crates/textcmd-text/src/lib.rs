#![forbid(unsafe_code)]

//! textcmd text model
//!
//! Symbolic positions and ranges inside a line/character-addressed buffer.
//!
//! # Key Components
//!
//! - [`CharacterPosition`] - Offset within a line, or the `End`/`Word` sentinel
//! - [`LinePosition`] - Line index, or the `End` sentinel
//! - [`TextPosition`] - A line and character pair with a total order
//! - [`SingleLineTextRange`] / [`TextRange`] - Ranges between positions
//! - [`WordTokenizer`] - Capability used to resolve `Word` positions
//!
//! # Role in textcmd
//! Commands in `textcmd-runtime` are parameterized by these values. Nothing
//! here touches a buffer: sentinels are resolved ("normalized") against the
//! text or line count the caller supplies.

pub mod error;
pub mod position;
pub mod range;
pub mod text_position;
pub mod word;

pub use error::{PositionError, PositionResult};
pub use position::{CharacterPosition, LinePosition};
pub use range::{SingleLineTextRange, TextRange};
pub use text_position::TextPosition;
pub use word::{GraphemeWordTokenizer, WordSearchDirection, WordTokenizer};
