//! Error types for the `linerex` crate.
//!
//! Compilation and streaming have distinct failure domains:
//! a bad pattern is a [`CompileError`], a bad file read while streaming a
//! matcher over a file is a [`MatchError`]. Neither automaton construction nor
//! scanning over a valid automaton can fail.

use thiserror::Error;

/// The result type used by [`crate::compile`] and [`crate::analyze`].
pub type Result<T> = std::result::Result<T, CompileError>;

/// The result type used while streaming matches from a file.
pub type StreamResult<T> = std::result::Result<T, MatchError>;

/// An error produced while parsing a pattern string.
///
/// Carries the byte offset at which parsing failed.A.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at byte offset {offset}")]
pub struct CompileError {
    /// The byte offset into the pattern string at which the error was detected.
    pub offset: usize,
    /// The kind of parse error.
    pub kind: CompileErrorKind,
}

impl CompileError {
    pub(crate) fn new(offset: usize, kind: CompileErrorKind) -> Self {
        Self { offset, kind }
    }
}

/// The kind of a [`CompileError`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileErrorKind {
    /// The pattern string was empty.
    #[error("empty pattern")]
    EmptyPattern,
    /// An alternation branch or a concatenation had no factors, e.g. `a|` or `|a`.
    #[error("empty concatenation")]
    EmptyConcatenation,
    /// A `(` was never closed by a matching `)`.
    #[error("unclosed group")]
    UnclosedGroup,
    /// A `)` appeared without a matching `(`.
    #[error("unmatched ')'")]
    UnopenedGroup,
    /// A `*` appeared where no factor preceded it.
    #[error("'*' with nothing to repeat")]
    LeadingStar,
    /// The pattern ended with a trailing, unescaped `\`.
    #[error("trailing '\\'")]
    TrailingEscape,
    /// Trailing characters remained after a complete alternation was parsed.
    #[error("unexpected trailing input")]
    TrailingInput,
}

/// An error that can occur while streaming matches over a file.
#[derive(Error, Debug)]
pub enum MatchError {
    /// The chunked reader failed to open or read the underlying file.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
