#![forbid(missing_docs)]
//! # `linerex`
//!
//! `linerex` is a from-scratch regular-expression engine over a small
//! ERE-subset grammar (literals, `.`, `*`, concatenation, `|`, grouping),
//! built around several interchangeable matching strategies -- direct NFA
//! simulation, a freshly subset-constructed DFA, a minimized DFA, an
//! on-the-fly lazy DFA, and dedicated literal scanners (KMP, Boyer-Moore,
//! Aho-Corasick) for patterns that reduce to a literal or a literal set.
//! An algorithm selector picks among them automatically based on the
//! pattern's shape and an optional input-size hint; callers who already
//! know better can override the choice explicitly.
//!
//! # Example
//! ```rust
//! use linerex::{compile, CompileOptions};
//!
//! let matcher = compile("cat|dog|bird", CompileOptions::default()).unwrap();
//! assert!(matcher.is_match("cat"));
//! let found = matcher.find_all("a cat and a dog");
//! let hits: Vec<&str> = found.iter().map(|m| m.text()).collect();
//! assert_eq!(hits, vec!["cat", "dog"]);
//! ```
//!
//! # Crate features
//! - `serde` (enabled by default): derives `Serialize`/`Deserialize` on
//!   [`Match`], [`Span`], [`Analysis`], and [`MatcherKind`].

/// Pattern introspection: reports the matching strategy [`compile`] would
/// pick, without building an automaton.
mod analysis;
pub use analysis::{analyze, Analysis, MatcherKind};

/// Error types for compilation and streaming.
mod errors;
pub use errors::{CompileError, CompileErrorKind, MatchError, Result, StreamResult};

/// The chunked file reader feeding the streaming matcher pipeline.
mod line_reader;

/// The match record type.
mod match_type;
pub use match_type::Match;

/// The compiled matcher façade.
mod matcher;
pub use matcher::{compile, LineMatches, Matcher};

/// Compilation options.
mod options;
pub use options::{CompileOptions, MatcherChoice, PrefilterChoice, DEFAULT_CHUNK_SIZE};

/// The line prefilter sitting in front of the matcher.
mod prefilter;

/// The byte-range span type.
mod span;
pub use span::Span;

/// Internal automaton machinery: parser, NFA/DFA builders, minimizer,
/// lazy DFA, literal scanners, literal extraction, algorithm selector.
mod internal;
