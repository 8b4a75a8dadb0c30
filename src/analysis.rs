//! Pure introspection of a pattern: `analyze()` runs the same decision logic
//! `compile()` uses internally but never builds an automaton.

use crate::errors::Result;
use crate::internal::parser::parse;
use crate::internal::selector::{self, ShapeFlags};

/// The matching strategy a compiled [`crate::Matcher`] ends up using.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatcherKind {
    /// Direct NFA simulation, no automaton build.
    Nfa,
    /// A freshly subset-constructed DFA, unminimized.
    Dfa,
    /// A minimized DFA.
    MinDfa,
    /// An on-the-fly, memoized subset construction.
    LazyDfa,
    /// A single literal, scanned with Knuth-Morris-Pratt.
    LiteralKmp,
    /// A single literal, scanned with Boyer-Moore.
    LiteralBm,
    /// A literal set, scanned with Aho-Corasick.
    AhoCorasick,
}

impl std::fmt::Display for MatcherKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MatcherKind::Nfa => "nfa",
            MatcherKind::Dfa => "dfa",
            MatcherKind::MinDfa => "min-dfa",
            MatcherKind::LazyDfa => "lazy-dfa",
            MatcherKind::LiteralKmp => "literal-kmp",
            MatcherKind::LiteralBm => "literal-bm",
            MatcherKind::AhoCorasick => "aho-corasick",
        };
        f.write_str(s)
    }
}

/// The result of [`crate::analyze`]: which strategy would be chosen, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Analysis {
    /// The chosen strategy.
    pub kind: MatcherKind,
    /// A short human-readable explanation of the decision.
    pub rationale: String,
    /// The pattern's complexity score.
    pub complexity: u32,
    /// The required literal set extracted from the pattern.
    pub literals: Vec<String>,
    /// Whether the whole pattern is a pure literal.
    pub is_literal: bool,
    /// Whether the pattern contains `.` anywhere.
    pub has_wildcards: bool,
    /// Whether the pattern contains `|` anywhere.
    pub has_alts: bool,
    /// Whether the pattern contains `*` anywhere.
    pub has_stars: bool,
}

impl From<ShapeFlags> for (bool, bool, bool, bool) {
    fn from(flags: ShapeFlags) -> Self {
        (
            flags.is_literal,
            flags.has_wildcards,
            flags.has_alts,
            flags.has_stars,
        )
    }
}

/// Analyze `pattern` and report the strategy [`crate::compile`] would pick,
/// without building any automaton.
pub fn analyze(pattern: &str, text_size_hint: Option<u64>) -> Result<Analysis> {
    let ast = parse(pattern)?;
    let selection = selector::select(&ast, text_size_hint);
    let (is_literal, has_wildcards, has_alts, has_stars) = selection.flags.into();
    Ok(Analysis {
        kind: selection.kind,
        rationale: selection.rationale.to_string(),
        complexity: selection.complexity,
        literals: selection.literals,
        is_literal,
        has_wildcards,
        has_alts,
        has_stars,
    })
}
