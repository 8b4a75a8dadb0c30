//! Compilation options for [`crate::compile`].

/// An explicit override of the matching strategy, bypassing the algorithm
/// selector. `Auto` lets the selector decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatcherChoice {
    /// Defer to the algorithm selector.
    #[default]
    Auto,
    /// Force direct NFA simulation.
    Nfa,
    /// Force a freshly subset-constructed, unminimized DFA.
    Dfa,
    /// Force a minimized DFA.
    MinDfa,
    /// Force an on-the-fly, memoized lazy DFA.
    LazyDfa,
    /// Force a Knuth-Morris-Pratt literal scan; falls back to `min-dfa` if
    /// the pattern is not a pure literal.
    LiteralKmp,
    /// Force a Boyer-Moore literal scan; falls back to `min-dfa` if the
    /// pattern is not a pure literal.
    LiteralBm,
    /// Force an Aho-Corasick multi-literal scan; falls back to `min-dfa` if
    /// the pattern is not a pure alternation of literals.
    AhoCorasick,
}

/// An explicit override of the line prefilter. `Auto` lets
/// the prefilter-selection rules decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrefilterChoice {
    /// Defer to the default prefilter-selection rules.
    #[default]
    Auto,
    /// Force a Knuth-Morris-Pratt literal prefilter.
    Kmp,
    /// Force a Boyer-Moore literal prefilter.
    BoyerMoore,
    /// Force an Aho-Corasick multi-literal prefilter.
    AhoCorasick,
    /// Disable the prefilter; every line reaches the matcher.
    Off,
}

/// The default chunk size used by the streaming line reader, in bytes.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// The default file-size threshold below which the prefilter is skipped
/// entirely, in bytes.
pub const DEFAULT_PREFILTER_SIZE_THRESHOLD: u64 = 10 * 1024;

/// Options controlling how a pattern is compiled and how a stream is scanned.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileOptions {
    /// An estimate of the input size in bytes, used by the algorithm selector.
    pub text_size_hint: Option<u64>,
    /// Lowercase both literals and line before the prefilter test. Does not
    /// affect the regex matcher itself, which stays case-sensitive.
    pub ignore_case: bool,
    /// Report a line as a hit iff the matcher finds *no* match on it.
    pub invert_match: bool,
    /// Override the matching strategy; `Auto` defers to the selector.
    pub matcher: MatcherChoice,
    /// Override the prefilter; `Auto` defers to the selection rules.
    pub prefilter: PrefilterChoice,
    /// Chunk size used by the streaming line reader.
    pub chunk_size: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            text_size_hint: None,
            ignore_case: false,
            invert_match: false,
            matcher: MatcherChoice::Auto,
            prefilter: PrefilterChoice::Auto,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}
