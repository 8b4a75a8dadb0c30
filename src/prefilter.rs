//! The cheap line-rejection filter that sits in front of the regex matcher.
//! Soundness contract: if the predicate rejects a line, the matcher is
//! guaranteed to find no match on it (false negatives forbidden); false
//! positives are fine and expected.

use crate::analysis::MatcherKind;
use crate::internal::literal::{aho_corasick::AhoCorasick, boyer_moore, kmp};
use crate::internal::literal_extractor::LiteralExtraction;
use crate::options::{CompileOptions, PrefilterChoice, DEFAULT_PREFILTER_SIZE_THRESHOLD};

pub(crate) enum Prefilter {
    /// No prefilter; every line passes through to the matcher.
    None,
    /// A single literal, tested with Knuth-Morris-Pratt `contains`.
    Kmp { literal: String },
    /// A single literal, tested with Boyer-Moore `contains`.
    BoyerMoore { literal: String },
    /// A literal set; `any` selects `contains` (alternation pattern),
    /// `!any` selects `containsAll` (concatenation pattern).
    AhoCorasick { automaton: AhoCorasick, any: bool },
}

impl Prefilter {
    /// Whether `line` might contain a match. `false` proves no match is
    /// possible; `true` means the line must still go through the matcher.
    pub(crate) fn passes(&self, line: &str, ignore_case: bool) -> bool {
        match self {
            Prefilter::None => true,
            Prefilter::Kmp { literal } => {
                if ignore_case {
                    kmp::contains(literal, &line.to_lowercase())
                } else {
                    kmp::contains(literal, line)
                }
            }
            Prefilter::BoyerMoore { literal } => {
                if ignore_case {
                    boyer_moore::contains(literal, &line.to_lowercase())
                } else {
                    boyer_moore::contains(literal, line)
                }
            }
            Prefilter::AhoCorasick { automaton, any } => {
                let owned;
                let haystack = if ignore_case {
                    owned = line.to_lowercase();
                    owned.as_str()
                } else {
                    line
                };
                if *any {
                    automaton.contains(haystack)
                } else {
                    automaton.contains_all(haystack)
                }
            }
        }
    }
}

/// Choose a prefilter for a compiled matcher, honoring an explicit override
/// and the default selection rules.
pub(crate) fn select(
    matcher_kind: MatcherKind,
    extraction: &LiteralExtraction,
    options: &CompileOptions,
) -> Prefilter {
    match options.prefilter {
        PrefilterChoice::Off => return Prefilter::None,
        PrefilterChoice::Kmp => {
            return match extraction.literals.first() {
                Some(literal) => Prefilter::Kmp {
                    literal: lower_if(literal, options.ignore_case),
                },
                None => Prefilter::None,
            };
        }
        PrefilterChoice::BoyerMoore => {
            return match extraction.literals.first() {
                Some(literal) => Prefilter::BoyerMoore {
                    literal: lower_if(literal, options.ignore_case),
                },
                None => Prefilter::None,
            };
        }
        PrefilterChoice::AhoCorasick => {
            if extraction.literals.is_empty() {
                return Prefilter::None;
            }
            let literals: Vec<String> = extraction
                .literals
                .iter()
                .map(|l| lower_if(l, options.ignore_case))
                .collect();
            return Prefilter::AhoCorasick {
                automaton: AhoCorasick::build(&literals),
                any: extraction.has_alt,
            };
        }
        PrefilterChoice::Auto => {}
    }

    // A pure-literal matcher already is the scan; layering a prefilter in
    // front of it would do the same work twice.
    if matches!(
        matcher_kind,
        MatcherKind::LiteralKmp | MatcherKind::LiteralBm | MatcherKind::AhoCorasick
    ) {
        return Prefilter::None;
    }

    if let Some(size) = options.text_size_hint {
        if size < DEFAULT_PREFILTER_SIZE_THRESHOLD {
            return Prefilter::None;
        }
    }

    match extraction.literals.len() {
        0 => Prefilter::None,
        1 => Prefilter::BoyerMoore {
            literal: lower_if(&extraction.literals[0], options.ignore_case),
        },
        _ => {
            let literals: Vec<String> = extraction
                .literals
                .iter()
                .map(|l| lower_if(l, options.ignore_case))
                .collect();
            Prefilter::AhoCorasick {
                automaton: AhoCorasick::build(&literals),
                any: extraction.has_alt,
            }
        }
    }
}

fn lower_if(s: &str, ignore_case: bool) -> String {
    if ignore_case {
        s.to_lowercase()
    } else {
        s.to_string()
    }
}
