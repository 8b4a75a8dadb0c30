//! Pattern + text-size hint -> strategy tag. Pure and
//! side-effect free; shared by `compile()` (picks a matcher) and `analyze()`
//! (reports the same decision for introspection).

use super::ast::Ast;
use super::literal_extractor::{self, LiteralExtraction};
use crate::analysis::MatcherKind;

/// Heuristic weights for `complexity_score`: exact values are only a
/// contract in that the decision table below references them.
const CHAR_WEIGHT: u32 = 1;
const DOT_WEIGHT: u32 = 2;
const ALT_WEIGHT: u32 = 3;
const STAR_WEIGHT: u32 = 5;

const NFA_SIZE_THRESHOLD: u64 = 500;
const LAZY_DFA_SIZE_THRESHOLD: u64 = 10 * 1024;
const COMPLEXITY_THRESHOLD: u32 = 50;
const KMP_LENGTH_THRESHOLD: usize = 10;

/// Syntactic shape flags reported by `analyze()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ShapeFlags {
    pub(crate) is_literal: bool,
    pub(crate) has_wildcards: bool,
    pub(crate) has_alts: bool,
    pub(crate) has_stars: bool,
}

pub(crate) struct Selection {
    pub(crate) kind: MatcherKind,
    pub(crate) rationale: &'static str,
    pub(crate) complexity: u32,
    pub(crate) literals: Vec<String>,
    pub(crate) flags: ShapeFlags,
}

/// Sum of per-node weights, recursively: `+1` per `Char`, `+2` per `Dot`,
/// `+3` per `Alt`, `+5` per `Star`.
pub(crate) fn complexity_score(ast: &Ast) -> u32 {
    match ast {
        Ast::Char(_) => CHAR_WEIGHT,
        Ast::Dot => DOT_WEIGHT,
        Ast::Concat(l, r) => complexity_score(l) + complexity_score(r),
        Ast::Alt(l, r) => ALT_WEIGHT + complexity_score(l) + complexity_score(r),
        Ast::Star(c) => STAR_WEIGHT + complexity_score(c),
    }
}

fn shape_flags(ast: &Ast, extraction: &LiteralExtraction, is_literal: bool) -> ShapeFlags {
    fn scan(ast: &Ast, has_wildcards: &mut bool, has_stars: &mut bool) {
        match ast {
            Ast::Char(_) => {}
            Ast::Dot => *has_wildcards = true,
            Ast::Concat(l, r) | Ast::Alt(l, r) => {
                scan(l, has_wildcards, has_stars);
                scan(r, has_wildcards, has_stars);
            }
            Ast::Star(c) => {
                *has_stars = true;
                scan(c, has_wildcards, has_stars);
            }
        }
    }
    let mut has_wildcards = false;
    let mut has_stars = false;
    scan(ast, &mut has_wildcards, &mut has_stars);
    ShapeFlags {
        is_literal,
        has_wildcards,
        has_alts: extraction.has_alt,
        has_stars,
    }
}

/// Decide the matching strategy for `ast`, given an optional text-size hint
/// in bytes (`None` when the caller has no estimate, e.g. a single in-memory
/// line of unknown provenance).
pub(crate) fn select(ast: &Ast, text_size_hint: Option<u64>) -> Selection {
    let extraction = literal_extractor::extract(ast);
    let complexity = complexity_score(ast);

    if let Some(mut literals) = literal_extractor::alternation_of_literals(ast) {
        if literals.len() >= 2 {
            literals.sort();
            let flags = shape_flags(ast, &extraction, false);
            return Selection {
                kind: MatcherKind::AhoCorasick,
                rationale: "alternation of >= 2 pure literals matches an Aho-Corasick literal set",
                complexity,
                literals,
                flags,
            };
        }
    }

    if let Some(literal) = literal_extractor::pure_literal_pattern(ast) {
        let flags = shape_flags(ast, &extraction, true);
        let kind = if literal.chars().count() < KMP_LENGTH_THRESHOLD {
            MatcherKind::LiteralKmp
        } else {
            MatcherKind::LiteralBm
        };
        let rationale = if kind == MatcherKind::LiteralKmp {
            "pure literal shorter than the KMP/BM crossover uses KMP"
        } else {
            "pure literal at or above the KMP/BM crossover uses Boyer-Moore"
        };
        return Selection {
            kind,
            rationale,
            complexity,
            literals: vec![literal],
            flags,
        };
    }

    let flags = shape_flags(ast, &extraction, false);
    let (kind, rationale) = match text_size_hint {
        Some(size) if size < NFA_SIZE_THRESHOLD => (
            MatcherKind::Nfa,
            "text size below the NFA build-cost amortization threshold",
        ),
        Some(size) if size < LAZY_DFA_SIZE_THRESHOLD => (
            MatcherKind::LazyDfa,
            "text size too small to amortize a full DFA build",
        ),
        _ if complexity > COMPLEXITY_THRESHOLD => (
            MatcherKind::LazyDfa,
            "pattern complexity exceeds the DFA-explosion threshold",
        ),
        _ => (MatcherKind::MinDfa, "default regex strategy: build and minimize a DFA"),
    };

    Selection {
        kind,
        rationale,
        complexity,
        literals: extraction.literals,
        flags,
    }
}
