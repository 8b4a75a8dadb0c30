//! The compiled matcher façade. `compile()` is the single
//! entry point: it runs the parser, the algorithm selector, and the
//! prefilter selector, then builds exactly the automaton the chosen
//! strategy needs.

use std::rc::Rc;

use log::debug;

use crate::analysis::MatcherKind;
use crate::errors::{Result, StreamResult};
use crate::internal::dfa::Dfa;
use crate::internal::dfa_sim;
use crate::internal::literal::{aho_corasick::AhoCorasick, boyer_moore, kmp};
use crate::internal::literal_extractor;
use crate::internal::minimizer::Minimizer;
use crate::internal::nfa::Nfa;
use crate::internal::nfa_sim;
use crate::internal::parser::parse;
use crate::internal::{ast::Ast, lazy_dfa::LazyDfa, selector};
use crate::line_reader::{ChunkedLineReader, PrefilteredLines};
use crate::match_type::Match;
use crate::options::{CompileOptions, MatcherChoice};
use crate::prefilter::{self, Prefilter};

/// Which literal-scanning algorithm backs a [`MatcherImpl::Literal`], so
/// `find_all` dispatches to the one the selector (or an explicit override)
/// actually picked rather than always using the same scanner under the hood.
#[derive(Clone, Copy)]
enum LiteralAlgo {
    Kmp,
    Bm,
}

enum MatcherImpl {
    Literal { literal: String, algo: LiteralAlgo },
    AhoCorasick {
        automaton: AhoCorasick,
        literals: Vec<String>,
    },
    Nfa(Rc<Nfa>),
    Dfa(Dfa),
    LazyDfa(LazyDfa),
}

/// A compiled pattern, ready to test lines or scan a file.
///
/// Holds exactly one matching strategy plus the prefilter chosen to sit in
/// front of it.
pub struct Matcher {
    imp: MatcherImpl,
    prefilter: Prefilter,
    kind: MatcherKind,
    ignore_case: bool,
    invert_match: bool,
    chunk_size: usize,
}

/// A single line yielded by [`Matcher::search_stream`], together with
/// whatever matches it contains.
pub struct LineMatches {
    /// The line's text, without its trailing newline.
    pub line: String,
    /// The line's 1-based position in the file.
    pub line_number: usize,
    /// Every match found on this line.
    pub matches: Vec<Match>,
}

/// Compile `pattern` into a [`Matcher`] under the given `options`.
///
/// Compilation errors are parser errors, surfaced unchanged.
/// NFA/DFA construction over a valid syntax tree never fails.
pub fn compile(pattern: &str, options: CompileOptions) -> Result<Matcher> {
    let ast = parse(pattern)?;
    let extraction = literal_extractor::extract(&ast);
    let selection = selector::select(&ast, options.text_size_hint);
    let kind = resolve_kind(options.matcher, selection.kind);

    debug!("compiled {pattern:?} to strategy {kind} ({})", selection.rationale);

    let imp = build_impl(&ast, kind);
    let prefilter = prefilter::select(kind, &extraction, &options);

    Ok(Matcher {
        imp,
        prefilter,
        kind,
        ignore_case: options.ignore_case,
        invert_match: options.invert_match,
        chunk_size: options.chunk_size,
    })
}

fn resolve_kind(choice: MatcherChoice, auto: MatcherKind) -> MatcherKind {
    match choice {
        MatcherChoice::Auto => auto,
        MatcherChoice::Nfa => MatcherKind::Nfa,
        MatcherChoice::Dfa => MatcherKind::Dfa,
        MatcherChoice::MinDfa => MatcherKind::MinDfa,
        MatcherChoice::LazyDfa => MatcherKind::LazyDfa,
        MatcherChoice::LiteralKmp => MatcherKind::LiteralKmp,
        MatcherChoice::LiteralBm => MatcherKind::LiteralBm,
        MatcherChoice::AhoCorasick => MatcherKind::AhoCorasick,
    }
}

/// Build exactly the automaton `kind` needs. An explicit override that asks
/// for a literal-only strategy on a pattern that is not actually a pure
/// literal (or a pure alternation of literals) silently falls back to
/// `min-dfa`, since there is no literal string to hand a literal scanner.
fn build_impl(ast: &Ast, kind: MatcherKind) -> MatcherImpl {
    match kind {
        MatcherKind::LiteralKmp | MatcherKind::LiteralBm => {
            match literal_extractor::pure_literal_pattern(ast) {
                Some(literal) => {
                    let algo = if kind == MatcherKind::LiteralKmp {
                        LiteralAlgo::Kmp
                    } else {
                        LiteralAlgo::Bm
                    };
                    MatcherImpl::Literal { literal, algo }
                }
                None => build_impl(ast, MatcherKind::MinDfa),
            }
        }
        MatcherKind::AhoCorasick => match literal_extractor::alternation_of_literals(ast) {
            Some(literals) => MatcherImpl::AhoCorasick {
                automaton: AhoCorasick::build(&literals),
                literals,
            },
            None => build_impl(ast, MatcherKind::MinDfa),
        },
        MatcherKind::Nfa => MatcherImpl::Nfa(Rc::new(Nfa::from_ast(ast))),
        MatcherKind::LazyDfa => MatcherImpl::LazyDfa(LazyDfa::new(Rc::new(Nfa::from_ast(ast)))),
        MatcherKind::Dfa => MatcherImpl::Dfa(Dfa::from_nfa(&Nfa::from_ast(ast))),
        MatcherKind::MinDfa => {
            MatcherImpl::Dfa(Minimizer::minimize(&Dfa::from_nfa(&Nfa::from_ast(ast))))
        }
    }
}

impl Matcher {
    /// The matching strategy this matcher ended up using.
    pub fn kind(&self) -> MatcherKind {
        self.kind
    }

    /// Full-string match: does `line`, in its entirety, belong to the
    /// pattern's language?
    pub fn is_match(&self, line: &str) -> bool {
        let raw = match &self.imp {
            MatcherImpl::Literal { literal, .. } => line == literal,
            MatcherImpl::AhoCorasick { literals, .. } => literals.iter().any(|l| l == line),
            MatcherImpl::Nfa(nfa) => nfa_sim::full_match(nfa, line),
            MatcherImpl::Dfa(dfa) => dfa_sim::full_match(dfa, line),
            MatcherImpl::LazyDfa(lazy) => lazy.full_match(line),
        };
        self.apply_invert(raw)
    }

    /// Leftmost-longest, non-overlapping matches on a single line.
    pub fn find_all(&self, line: &str) -> Vec<Match> {
        match &self.imp {
            MatcherImpl::Literal { literal, algo } => {
                let hits = match algo {
                    LiteralAlgo::Kmp => non_overlapping(kmp::search(literal, line), literal.chars().count()),
                    LiteralAlgo::Bm => boyer_moore::search(literal, line),
                };
                hits.into_iter()
                    .map(|char_start| {
                        let (start, end) =
                            char_span_to_bytes(line, char_start, literal.chars().count());
                        Match::new(start, end, &line[start..end])
                    })
                    .collect()
            }
            MatcherImpl::AhoCorasick { automaton, .. } => aho_corasick_find_all(automaton, line),
            MatcherImpl::Nfa(nfa) => nfa_sim::find_all(nfa, line),
            MatcherImpl::Dfa(dfa) => dfa_sim::find_all(dfa, line),
            MatcherImpl::LazyDfa(lazy) => lazy.find_all(line),
        }
    }

    fn apply_invert(&self, raw: bool) -> bool {
        if self.invert_match {
            !raw
        } else {
            raw
        }
    }

    fn passes_prefilter(&self, line: &str) -> bool {
        self.prefilter.passes(line, self.ignore_case)
    }

    /// Stream `(line, lineNumber, matches)` for every hit line in the file
    /// at `path`, honoring the prefilter and `invertMatch`.
    pub fn search_stream(
        &self,
        path: impl AsRef<std::path::Path>,
    ) -> StreamResult<impl Iterator<Item = StreamResult<LineMatches>> + '_> {
        let reader = ChunkedLineReader::open(path, self.chunk_size)?;
        let filtered = PrefilteredLines::new(reader, move |line| self.passes_prefilter(line));
        Ok(filtered.filter_map(move |item| match item {
            Ok((line, line_number)) => {
                let matches = self.find_all(&line);
                let hit = if self.invert_match {
                    matches.is_empty()
                } else {
                    !matches.is_empty()
                };
                hit.then(|| {
                    Ok(LineMatches {
                        line,
                        line_number,
                        matches,
                    })
                })
            }
            Err(e) => Some(Err(e)),
        }))
    }

    /// Number of hit lines in the file at `path`.
    pub fn count(&self, path: impl AsRef<std::path::Path>) -> StreamResult<usize> {
        let mut count = 0;
        for item in self.search_stream(path)? {
            item?;
            count += 1;
        }
        Ok(count)
    }

    /// Whether the file at `path` contains any hit line, short-circuiting
    /// on the first one found.
    pub fn has_match(&self, path: impl AsRef<std::path::Path>) -> StreamResult<bool> {
        for item in self.search_stream(path)? {
            item?;
            return Ok(true);
        }
        Ok(false)
    }
}

/// Reduce KMP's self-overlapping hit list to its non-overlapping,
/// leftmost-first subset: keep a hit only if it starts at or after the end
/// of the previously kept one.
fn non_overlapping(hits: Vec<usize>, len: usize) -> Vec<usize> {
    let mut kept = Vec::new();
    let mut next_allowed = 0;
    for start in hits {
        if start >= next_allowed {
            kept.push(start);
            next_allowed = start + len;
        }
    }
    kept
}

fn char_span_to_bytes(line: &str, char_start: usize, char_len: usize) -> (usize, usize) {
    let mut iter = line.char_indices();
    let start = iter
        .clone()
        .nth(char_start)
        .map_or(line.len(), |(b, _)| b);
    let end = iter.nth(char_start + char_len).map_or(line.len(), |(b, _)| b);
    (start, end)
}

fn aho_corasick_find_all(automaton: &AhoCorasick, line: &str) -> Vec<Match> {
    use std::collections::BTreeMap;

    let offsets: Vec<usize> = line
        .char_indices()
        .map(|(b, _)| b)
        .chain(std::iter::once(line.len()))
        .collect();

    let mut best_end_by_start: BTreeMap<usize, usize> = BTreeMap::new();
    for hit in automaton.search(line) {
        let entry = best_end_by_start.entry(hit.start).or_insert(hit.end);
        if hit.end > *entry {
            *entry = hit.end;
        }
    }

    let total_chars = offsets.len() - 1;
    let mut matches = Vec::new();
    let mut pos = 0;
    while pos <= total_chars {
        if let Some(&end) = best_end_by_start.get(&pos) {
            let start_b = offsets[pos];
            let end_b = offsets[end];
            matches.push(Match::new(start_b, end_b, &line[start_b..end_b]));
            pos = end.max(pos + 1);
        } else {
            pos += 1;
        }
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile_default(pattern: &str) -> Matcher {
        compile(pattern, CompileOptions::default()).unwrap()
    }

    #[test]
    fn test_s1_dot_star_wraps_literal() {
        let m = compile_default("(.*)(abc)(.*)");
        assert!(m.is_match("jdioaabczd"));
        assert!(m.find_all("jdioaabczd").iter().any(|x| x.text().contains("abc")));
    }

    #[test]
    fn test_s2_alternation_star_full_match() {
        let m = compile_default("(a|b)*abb");
        for (s, expected) in [("abb", true), ("aabb", true), ("babb", true), ("ab", false), ("", false)]
        {
            assert_eq!(m.is_match(s), expected, "input {s:?}");
        }
    }

    #[test]
    fn test_s3_find_all_leftmost_longest() {
        let m = compile_default("a(.*)b");
        let spans: Vec<(usize, usize)> = m
            .find_all("ab axxxb")
            .iter()
            .map(|x| (x.start(), x.end()))
            .collect();
        assert_eq!(spans, vec![(0, 2), (3, 8)]);
    }

    #[test]
    fn test_s4_alternation_of_literals_picks_aho_corasick() {
        let m = compile_default("cat|dog|bird");
        assert_eq!(m.kind(), MatcherKind::AhoCorasick);
        let found = m.find_all("I have a cat and a dog but no bird");
        let words: Vec<&str> = found.iter().map(|x| x.text()).collect();
        assert_eq!(words, vec!["cat", "dog", "bird"]);
    }

    #[test]
    fn test_s5_pure_literal_picks_kmp() {
        let m = compile_default("test");
        assert_eq!(m.kind(), MatcherKind::LiteralKmp);
        let matches = m.find_all("this is a test line");
        assert_eq!(matches.len(), 1);
        assert_eq!((matches[0].start(), matches[0].end()), (10, 14));
    }

    #[test]
    fn test_s6_star_matches_empty_string() {
        let m = compile_default("a*");
        assert!(m.is_match(""));
        let matches = m.find_all("");
        assert_eq!(matches.len(), 1);
        assert!(matches[0].is_empty());
    }

    #[test]
    fn test_invert_match_negates_is_match() {
        let options = CompileOptions {
            invert_match: true,
            ..CompileOptions::default()
        };
        let m = compile("cat", options).unwrap();
        assert!(!m.is_match("cat"));
        assert!(m.is_match("dog"));
    }

    #[test]
    fn test_explicit_matcher_override() {
        let options = CompileOptions {
            matcher: MatcherChoice::Nfa,
            ..CompileOptions::default()
        };
        let m = compile("(a|b)*abb", options).unwrap();
        assert_eq!(m.kind(), MatcherKind::Nfa);
        assert!(m.is_match("aabb"));
    }

    #[test]
    fn test_compile_surfaces_parse_errors() {
        assert!(compile("a|", CompileOptions::default()).is_err());
    }
}
