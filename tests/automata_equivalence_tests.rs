//! Cross-checks between the matching strategies: every strategy compiles the
//! same syntax tree, so forcing each one via `MatcherChoice` and comparing
//! results is an end-to-end way to exercise the simulators' agreement
//! without reaching into the crate's internals.

use linerex::{compile, CompileOptions, MatcherChoice, MatcherKind};

const PATTERNS: &[&str] = &[
    "a",
    "abc",
    "a|b",
    "a*",
    "a.c",
    ".*",
    "(a|b)*",
    "(a|b)*abb",
    "(.*)abc",
    "a(.*)b",
    "(.*)(abc)(.*)",
    "cat|dog|bird",
];

const INPUTS: &[&str] = &[
    "",
    "a",
    "b",
    "c",
    "abc",
    "abb",
    "aabb",
    "babb",
    "ab",
    "xabcx",
    "a1c",
    "cat",
    "I have a cat and a dog but no bird",
    "ab axxxb",
];

fn compile_with(pattern: &str, choice: MatcherChoice) -> linerex::Matcher {
    let options = CompileOptions {
        matcher: choice,
        ..CompileOptions::default()
    };
    compile(pattern, options).unwrap()
}

/// Property #3/#5: every deterministic strategy must agree with direct NFA
/// simulation on full-string match, for every pattern/input pair.
#[test]
fn test_all_strategies_agree_on_full_match() {
    let choices = [
        MatcherChoice::Nfa,
        MatcherChoice::Dfa,
        MatcherChoice::MinDfa,
        MatcherChoice::LazyDfa,
    ];
    for pattern in PATTERNS {
        let matchers: Vec<_> = choices.iter().map(|&c| compile_with(pattern, c)).collect();
        for input in INPUTS {
            let results: Vec<bool> = matchers.iter().map(|m| m.is_match(input)).collect();
            assert!(
                results.iter().all(|&r| r == results[0]),
                "pattern {pattern:?} input {input:?} disagreed across strategies: {results:?}"
            );
        }
    }
}

/// Property #3/#5 for `findAll`: non-overlapping leftmost-longest spans must
/// match across every deterministic strategy.
#[test]
fn test_all_strategies_agree_on_find_all() {
    let choices = [
        MatcherChoice::Nfa,
        MatcherChoice::Dfa,
        MatcherChoice::MinDfa,
        MatcherChoice::LazyDfa,
    ];
    for pattern in PATTERNS {
        let matchers: Vec<_> = choices.iter().map(|&c| compile_with(pattern, c)).collect();
        for input in INPUTS {
            let spans: Vec<Vec<(usize, usize)>> = matchers
                .iter()
                .map(|m| m.find_all(input).iter().map(|x| (x.start(), x.end())).collect())
                .collect();
            assert!(
                spans.iter().all(|s| s == &spans[0]),
                "pattern {pattern:?} input {input:?} disagreed across strategies: {spans:?}"
            );
        }
    }
}

/// Property #4: minimization never grows the automaton relative to itself --
/// i.e. min-dfa's decisions are a subset of what an unminimized dfa would
/// report, checked via full-match agreement (state counts are an internal
/// detail not exposed at this layer).
#[test]
fn test_min_dfa_agrees_with_unminimized_dfa() {
    for pattern in PATTERNS {
        let dfa = compile_with(pattern, MatcherChoice::Dfa);
        let min_dfa = compile_with(pattern, MatcherChoice::MinDfa);
        for input in INPUTS {
            assert_eq!(
                dfa.is_match(input),
                min_dfa.is_match(input),
                "pattern {pattern:?} input {input:?}"
            );
        }
    }
}

/// Scenario S7: lazy DFA vs min DFA on the curated Cartesian product.
#[test]
fn test_s7_lazy_dfa_agrees_with_min_dfa_on_cartesian_product() {
    for pattern in PATTERNS {
        let lazy = compile_with(pattern, MatcherChoice::LazyDfa);
        let min_dfa = compile_with(pattern, MatcherChoice::MinDfa);
        for input in INPUTS {
            assert_eq!(lazy.is_match(input), min_dfa.is_match(input), "pattern {pattern:?} input {input:?}");
            let lazy_spans: Vec<(usize, usize)> =
                lazy.find_all(input).iter().map(|x| (x.start(), x.end())).collect();
            let min_spans: Vec<(usize, usize)> =
                min_dfa.find_all(input).iter().map(|x| (x.start(), x.end())).collect();
            assert_eq!(lazy_spans, min_spans, "pattern {pattern:?} input {input:?}");
        }
    }
}

/// Property #9: every `findAll` output is strictly ordered by `start`, with
/// non-overlap (or, for empty matches, advancement by at least one).
#[test]
fn test_find_all_results_are_strictly_ordered_and_non_overlapping() {
    for pattern in PATTERNS {
        let m = compile(pattern, CompileOptions::default()).unwrap();
        for input in INPUTS {
            let matches = m.find_all(input);
            for pair in matches.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                assert!(
                    a.end() <= b.start() || (a.is_empty() && b.start() > a.start()),
                    "pattern {pattern:?} input {input:?} matches out of order: {:?} then {:?}",
                    (a.start(), a.end()),
                    (b.start(), b.end())
                );
            }
        }
    }
}

/// Differential oracle cross-check against the `regex` crate's full-match
/// semantics, for the subset of patterns this crate's grammar shares with
/// standard regex syntax (no ERE-specific deviations among `PATTERNS`).
#[test]
fn test_full_match_agrees_with_regex_crate_oracle() {
    for pattern in PATTERNS {
        let anchored = format!("^(?:{pattern})$");
        let oracle = regex::Regex::new(&anchored).unwrap();
        let m = compile(pattern, CompileOptions::default()).unwrap();
        for input in INPUTS {
            assert_eq!(
                m.is_match(input),
                oracle.is_match(input),
                "pattern {pattern:?} input {input:?}"
            );
        }
    }
}

#[test]
fn test_auto_selection_picks_aho_corasick_for_alternation_of_literals() {
    let m = compile("cat|dog|bird", CompileOptions::default()).unwrap();
    assert_eq!(m.kind(), MatcherKind::AhoCorasick);
}
