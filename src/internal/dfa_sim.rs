//! Deterministic greedy longest-match scanning shared by both a freshly
//! built [`Dfa`] and a minimized one. The lazy DFA has
//! its own scanner since it must memoize transitions on the fly, but the
//! scan loop itself follows the same shape.

use super::dfa::Dfa;
use crate::match_type::Match;

/// Scan `line` starting at byte offset `anchor`, tracking the greedy
/// longest-match end. Returns `None` if no match -- not even an empty one --
/// starts at `anchor`.
pub(crate) fn scan_at(dfa: &Dfa, line: &str, anchor: usize) -> Option<usize> {
    let mut state = dfa.start_state();
    let mut last_accept = if dfa.is_accepting(state) {
        Some(anchor)
    } else {
        None
    };

    for (offset, c) in line[anchor..].char_indices() {
        let pos = anchor + offset;
        match dfa.step(state, c) {
            Some(next) => {
                state = next;
                if dfa.is_accepting(state) {
                    last_accept = Some(pos + c.len_utf8());
                }
            }
            None => break,
        }
    }
    last_accept
}

/// All non-overlapping leftmost-longest matches in `line`.
pub(crate) fn find_all(dfa: &Dfa, line: &str) -> Vec<Match> {
    let mut matches = Vec::new();
    let mut pos = 0;
    while pos <= line.len() {
        if let Some(end) = scan_at(dfa, line, pos) {
            matches.push(Match::new(pos, end, &line[pos..end]));
            if end > pos {
                pos = end;
            } else {
                pos += next_char_len(line, pos);
            }
        } else {
            pos += next_char_len(line, pos);
        }
    }
    matches
}

/// Whole-string match: the DFA must consume every byte of `s` and end in an
/// accepting state.
pub(crate) fn full_match(dfa: &Dfa, s: &str) -> bool {
    let mut state = dfa.start_state();
    for c in s.chars() {
        match dfa.step(state, c) {
            Some(next) => state = next,
            None => return false,
        }
    }
    dfa.is_accepting(state)
}

fn next_char_len(line: &str, pos: usize) -> usize {
    line[pos..].chars().next().map_or(1, |c| c.len_utf8())
}
