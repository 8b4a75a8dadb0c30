//! Greedy longest-match scanning directly over an [`Nfa`], with no subset
//! construction. Used by the `nfa` matcher strategy, which
//! exists for patterns too small to amortize a DFA build.

use super::ast::Label;
use super::ids::StateID;
use super::nfa::Nfa;
use crate::match_type::Match;

fn step(nfa: &Nfa, states: &[StateID], c: char) -> Vec<StateID> {
    let mut moved = nfa.move_set(states, Label::Char(c));
    moved.extend(nfa.move_set(states, Label::Any));
    moved.sort_unstable();
    moved.dedup();
    nfa.epsilon_closure_set(&moved)
}

fn any_accepting(nfa: &Nfa, states: &[StateID]) -> bool {
    states.contains(&nfa.end_state())
}

/// Scan `line` starting at byte offset `anchor`. Returns the greedy
/// longest-match end, or `None` if no match starts at `anchor`.
pub(crate) fn scan_at(nfa: &Nfa, line: &str, anchor: usize) -> Option<usize> {
    let mut states = nfa.epsilon_closure(nfa.start_state());
    let mut last_accept = if any_accepting(nfa, &states) {
        Some(anchor)
    } else {
        None
    };

    for (offset, c) in line[anchor..].char_indices() {
        let pos = anchor + offset;
        states = step(nfa, &states, c);
        if states.is_empty() {
            break;
        }
        if any_accepting(nfa, &states) {
            last_accept = Some(pos + c.len_utf8());
        }
    }
    last_accept
}

fn next_char_len(line: &str, pos: usize) -> usize {
    line[pos..].chars().next().map_or(1, |c| c.len_utf8())
}

/// All non-overlapping leftmost-longest matches in `line`.
pub(crate) fn find_all(nfa: &Nfa, line: &str) -> Vec<Match> {
    let mut matches = Vec::new();
    let mut pos = 0;
    while pos <= line.len() {
        if let Some(end) = scan_at(nfa, line, pos) {
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

/// Whole-string match: every character of `s` must be consumed and the final
/// state set must intersect the accept set.
pub(crate) fn full_match(nfa: &Nfa, s: &str) -> bool {
    let mut states = nfa.epsilon_closure(nfa.start_state());
    for c in s.chars() {
        states = step(nfa, &states, c);
        if states.is_empty() {
            return false;
        }
    }
    any_accepting(nfa, &states)
}
