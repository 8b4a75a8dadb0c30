//! On-the-fly, memoized subset construction. Combines the
//! DFA's scan speed with the NFA's build-free startup: transitions are
//! computed the first time they are needed and cached for every subsequent
//! scan over the same matcher.
//!
//! The cache is owned exclusively by one matcher and mutated through a
//! `RefCell`, which is why [`LazyDfa`] is not `Sync` -- a
//! lazy-DFA-backed matcher is single-threaded; callers that want parallelism
//! clone the shared, immutable [`Nfa`] and build one fresh `LazyDfa` per
//! thread.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use super::ast::Label;
use super::ids::StateID;
use super::nfa::Nfa;
use crate::match_type::Match;

struct LazyState {
    subset: Vec<StateID>,
    is_accept: bool,
    /// Memoized per-character transitions. `None` means "computed, and there
    /// is no transition for this character", distinct from "not yet asked".
    transitions: FxHashMap<char, Option<usize>>,
}

#[derive(Default)]
struct Cache {
    states: Vec<LazyState>,
    index: FxHashMap<Vec<StateID>, usize>,
    start: Option<usize>,
}

pub(crate) struct LazyDfa {
    nfa: Rc<Nfa>,
    cache: RefCell<Cache>,
}

impl LazyDfa {
    pub(crate) fn new(nfa: Rc<Nfa>) -> Self {
        Self {
            nfa,
            cache: RefCell::new(Cache::default()),
        }
    }

    /// Number of DFA states discovered so far. Grows monotonically and never
    /// shrinks; exposed for that property test.
    pub(crate) fn state_count(&self) -> usize {
        self.cache.borrow().states.len()
    }

    fn intern(&self, mut subset: Vec<StateID>) -> usize {
        subset.sort_unstable();
        subset.dedup();
        let mut cache = self.cache.borrow_mut();
        if let Some(&id) = cache.index.get(&subset) {
            return id;
        }
        let is_accept = subset.contains(&self.nfa.end_state());
        let id = cache.states.len();
        cache.index.insert(subset.clone(), id);
        cache.states.push(LazyState {
            subset,
            is_accept,
            transitions: FxHashMap::default(),
        });
        id
    }

    fn start(&self) -> usize {
        if let Some(id) = self.cache.borrow().start {
            return id;
        }
        let closure = self.nfa.epsilon_closure(self.nfa.start_state());
        let id = self.intern(closure);
        self.cache.borrow_mut().start = Some(id);
        id
    }

    fn is_accept(&self, state: usize) -> bool {
        self.cache.borrow().states[state].is_accept
    }

    /// The memoized transition for `(state, c)`, computing and caching it on
    /// a miss exactly as subset construction would.
    fn step(&self, state: usize, c: char) -> Option<usize> {
        if let Some(&cached) = self.cache.borrow().states[state].transitions.get(&c) {
            return cached;
        }
        let subset = self.cache.borrow().states[state].subset.clone();
        let mut moved = self.nfa.move_set(&subset, Label::Char(c));
        moved.extend(self.nfa.move_set(&subset, Label::Any));
        moved.sort_unstable();
        moved.dedup();
        let target = if moved.is_empty() {
            None
        } else {
            Some(self.intern(self.nfa.epsilon_closure_set(&moved)))
        };
        self.cache.borrow_mut().states[state]
            .transitions
            .insert(c, target);
        target
    }

    fn scan_at(&self, line: &str, anchor: usize) -> Option<usize> {
        let mut state = self.start();
        let mut last_accept = if self.is_accept(state) {
            Some(anchor)
        } else {
            None
        };
        for (offset, c) in line[anchor..].char_indices() {
            let pos = anchor + offset;
            match self.step(state, c) {
                Some(next) => {
                    state = next;
                    if self.is_accept(state) {
                        last_accept = Some(pos + c.len_utf8());
                    }
                }
                None => break,
            }
        }
        last_accept
    }

    /// All non-overlapping leftmost-longest matches in `line`.
    pub(crate) fn find_all(&self, line: &str) -> Vec<Match> {
        let mut matches = Vec::new();
        let mut pos = 0;
        while pos <= line.len() {
            if let Some(end) = self.scan_at(line, pos) {
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

    /// Whole-string match.
    pub(crate) fn full_match(&self, s: &str) -> bool {
        let mut state = self.start();
        for c in s.chars() {
            match self.step(state, c) {
                Some(next) => state = next,
                None => return false,
            }
        }
        self.is_accept(state)
    }
}

fn next_char_len(line: &str, pos: usize) -> usize {
    line[pos..].chars().next().map_or(1, |c| c.len_utf8())
}
