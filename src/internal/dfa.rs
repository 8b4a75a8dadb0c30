//! Subset construction: builds a [`Dfa`] from an [`Nfa`].
//!
//! The one wrinkle the reduced alphabet introduces is `ANYCHAR` subsumption:
//! a concrete character `x` is matched by both an explicit `Label::Char(x)`
//! edge and any `Label::Any` edge out of the same NFA state set, so `move(S,
//! x)` must union both before taking the ε-closure. The resulting DFA stores
//! one explicit transition per concrete character that was ever written in
//! the pattern, plus a single `Label::Any` fallback transition used for every
//! other character (see [`Dfa::step`]).

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use super::ast::Label;
use super::ids::{StateID, StateIDBase};
use super::nfa::Nfa;

#[derive(Debug, Clone, Default)]
pub(crate) struct Dfa {
    states: Vec<DfaState>,
    start_state: StateID,
    accepting_states: Vec<StateID>,
    transitions: BTreeMap<StateID, BTreeMap<Label, StateID>>,
    /// Maps an NFA state subset to the DFA state that represents it, so
    /// subset construction can dedup in O(1) instead of scanning `states`.
    state_index: FxHashMap<Vec<StateID>, StateID>,
}

impl Dfa {
    pub(crate) fn states(&self) -> &[DfaState] {
        &self.states
    }

    pub(crate) fn start_state(&self) -> StateID {
        self.start_state
    }

    pub(crate) fn is_accepting(&self, state: StateID) -> bool {
        self.accepting_states.contains(&state)
    }

    pub(crate) fn accepting_states(&self) -> &[StateID] {
        &self.accepting_states
    }

    pub(crate) fn transitions(&self) -> &BTreeMap<StateID, BTreeMap<Label, StateID>> {
        &self.transitions
    }

    /// Follow the transition for `c` out of `state`, falling back to the
    /// state's `ANYCHAR` edge (if any) when no explicit edge for `c` exists.
    pub(crate) fn step(&self, state: StateID, c: char) -> Option<StateID> {
        let edges = self.transitions.get(&state)?;
        edges
            .get(&Label::Char(c))
            .or_else(|| edges.get(&Label::Any))
            .copied()
    }

    /// Build a DFA from an NFA via subset construction.
    pub(crate) fn from_nfa(nfa: &Nfa) -> Self {
        let mut dfa = Dfa::default();
        let accepting_nfa_state = nfa.end_state();

        let alphabet = Self::alphabet(nfa);

        let start_set = nfa.epsilon_closure(nfa.start_state());
        let start_state = dfa.add_state_if_new(start_set, accepting_nfa_state);
        dfa.start_state = start_state;

        let mut work_list = vec![start_state];
        let mut visited = vec![start_state];

        while let Some(state_id) = work_list.pop() {
            let nfa_states = dfa.states[state_id.as_usize()].nfa_states.clone();
            for &label in &alphabet {
                let mut moved = nfa.move_set(&nfa_states, label);
                if label != Label::Any {
                    moved.extend(nfa.move_set(&nfa_states, Label::Any));
                    moved.sort_unstable();
                    moved.dedup();
                }
                if moved.is_empty() {
                    continue;
                }
                let target_set = nfa.epsilon_closure_set(&moved);
                let target_state = dfa.add_state_if_new(target_set, accepting_nfa_state);
                dfa.transitions
                    .entry(state_id)
                    .or_default()
                    .insert(label, target_state);
                if !visited.contains(&target_state) {
                    visited.push(target_state);
                    work_list.push(target_state);
                }
            }
        }

        dfa
    }

    /// The set of distinct labels worth building explicit transitions for:
    /// every concrete character the pattern mentions, plus `ANYCHAR` itself
    /// as the fallback symbol.
    fn alphabet(nfa: &Nfa) -> Vec<Label> {
        let mut labels: Vec<Label> = nfa
            .states()
            .iter()
            .flat_map(|s| s.transitions().iter().map(|t| t.label))
            .collect();
        if !labels.contains(&Label::Any) {
            labels.push(Label::Any);
        }
        labels.sort_unstable();
        labels.dedup();
        labels
    }

    fn add_state_if_new(&mut self, mut nfa_states: Vec<StateID>, accepting: StateID) -> StateID {
        nfa_states.sort_unstable();
        nfa_states.dedup();
        if let Some(&id) = self.state_index.get(&nfa_states) {
            return id;
        }
        let id = StateID::new(self.states.len() as StateIDBase);
        let is_accepting = nfa_states.contains(&accepting);
        self.state_index.insert(nfa_states.clone(), id);
        self.states.push(DfaState {
            id,
            nfa_states,
        });
        if is_accepting {
            self.accepting_states.push(id);
        }
        id
    }

    /// Append a fresh state with no backing NFA subset, used when rebuilding
    /// a DFA from a minimization partition rather than from an NFA.
    pub(crate) fn push_state(&mut self, id: StateID, is_accepting: bool) {
        self.states.push(DfaState {
            id,
            nfa_states: Vec::new(),
        });
        if is_accepting {
            self.accepting_states.push(id);
        }
    }

    pub(crate) fn set_start_state(&mut self, state: StateID) {
        self.start_state = state;
    }

    pub(crate) fn add_transition(&mut self, from: StateID, label: Label, to: StateID) {
        self.transitions.entry(from).or_default().insert(label, to);
    }
}

#[derive(Debug, Clone)]
pub(crate) struct DfaState {
    id: StateID,
    nfa_states: Vec<StateID>,
}

impl DfaState {
    pub(crate) fn id(&self) -> StateID {
        self.id
    }

    pub(crate) fn nfa_states(&self) -> &[StateID] {
        &self.nfa_states
    }
}
