//! Thompson construction: builds an NFA fragment for each syntax-tree node and
//! glues fragments together bottom-up. Each partially built
//! [`Nfa`] is itself a valid fragment with its own `start_state`/`end_state`,
//! so `concat`/`alternation`/`zero_or_more` read the same way whether they are
//! combining two leaves or two already-composite sub-automata.

use super::ast::{Ast, Label, EMPTY};
use super::ids::{StateID, StateIDBase};

#[derive(Debug, Clone, Default)]
pub(crate) struct Nfa {
    pub(crate) states: Vec<NfaState>,
    pub(crate) start_state: StateID,
    pub(crate) end_state: StateID,
}

impl Nfa {
    pub(crate) fn new() -> Self {
        Self {
            states: vec![NfaState::default()],
            start_state: StateID::default(),
            end_state: StateID::default(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.start_state == StateID::default()
            && self.end_state == StateID::default()
            && self.states.len() == 1
            && self.states[0].is_empty()
    }

    pub(crate) fn start_state(&self) -> StateID {
        self.start_state
    }

    pub(crate) fn end_state(&self) -> StateID {
        self.end_state
    }

    pub(crate) fn states(&self) -> &[NfaState] {
        &self.states
    }

    fn set_start_state(&mut self, state: StateID) {
        self.start_state = state;
    }

    fn set_end_state(&mut self, state: StateID) {
        self.end_state = state;
    }

    fn add_state(&mut self, state: NfaState) {
        self.states.push(state);
    }

    fn new_state(&mut self) -> StateID {
        let id = StateID::new(self.states.len() as StateIDBase);
        self.add_state(NfaState::new(id));
        id
    }

    fn add_transition(&mut self, from: StateID, label: Label, target_state: StateID) {
        self.states[from].transitions.push(NfaTransition {
            label,
            target_state,
        });
    }

    fn add_epsilon_transition(&mut self, from: StateID, target_state: StateID) {
        self.states[from]
            .epsilon_transitions
            .push(EpsilonTransition { target_state });
    }

    /// Apply an offset to every state number, used when splicing one fragment
    /// into another's state vector.
    fn shift_ids(&mut self, offset: usize) -> (StateID, StateID) {
        for state in self.states.iter_mut() {
            state.offset(offset);
        }
        self.start_state = StateID::new(self.start_state.id() + offset as StateIDBase);
        self.end_state = StateID::new(self.end_state.id() + offset as StateIDBase);
        (self.start_state, self.end_state)
    }

    /// Move the states of `nfa` into `self`, consuming it.
    fn append(&mut self, mut nfa: Nfa) {
        self.states.append(&mut nfa.states);
    }

    /// Concatenate `nfa` onto the end of `self`.
    pub(crate) fn concat(&mut self, nfa: Nfa) {
        if self.is_empty() {
            *self = nfa;
            return;
        }
        let mut nfa = nfa;
        let (nfa_start, nfa_end) = nfa.shift_ids(self.states.len());
        self.append(nfa);
        self.add_epsilon_transition(self.end_state, nfa_start);
        self.set_end_state(nfa_end);
    }

    /// Form the alternation `self | nfa`.
    pub(crate) fn alternation(&mut self, nfa: Nfa) {
        if self.is_empty() {
            *self = nfa;
            return;
        }
        let mut nfa = nfa;
        let (nfa_start, nfa_end) = nfa.shift_ids(self.states.len());
        self.append(nfa);

        let start_state = self.new_state();
        self.add_epsilon_transition(start_state, self.start_state);
        self.add_epsilon_transition(start_state, nfa_start);

        let end_state = self.new_state();
        self.add_epsilon_transition(self.end_state, end_state);
        self.add_epsilon_transition(nfa_end, end_state);

        self.set_start_state(start_state);
        self.set_end_state(end_state);
    }

    /// Kleene closure: the only repetition operator the grammar has.
    pub(crate) fn zero_or_more(&mut self) {
        let start_state = self.new_state();
        self.add_epsilon_transition(start_state, self.start_state);
        self.add_epsilon_transition(start_state, self.end_state);

        let end_state = self.new_state();
        self.add_epsilon_transition(self.end_state, end_state);
        self.add_epsilon_transition(self.end_state, self.start_state);

        self.set_start_state(start_state);
        self.set_end_state(end_state);
    }

    /// Build an NFA fragment from a syntax tree. Every node in the reduced
    /// grammar has a direct Thompson-construction rule, so this never fails.
    pub(crate) fn from_ast(ast: &Ast) -> Self {
        match ast {
            Ast::Char(c) if *c == EMPTY => Nfa::new(),
            Ast::Char(c) => {
                let mut nfa = Nfa::new();
                let start_state = nfa.end_state();
                let end_state = nfa.new_state();
                nfa.set_end_state(end_state);
                nfa.add_transition(start_state, Label::Char(*c), end_state);
                nfa
            }
            Ast::Dot => {
                let mut nfa = Nfa::new();
                let start_state = nfa.end_state();
                let end_state = nfa.new_state();
                nfa.set_end_state(end_state);
                nfa.add_transition(start_state, Label::Any, end_state);
                nfa
            }
            Ast::Concat(l, r) => {
                let mut nfa = Nfa::from_ast(l);
                nfa.concat(Nfa::from_ast(r));
                nfa
            }
            Ast::Alt(l, r) => {
                let mut nfa = Nfa::from_ast(l);
                nfa.alternation(Nfa::from_ast(r));
                nfa
            }
            Ast::Star(c) => {
                let mut nfa = Nfa::from_ast(c);
                nfa.zero_or_more();
                nfa
            }
        }
    }

    /// The ε-closure of a single state.
    pub(crate) fn epsilon_closure(&self, state: StateID) -> Vec<StateID> {
        let mut closure = vec![state];
        let mut i = 0;
        while i < closure.len() {
            let current = closure[i];
            for epsilon in self.states[current].epsilon_transitions() {
                if !closure.contains(&epsilon.target_state) {
                    closure.push(epsilon.target_state);
                }
            }
            i += 1;
        }
        closure.sort_unstable();
        closure.dedup();
        closure
    }

    /// The ε-closure of a set of states, as a sorted, deduplicated set.
    pub(crate) fn epsilon_closure_set(&self, states: &[StateID]) -> Vec<StateID> {
        let mut closure: Vec<StateID> = states
            .iter()
            .flat_map(|s| self.epsilon_closure(*s))
            .collect();
        closure.sort_unstable();
        closure.dedup();
        closure
    }

    /// `move(T, label)`: the set of states reachable from `T` via a single
    /// transition carrying exactly `label`.
    pub(crate) fn move_set(&self, states: &[StateID], label: Label) -> Vec<StateID> {
        let mut out = Vec::new();
        for &state in states {
            for transition in self.states[state].transitions() {
                if transition.label == label {
                    out.push(transition.target_state);
                }
            }
        }
        out.sort_unstable();
        out.dedup();
        out
    }

    /// All distinct labels leaving any state in `states`.
    pub(crate) fn labels_from(&self, states: &[StateID]) -> Vec<Label> {
        let mut labels: Vec<Label> = states
            .iter()
            .flat_map(|&s| self.states[s].transitions().iter().map(|t| t.label))
            .collect();
        labels.sort_unstable();
        labels.dedup();
        labels
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct NfaState {
    state: StateID,
    epsilon_transitions: Vec<EpsilonTransition>,
    transitions: Vec<NfaTransition>,
}

impl NfaState {
    fn new(state: StateID) -> Self {
        Self {
            state,
            epsilon_transitions: Vec::new(),
            transitions: Vec::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.transitions.is_empty() && self.epsilon_transitions.is_empty()
    }

    pub(crate) fn id(&self) -> StateID {
        self.state
    }

    pub(crate) fn transitions(&self) -> &[NfaTransition] {
        &self.transitions
    }

    pub(crate) fn epsilon_transitions(&self) -> &[EpsilonTransition] {
        &self.epsilon_transitions
    }

    fn offset(&mut self, offset: usize) {
        self.state = StateID::new(self.state.id() + offset as StateIDBase);
        for t in &mut self.epsilon_transitions {
            t.target_state = StateID::new(t.target_state.id() + offset as StateIDBase);
        }
        for t in &mut self.transitions {
            t.target_state = StateID::new(t.target_state.id() + offset as StateIDBase);
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct EpsilonTransition {
    pub(crate) target_state: StateID,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct NfaTransition {
    pub(crate) label: Label,
    pub(crate) target_state: StateID,
}
