//! Hopcroft-style partition refinement over a [`Dfa`].
//!
//! Kept as a standalone `Minimizer` rather than a method on `Dfa` itself,
//! mirroring the pack's alternate workspace layout where minimization lives
//! in its own module rather than embedded in the DFA builder.

use std::collections::BTreeMap;

use log::trace;

use super::ast::Label;
use super::dfa::Dfa;
use super::ids::{StateID, StateIDBase};

type StateGroup = Vec<StateID>;
type Partition = Vec<StateGroup>;

/// A state's transitions rewritten in terms of which partition group each
/// target belongs to. Two states with the same signature are
/// indistinguishable under the current partition.
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct GroupSignature(Vec<(Label, usize)>);

pub(crate) struct Minimizer;

impl Minimizer {
    /// Minimize `dfa`, returning an equivalent DFA with the fewest possible states.
    pub(crate) fn minimize(dfa: &Dfa) -> Dfa {
        trace!("minimizing DFA with {} states", dfa.states().len());

        let mut partition = Self::initial_partition(dfa);
        loop {
            let refined = Self::refine(&partition, dfa);
            if refined.len() == partition.len() {
                partition = refined;
                break;
            }
            partition = refined;
        }

        Self::build_from_partition(dfa, &partition)
    }

    /// Two groups to start: accepting states and non-accepting states.
    fn initial_partition(dfa: &Dfa) -> Partition {
        let mut accepting = Vec::new();
        let mut rejecting = Vec::new();
        for state in dfa.states() {
            if dfa.is_accepting(state.id()) {
                accepting.push(state.id());
            } else {
                rejecting.push(state.id());
            }
        }
        [accepting, rejecting]
            .into_iter()
            .filter(|g| !g.is_empty())
            .collect()
    }

    fn group_of(state: StateID, partition: &[StateGroup]) -> usize {
        partition
            .iter()
            .position(|g| g.contains(&state))
            .expect("every state belongs to exactly one group")
    }

    fn signature(dfa: &Dfa, state: StateID, partition: &[StateGroup]) -> GroupSignature {
        match dfa.transitions().get(&state) {
            None => GroupSignature::default(),
            Some(edges) => {
                let mut sig: Vec<(Label, usize)> = edges
                    .iter()
                    .map(|(&label, &target)| (label, Self::group_of(target, partition)))
                    .collect();
                sig.sort_unstable();
                GroupSignature(sig)
            }
        }
    }

    fn refine(partition: &[StateGroup], dfa: &Dfa) -> Partition {
        let mut next = Partition::new();
        for group in partition {
            if group.len() == 1 {
                next.push(group.clone());
                continue;
            }
            let mut buckets: BTreeMap<GroupSignature, StateGroup> = BTreeMap::new();
            for &state in group {
                let sig = Self::signature(dfa, state, partition);
                buckets.entry(sig).or_default().push(state);
            }
            next.extend(buckets.into_values());
        }
        next
    }

    fn build_from_partition(dfa: &Dfa, partition: &[StateGroup]) -> Dfa {
        // Order groups so the group containing the start state becomes group 0.
        let mut partition = partition.to_vec();
        let start_group = Self::group_of(dfa.start_state(), &partition);
        partition.swap(0, start_group);

        let mut builder = Dfa::default();
        for (group_id, group) in partition.iter().enumerate() {
            let representative = group[0];
            let id = StateID::new(group_id as StateIDBase);
            builder.push_state(id, dfa.is_accepting(representative));
        }
        builder.set_start_state(StateID::new(0));

        for (group_id, group) in partition.iter().enumerate() {
            let from = StateID::new(group_id as StateIDBase);
            let representative = group[0];
            if let Some(edges) = dfa.transitions().get(&representative) {
                for (&label, &target) in edges {
                    let target_group = Self::group_of(target, &partition);
                    builder.add_transition(from, label, StateID::new(target_group as StateIDBase));
                }
            }
        }
        builder
    }
}
