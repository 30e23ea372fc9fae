use tracing::{debug, trace, warn};

use crate::{
    determinization::convert_to_dfa,
    math::{Map, Partition},
    Automaton, StateId, StateSet,
};

/// Minimizes the deterministic automaton `dfa` using Moore's partition refinement.
///
/// Starting from the partition into accepting and non-accepting states, every block is
/// repeatedly split according to the blocks that the transitions of its states lead to, until
/// a full pass leaves all blocks intact. Each final block becomes one state, it is accepting
/// iff it contains an accepting state of `dfa`. Blocks are numbered by their smallest member,
/// so the block containing state `0` is again the initial state `0`.
///
/// The input is expected to be deterministic, e.g. produced by
/// [`convert_to_dfa`](crate::determinization::convert_to_dfa). States without a transition
/// are grouped together, as if they had a transition into a shared sink.
///
/// # Example
/// ```
/// use unary_automata::prelude::*;
///
/// let dfa = Automaton::builder("even")
///     .with_states(4)
///     .with_transitions([(0, 1), (1, 2), (2, 3), (3, 0)])
///     .with_end_states([0, 2])
///     .build()
///     .unwrap();
/// let minimal = minimize_dfa(&dfa);
/// assert_eq!(minimal.total_states(), 2);
/// assert_eq!(minimal.accepted_lengths(6), vec![0, 2, 4, 6]);
/// ```
pub fn minimize_dfa(dfa: &Automaton) -> Automaton {
    if !dfa.is_deterministic() {
        warn!(
            "minimizing \"{}\" which is not deterministic, the result may not be equivalent",
            dfa.label()
        );
    }

    let partition = refine_to_fixpoint(dfa);
    let lookup = partition.block_lookup(dfa.total_states());

    let mut minimal = Automaton::new(partition.size(), dfa.label());
    for (block_index, block) in partition.iter().enumerate() {
        if dfa.contains_accepting(block) {
            minimal.insert_end_state(block_index);
        }
        for &state in block {
            for target in dfa.transitions_of(state).iter().filter_map(|&p| lookup[p]) {
                minimal.insert_transition(block_index, target);
            }
        }
    }

    debug!(
        "minimized \"{}\" from {} to {} states",
        dfa.label(),
        dfa.total_states(),
        minimal.total_states()
    );
    minimal
}

/// Determinizes and then minimizes `automaton`, this yields the unique minimal deterministic
/// automaton (up to renaming of states) that accepts the same lengths.
pub fn minimal_dfa(automaton: &Automaton) -> Automaton {
    minimize_dfa(&convert_to_dfa(automaton))
}

fn refine_to_fixpoint(dfa: &Automaton) -> Partition {
    let (accepting, rejecting): (Vec<StateId>, Vec<StateId>) =
        (0..dfa.total_states()).partition(|&q| dfa.is_accepting(q));
    let mut partition = Partition::new([accepting, rejecting]);

    let mut round = 0;
    loop {
        round += 1;
        let refined = refine(dfa, &partition);
        trace!(
            "refinement round {round} of \"{}\" yields {} blocks",
            dfa.label(),
            refined.size()
        );
        if refined.size() == partition.size() {
            return partition;
        }
        partition = refined;
    }
}

/// Splits every block of `partition` by the blocks that the transitions of its states lead
/// to. A state without transitions has the empty signature.
fn refine(dfa: &Automaton, partition: &Partition) -> Partition {
    let lookup = partition.block_lookup(dfa.total_states());
    let signature = |state: StateId| -> StateSet {
        dfa.transitions_of(state)
            .iter()
            .filter_map(|&p| lookup[p])
            .collect()
    };

    Partition::new(partition.iter().flat_map(|block| {
        let mut groups: Map<StateSet, Vec<StateId>> = Map::default();
        for &state in block {
            groups.entry(signature(state)).or_default().push(state);
        }
        groups.into_values()
    }))
}
