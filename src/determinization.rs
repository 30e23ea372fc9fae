use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::{
    error::{AutomatonError, Result},
    math::Bijection,
    Automaton, Show, StateId, StateSet,
};

/// The outcome of a subset construction: the deterministic automaton together with the
/// correspondence between its states and the sets of states of the source automaton.
#[derive(Debug, Clone)]
pub struct Determinized {
    /// The deterministic automaton, its initial state `0` represents the epsilon closure of
    /// the initial state of the source automaton.
    pub dfa: Automaton,
    /// Associates each discovered set of source states with the deterministic state representing it.
    pub subsets: Bijection<StateSet, StateId>,
}

impl Determinized {
    /// Returns the set of source states that the deterministic state `state` stands for.
    pub fn subset_of(&self, state: StateId) -> Option<&StateSet> {
        self.subsets.get_by_right(&state)
    }

    /// Returns the deterministic state that stands for the given set of source states, if it
    /// was discovered.
    pub fn state_of(&self, subset: &StateSet) -> Option<StateId> {
        self.subsets.get_by_left(subset).copied()
    }
}

/// Converts `nfa` into an equivalent deterministic automaton through the subset construction,
/// see [`subset_construction`].
pub fn convert_to_dfa(nfa: &Automaton) -> Automaton {
    subset_construction(nfa).dfa
}

/// Like [`convert_to_dfa`], but gives up with [`AutomatonError::StateLimitExceeded`] as soon as
/// more than `limit` deterministic states would be needed.
pub fn convert_to_dfa_bounded(nfa: &Automaton, limit: usize) -> Result<Automaton> {
    determinize(nfa, Some(limit)).map(|determinized| determinized.dfa)
}

/// Performs the subset construction on `nfa`. Starting from the epsilon closure of state `0`,
/// which becomes deterministic state `0`, each discovered set of states is advanced by one
/// input symbol and closed under epsilon transitions. Every set that has not been seen before
/// is assigned the next free id. A deterministic state is accepting iff its set contains an
/// accepting state of `nfa`.
///
/// Each deterministic state has exactly one transition. An empty set of source states is
/// represented by a rejecting state with a self loop.
///
/// # Example
/// ```
/// use unary_automata::prelude::*;
///
/// let nfa = Automaton::builder("nfa")
///     .with_states(3)
///     .with_transitions([(0, 1), (0, 2), (1, 0), (2, 2)])
///     .with_end_states([2])
///     .build()
///     .unwrap();
/// let Determinized { dfa, subsets } = subset_construction(&nfa);
/// assert!(dfa.is_deterministic());
/// assert_eq!(subsets.get_by_right(&0), Some(&StateSet::from([0])));
/// assert_eq!(dfa.accepted_lengths(4), nfa.accepted_lengths(4));
/// ```
pub fn subset_construction(nfa: &Automaton) -> Determinized {
    match determinize(nfa, None) {
        Ok(determinized) => determinized,
        Err(_) => unreachable!("subset construction without a limit cannot exceed it"),
    }
}

fn determinize(nfa: &Automaton, limit: Option<usize>) -> Result<Determinized> {
    let exceeded = |count: usize| limit.is_some_and(|limit| count >= limit);
    let limit_error = || AutomatonError::StateLimitExceeded {
        label: nfa.label().to_string(),
        limit: limit.unwrap_or(usize::MAX),
    };

    let mut subsets: Bijection<StateSet, StateId> = Bijection::new();
    let mut accepting: Vec<bool> = vec![];
    let mut edges: Vec<(StateId, StateId)> = vec![];
    let mut queue: VecDeque<(StateId, StateSet)> = VecDeque::new();

    if exceeded(0) {
        return Err(limit_error());
    }
    let initial = nfa.initial_closure();
    trace!("initial subset of \"{}\" is {}", nfa.label(), initial.show());
    accepting.push(nfa.contains_accepting(&initial));
    subsets.insert(initial.clone(), 0);
    queue.push_back((0, initial));

    while let Some((source, subset)) = queue.pop_front() {
        let successor = nfa.step(&subset);
        let target = match subsets.get_by_left(&successor) {
            Some(&id) => id,
            None => {
                let id = subsets.len();
                if exceeded(id) {
                    return Err(limit_error());
                }
                trace!("discovered subset {} as state {id}", successor.show());
                accepting.push(nfa.contains_accepting(&successor));
                subsets.insert(successor.clone(), id);
                queue.push_back((id, successor));
                id
            }
        };
        edges.push((source, target));
    }

    let mut dfa = Automaton::new(subsets.len(), nfa.label());
    for (source, target) in edges {
        dfa.insert_transition(source, target);
    }
    for (state, _) in accepting.iter().enumerate().filter(|(_, acc)| **acc) {
        dfa.insert_end_state(state);
    }

    debug!(
        "determinized \"{}\" from {} to {} states",
        nfa.label(),
        nfa.total_states(),
        dfa.total_states()
    );
    Ok(Determinized { dfa, subsets })
}
