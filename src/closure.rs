use tracing::trace;

use crate::{Automaton, Show, StateId, StateSet};

/// Computes the epsilon closure of `states` in `automaton`, that is the smallest superset of
/// `states` such that for every contained state `q` and every epsilon transition `q -> p`,
/// also `p` is contained.
///
/// Every state is pushed onto the work stack at most once, so this terminates on cyclic
/// epsilon graphs and runs in time linear in the number of states and epsilon transitions.
///
/// # Example
/// ```
/// use unary_automata::prelude::*;
///
/// let a = Automaton::builder("loop")
///     .with_states(4)
///     .with_epsilon_transitions([(0, 1), (1, 2), (2, 0)])
///     .build()
///     .unwrap();
/// assert_eq!(epsilon_closure(&a, [1]), StateSet::from([0, 1, 2]));
/// assert_eq!(epsilon_closure(&a, [3]), StateSet::from([3]));
/// ```
pub fn epsilon_closure<I: IntoIterator<Item = StateId>>(
    automaton: &Automaton,
    states: I,
) -> StateSet {
    let mut closure: StateSet = states.into_iter().collect();
    let mut stack: Vec<StateId> = closure.iter().copied().collect();

    while let Some(state) = stack.pop() {
        for &target in automaton.epsilon_transitions_of(state) {
            if closure.insert(target) {
                stack.push(target);
            }
        }
    }

    trace!("epsilon closure in \"{}\" is {}", automaton.label(), closure.show());
    closure
}
