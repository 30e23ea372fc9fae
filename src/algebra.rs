//! Each operation reads its operands and returns a newly allocated automaton, the operands
//! are never modified. Epsilon transitions serve as the glue between the parts, so the results
//! are in general nondeterministic and should be run through
//! [`convert_to_dfa`](crate::determinization::convert_to_dfa) before further use.
use tracing::{debug, warn};

use crate::{Automaton, StateId};

/// Determines how [`square_with`] treats states that have more than one transition.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub enum SquarePolicy {
    /// Keep only the smallest target of every state. For deterministic inputs this is exact,
    /// for nondeterministic ones the result accepts a subset of the self-concatenation.
    #[default]
    FirstTarget,
    /// Keep every target, which yields the true self-concatenation.
    AllTargets,
}

/// Concatenates `first` and `second`. The states of `second` are shifted by the number of
/// states of `first` and every accepting state of `first` gets an epsilon transition to the
/// (shifted) initial state of `second`. Only the shifted accepting states of `second` are
/// accepting in the result.
///
/// # Example
/// ```
/// use unary_automata::prelude::*;
///
/// let one = Automaton::builder("1")
///     .with_states(2)
///     .with_transitions([(0, 1)])
///     .with_end_states([1])
///     .build()
///     .unwrap();
/// let two = concatenate(&one, &one);
/// assert_eq!(two.total_states(), 4);
/// assert_eq!(two.accepted_lengths(5), vec![2]);
/// ```
pub fn concatenate(first: &Automaton, second: &Automaton) -> Automaton {
    let offset = first.total_states();
    let mut out = Automaton::new(
        offset + second.total_states(),
        format!("{}+{}", first.label(), second.label()),
    );

    for (q, p) in first.transitions() {
        out.insert_transition(q, p);
    }
    for (q, p) in first.epsilon_transitions() {
        out.insert_epsilon_transition(q, p);
    }
    for (q, p) in second.transitions() {
        out.insert_transition(q + offset, p + offset);
    }
    for (q, p) in second.epsilon_transitions() {
        out.insert_epsilon_transition(q + offset, p + offset);
    }

    // an empty second operand has no initial state to jump to
    if second.total_states() > 0 {
        for e in first.end_states() {
            out.insert_epsilon_transition(e, offset);
        }
    }
    for e in second.end_states() {
        out.insert_end_state(e + offset);
    }

    debug!(
        "concatenated \"{}\" and \"{}\" into {} states",
        first.label(),
        second.label(),
        out.total_states()
    );
    out
}

/// Computes the Kleene star of `automaton` by cloning it and appending a fresh accepting hub
/// state. The hub has an epsilon transition to state `0` and every original accepting state
/// gets an epsilon transition back to the hub.
///
/// The hub is not the initial state, the result keeps using state `0` as initial state.
pub fn star(automaton: &Automaton) -> Automaton {
    let mut out = automaton.clone();
    let hub = append_hub(&mut out, automaton);
    out.insert_end_state(hub);

    debug!(
        "star of \"{}\" has {} states with hub {hub}",
        automaton.label(),
        out.total_states()
    );
    out
}

/// Computes the positive closure, i.e. one or more repetitions of `automaton`. This works like
/// [`star`], except that the hub does not accept.
pub fn plus(automaton: &Automaton) -> Automaton {
    let mut out = automaton.clone().with_label(format!("{}^+", automaton.label()));
    let hub = append_hub(&mut out, automaton);

    debug!(
        "positive closure of \"{}\" has {} states with hub {hub}",
        automaton.label(),
        out.total_states()
    );
    out
}

fn append_hub(out: &mut Automaton, original: &Automaton) -> StateId {
    let hub = out.add_state();
    out.insert_epsilon_transition(hub, 0);
    for e in original.end_states() {
        out.insert_epsilon_transition(e, hub);
    }
    hub
}

/// Concatenates `automaton` with itself using [`SquarePolicy::FirstTarget`], see [`square_with`].
pub fn square(automaton: &Automaton) -> Automaton {
    square_with(automaton, SquarePolicy::FirstTarget)
}

/// Concatenates `automaton` with a copy of itself. With `n` states, the states `n..2n` form the
/// copy, every accepting state of the first half gets an epsilon transition to state `n` and
/// only the accepting states of the copy are accepting in the result. Which transitions are
/// carried over is determined by the given [`SquarePolicy`].
pub fn square_with(automaton: &Automaton, policy: SquarePolicy) -> Automaton {
    let n = automaton.total_states();
    let mut out = Automaton::new(2 * n, format!("{}^2", automaton.label()));

    for q in 0..n {
        let targets = automaton.transitions_of(q);
        let kept: Vec<StateId> = match policy {
            SquarePolicy::FirstTarget => {
                if targets.len() > 1 {
                    warn!(
                        "state {q} of \"{}\" has {} targets, only keeping the first one",
                        automaton.label(),
                        targets.len()
                    );
                }
                targets.first().copied().into_iter().collect()
            }
            SquarePolicy::AllTargets => targets.iter().copied().collect(),
        };
        for p in kept {
            out.insert_transition(q, p);
            out.insert_transition(q + n, p + n);
        }
        for &p in automaton.epsilon_transitions_of(q) {
            out.insert_epsilon_transition(q, p);
            out.insert_epsilon_transition(q + n, p + n);
        }
    }

    for e in automaton.end_states() {
        out.insert_epsilon_transition(e, n);
        out.insert_end_state(e + n);
    }

    debug!(
        "square of \"{}\" has {} states",
        automaton.label(),
        out.total_states()
    );
    out
}
