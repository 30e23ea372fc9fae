use tracing::trace;

use crate::Automaton;

/// Generates a random deterministic unary automaton with `size` states. Every state gets
/// precisely one transition to a uniformly drawn target and is accepting with probability 1/2.
/// Depending on the drawn transitions, some states may be unreachable from state `0`.
///
/// Randomness comes from the thread-local generator of `fastrand`, so calling
/// `fastrand::seed` beforehand makes the result reproducible.
pub fn random_unary_dfa(size: usize) -> Automaton {
    let mut automaton = Automaton::new(size, format!("random_dfa({size})"));
    for q in 0..size {
        automaton.insert_transition(q, fastrand::usize(..size));
        if fastrand::bool() {
            automaton.insert_end_state(q);
        }
    }
    trace!("generated random automaton\n{automaton}");
    automaton
}

/// Generates a random nondeterministic unary automaton with `size` states. Every pair of
/// states is connected with probability `density`, where a connected pair gets a symbol
/// transition or an epsilon transition with equal probability. Every state is accepting
/// with probability 1/2.
pub fn random_unary_nfa(size: usize, density: f64) -> Automaton {
    let mut automaton = Automaton::new(size, format!("random_nfa({size}, {density})"));
    for q in 0..size {
        for p in 0..size {
            if fastrand::f64() >= density {
                continue;
            }
            if fastrand::bool() {
                automaton.insert_transition(q, p);
            } else {
                automaton.insert_epsilon_transition(q, p);
            }
        }
        if fastrand::bool() {
            automaton.insert_end_state(q);
        }
    }
    trace!("generated random automaton\n{automaton}");
    automaton
}
