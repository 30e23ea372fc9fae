//! Library for building and simplifying finite automata over a one-letter (unary) alphabet.
//!
//! An [`Automaton`] consists of a number of states, identified by the contiguous integers
//! `0..total_states`, a set of transitions that consume the single input symbol, a set of
//! epsilon transitions that are traversed without consuming input and a set of accepting
//! states. State `0` is always the initial state. Since there is only a single symbol, a word
//! is fully determined by its length and acceptance only depends on that length.
//!
//! Automata are built either through the construction interface ([`Automaton::new`],
//! [`Automaton::add_transition`], ...) or through the [`automaton::AutomatonBuilder`]. From there
//! the [`algebra`] module combines them into new (generally nondeterministic) automata via
//! [`concatenate`](algebra::concatenate), [`star`](algebra::star), [`plus`](algebra::plus) and
//! [`square`](algebra::square). The result can be made deterministic with
//! [`convert_to_dfa`](determinization::convert_to_dfa), which performs a subset construction
//! driven by the [`closure`] engine, and finally reduced to its minimal form with
//! [`minimize_dfa`](minimization::minimize_dfa).
//!
//! All operations are pure: they read their inputs and return a freshly allocated automaton,
//! any bookkeeping (such as the mapping between subsets and deterministic states) is local to
//! a single call.
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use unary_automata::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        algebra::{concatenate, plus, square, square_with, star, SquarePolicy},
        automaton::{Automaton, AutomatonBuilder, Complexity},
        closure::epsilon_closure,
        determinization::{
            convert_to_dfa, convert_to_dfa_bounded, subset_construction, Determinized,
        },
        error::{AutomatonError, EdgeKind},
        math,
        minimization::{minimal_dfa, minimize_dfa},
        Show, StateId, StateSet,
    };
    #[cfg(feature = "random")]
    pub use super::random::{random_unary_dfa, random_unary_nfa};
}

/// Contains some definitions of mathematical objects which are used throughout the crate and
/// do not really fit to the top level.
pub mod math;

/// Error types of the crate.
pub mod error;
pub use error::{AutomatonError, Result};

/// Defines the automaton data structure together with its construction and inspection interface.
pub mod automaton;
pub use automaton::Automaton;

/// Computation of epsilon closures.
pub mod closure;

/// Algebraic constructions that combine or transform automata.
pub mod algebra;

/// Conversion of automata with epsilon transitions into deterministic automata.
pub mod determinization;

/// Minimization of deterministic automata through partition refinement.
pub mod minimization;

/// Implements the generation of random unary automata.
#[cfg(feature = "random")]
pub mod random;

use itertools::Itertools;

/// States are identified by contiguous integers starting at `0`.
pub type StateId = usize;

/// An ordered set of states. We use an ordered set so that subsets can be hashed, compared
/// and rendered deterministically.
pub type StateSet = std::collections::BTreeSet<StateId>;

/// Helper trait which can be used to display states, state sets and such.
pub trait Show {
    /// Returns a human readable representation of `self`, for a state index that should be
    /// for example 0, 1, 2, ... and for a set of states it should be {0, 1, 2}.
    /// This is mainly used for debugging purposes.
    fn show(&self) -> String;
}

impl Show for usize {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for StateSet {
    fn show(&self) -> String {
        format!("{{{}}}", self.iter().map(Show::show).join(", "))
    }
}

impl Show for bool {
    fn show(&self) -> String {
        match self {
            true => "+",
            false => "-",
        }
        .to_string()
    }
}

impl<S: Show> Show for [S] {
    fn show(&self) -> String {
        format!("[{}]", self.iter().map(Show::show).join(", "))
    }
}

impl<S: Show> Show for Vec<S> {
    fn show(&self) -> String {
        self.as_slice().show()
    }
}

impl<S: Show> Show for &S {
    fn show(&self) -> String {
        S::show(*self)
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    /// Two states alternating between each other, accepting all odd lengths.
    pub fn odd_lengths() -> Automaton {
        Automaton::builder("odd")
            .with_states(2)
            .with_transitions([(0, 1), (1, 0)])
            .with_end_states([1])
            .build()
            .unwrap()
    }

    /// A single state with a self loop that accepts every length.
    pub fn all_lengths() -> Automaton {
        Automaton::builder("all")
            .with_states(1)
            .with_transitions([(0, 0)])
            .with_end_states([0])
            .build()
            .unwrap()
    }

    /// Accepts exactly the lengths `n` with `n % modulus == residue`.
    pub fn residue(modulus: usize, residue: usize) -> Automaton {
        Automaton::builder(format!("{residue}mod{modulus}"))
            .with_states(modulus)
            .with_transitions((0..modulus).map(|q| (q, (q + 1) % modulus)))
            .with_end_states([residue])
            .build()
            .unwrap()
    }

    #[test_log::test]
    fn star_of_odd_lengths_through_the_pipeline() {
        let a = odd_lengths();
        let starred = star(&a);
        assert_eq!(starred.total_states(), 3);
        assert!(starred.is_accepting(2));
        assert_eq!(starred.epsilon_transitions_of(2), &StateSet::from([0]));
        assert_eq!(starred.epsilon_transitions_of(1), &StateSet::from([2]));
        assert_eq!(starred.end_states().collect::<Vec<_>>(), vec![1, 2]);

        let minimal = minimal_dfa(&starred);
        for length in 0..=12 {
            assert_eq!(
                starred.accepts(length),
                minimal.accepts(length),
                "disagreement on length {length}"
            );
        }
        // the hub is not the initial state, so the empty word is only accepted if `a` accepts it
        assert!(!minimal.accepts(0));
        assert!((1..=12).all(|length| minimal.accepts(length)));
        assert_eq!(minimal.complexity(), Complexity::new(2, 1));
    }

    #[test_log::test]
    fn star_of_a_single_residue() {
        let a = residue(3, 2);
        let starred = star(&a);
        let minimal = minimal_dfa(&starred);

        let expected = [2, 4, 5, 6, 7, 8, 9, 10, 11, 12];
        for length in 0..=12 {
            assert_eq!(starred.accepts(length), expected.contains(&length));
            assert_eq!(minimal.accepts(length), starred.accepts(length));
        }
    }

    #[test_log::test]
    fn concatenation_adds_lengths() {
        let a = all_lengths();
        let concatenated = concatenate(&a, &a);
        assert_eq!(concatenated.total_states(), 2);

        let minimal = minimal_dfa(&concatenated);
        for length in 0..=10 {
            assert!(concatenated.accepts(length));
            assert!(minimal.accepts(length));
        }
        assert_eq!(minimal.total_states(), 1);
    }

    #[test_log::test]
    fn concatenation_of_residues_adds_residues() {
        let a = residue(3, 1);
        let b = residue(2, 1);
        let concatenated = concatenate(&a, &b);
        let minimal = minimal_dfa(&concatenated);

        for length in 0..=20 {
            let expected = (0..=length).any(|i| i % 3 == 1 && (length - i) % 2 == 1);
            assert_eq!(concatenated.accepts(length), expected);
            assert_eq!(minimal.accepts(length), expected, "length {length}");
        }
    }

    #[test_log::test]
    fn square_doubles_and_matches_self_concatenation() {
        let a = residue(4, 3);
        let squared = square(&a);
        let concatenated = concatenate(&a, &a);
        assert_eq!(squared.total_states(), 8);

        let lhs = minimal_dfa(&squared);
        let rhs = minimal_dfa(&concatenated);
        assert_eq!(lhs.complexity(), rhs.complexity());
        for length in 0..=24 {
            assert_eq!(lhs.accepts(length), rhs.accepts(length));
        }
    }

    #[test_log::test]
    fn plus_requires_at_least_one_repetition() {
        let a = residue(3, 2);
        let repeated = plus(&a);
        let minimal = minimal_dfa(&repeated);

        assert!(!repeated.accepts(0));
        assert!(!minimal.accepts(0));
        for length in 1..=15 {
            let expected = length % 2 == 0 || length >= 5;
            assert_eq!(minimal.accepts(length), expected, "length {length}");
        }
    }

    #[cfg(feature = "random")]
    #[test_log::test]
    fn pipeline_preserves_acceptance_on_random_automata() {
        fastrand::seed(7);
        for size in 1..=6 {
            let a = random_unary_dfa(size);
            let b = random_unary_nfa(size, 0.3);
            for nfa in [concatenate(&a, &b), star(&a), square(&a), plus(&b)] {
                let dfa = convert_to_dfa(&nfa);
                let minimal = minimize_dfa(&dfa);
                assert!(minimal.total_states() <= dfa.total_states());
                for length in 0..=3 * (nfa.total_states() + 1) {
                    assert_eq!(nfa.accepts(length), dfa.accepts(length));
                    assert_eq!(nfa.accepts(length), minimal.accepts(length));
                }
            }
        }
    }
}
