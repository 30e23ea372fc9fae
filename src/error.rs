use std::fmt::Display;

use thiserror::Error;

use crate::StateId;

/// Distinguishes the two kinds of edges an [`Automaton`](crate::Automaton) stores.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum EdgeKind {
    /// An edge that consumes the single input symbol.
    Symbol,
    /// An edge that is traversed without consuming input.
    Epsilon,
}

impl Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EdgeKind::Symbol => write!(f, "symbol"),
            EdgeKind::Epsilon => write!(f, "epsilon"),
        }
    }
}

/// Errors that can occur when constructing an automaton. All of these indicate a
/// violated precondition on the caller's side, none of them is recovered from internally.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum AutomatonError {
    /// A transition, epsilon transition or end state referenced a state that does not exist.
    #[error("state {state} does not exist in automaton \"{label}\" which has {total_states} states")]
    StateOutOfRange {
        /// Label of the automaton that was being modified.
        label: String,
        /// The offending state id.
        state: StateId,
        /// Number of states of the automaton at the time of the call.
        total_states: usize,
    },
    /// The edge is already present with the other [`EdgeKind`].
    #[error("edge {from} -> {to} in automaton \"{label}\" is already present as {existing} edge")]
    ConflictingEdge {
        /// Label of the automaton that was being modified.
        label: String,
        /// Source of the edge.
        from: StateId,
        /// Target of the edge.
        to: StateId,
        /// The kind under which the edge is already stored.
        existing: EdgeKind,
    },
    /// Bounded subset construction discovered more subsets than allowed.
    #[error("subset construction for \"{label}\" exceeded the limit of {limit} states")]
    StateLimitExceeded {
        /// Label of the automaton that was being determinized.
        label: String,
        /// The configured maximal number of subset states.
        limit: usize,
    },
}

/// Result type used throughout the crate.
pub type Result<T, E = AutomatonError> = std::result::Result<T, E>;
