use std::fmt::Display;

use bit_set::BitSet;
use itertools::Itertools;

use crate::{
    closure,
    error::{AutomatonError, EdgeKind, Result},
    StateId, StateSet,
};

static NO_TARGETS: StateSet = StateSet::new();

/// A finite automaton over a one-letter alphabet, possibly with epsilon transitions.
///
/// States are dense indices `0..total_states`, per-state transition and epsilon sets are
/// stored in parallel vectors and the accepting states in a bit set. State `0` is the initial
/// state. The structure is append-only: states and edges can be added but never removed.
///
/// # Example
/// ```
/// use unary_automata::prelude::*;
///
/// let mut a = Automaton::new(2, "even");
/// a.add_transition(0, 1).unwrap();
/// a.add_transition(1, 0).unwrap();
/// a.add_end_state(0).unwrap();
/// assert!(a.accepts(4));
/// assert!(!a.accepts(3));
/// assert!(a.add_transition(0, 2).is_err());
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Automaton {
    label: String,
    transitions: Vec<StateSet>,
    epsilon_transitions: Vec<StateSet>,
    end_states: BitSet,
}

/// The pair of state count and accepting-state count of an automaton, this is the usual
/// measure by which results of operations on unary automata are grouped.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Complexity {
    /// Number of states.
    pub states: usize,
    /// Number of accepting states.
    pub accepting: usize,
}

impl Complexity {
    /// Creates a new `Complexity` from the given counts.
    pub fn new(states: usize, accepting: usize) -> Self {
        Self { states, accepting }
    }
}

impl Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.states, self.accepting)
    }
}

impl Automaton {
    /// Creates an automaton with `total_states` states, no edges and no accepting states.
    pub fn new<S: Into<String>>(total_states: usize, label: S) -> Self {
        Self {
            label: label.into(),
            transitions: vec![StateSet::new(); total_states],
            epsilon_transitions: vec![StateSet::new(); total_states],
            end_states: BitSet::with_capacity(total_states),
        }
    }

    /// Returns a builder for an automaton with the given label, see [`AutomatonBuilder`].
    pub fn builder<S: Into<String>>(label: S) -> AutomatonBuilder {
        AutomatonBuilder::new(label)
    }

    /// Consumes `self` and returns it with the label replaced.
    pub fn with_label<S: Into<String>>(mut self, label: S) -> Self {
        self.label = label.into();
        self
    }

    /// Returns the number of states.
    pub fn total_states(&self) -> usize {
        self.transitions.len()
    }

    /// Returns the label, which records where the automaton came from.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Iterates over the accepting states in ascending order.
    pub fn end_states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.end_states.iter()
    }

    /// Returns the number of accepting states.
    pub fn accepting_count(&self) -> usize {
        self.end_states.len()
    }

    /// Returns true if and only if `state` is accepting.
    pub fn is_accepting(&self, state: StateId) -> bool {
        self.end_states.contains(state)
    }

    /// Returns true if at least one of the given states is accepting.
    pub fn contains_accepting<'a, I: IntoIterator<Item = &'a StateId>>(&self, states: I) -> bool {
        states.into_iter().any(|&q| self.is_accepting(q))
    }

    /// Gives a read-only view of the targets of all transitions leaving `state`. The set is
    /// empty if no transition was recorded or the state does not exist.
    pub fn transitions_of(&self, state: StateId) -> &StateSet {
        self.transitions.get(state).unwrap_or(&NO_TARGETS)
    }

    /// Gives a read-only view of the targets of all epsilon transitions leaving `state`.
    pub fn epsilon_transitions_of(&self, state: StateId) -> &StateSet {
        self.epsilon_transitions.get(state).unwrap_or(&NO_TARGETS)
    }

    /// Iterates over all transitions as `(source, target)` pairs, ordered by source and then target.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, StateId)> + '_ {
        self.transitions
            .iter()
            .enumerate()
            .flat_map(|(q, targets)| targets.iter().map(move |&p| (q, p)))
    }

    /// Iterates over all epsilon transitions as `(source, target)` pairs.
    pub fn epsilon_transitions(&self) -> impl Iterator<Item = (StateId, StateId)> + '_ {
        self.epsilon_transitions
            .iter()
            .enumerate()
            .flat_map(|(q, targets)| targets.iter().map(move |&p| (q, p)))
    }

    /// Returns true if `self` has at least one epsilon transition.
    pub fn has_epsilon_transitions(&self) -> bool {
        self.epsilon_transitions.iter().any(|targets| !targets.is_empty())
    }

    /// Checks whether every state has at most one transition and there are no epsilon transitions.
    pub fn is_deterministic(&self) -> bool {
        !self.has_epsilon_transitions() && self.transitions.iter().all(|t| t.len() <= 1)
    }

    /// Returns the [`Complexity`] of `self`.
    pub fn complexity(&self) -> Complexity {
        Complexity::new(self.total_states(), self.accepting_count())
    }

    /// Returns true if at least half of the states are accepting.
    pub fn has_half_end_states(&self) -> bool {
        self.accepting_count() * 2 >= self.total_states()
    }

    /// Appends a fresh state and returns its id, which is the number of states before the call.
    pub fn add_state(&mut self) -> StateId {
        let id = self.total_states();
        self.transitions.push(StateSet::new());
        self.epsilon_transitions.push(StateSet::new());
        id
    }

    /// Adds a transition on the input symbol. Adding the same transition twice has no effect.
    pub fn add_transition(&mut self, from: StateId, to: StateId) -> Result<()> {
        self.check_state(from)?;
        self.check_state(to)?;
        if self.epsilon_transitions[from].contains(&to) {
            return Err(self.conflict(from, to, EdgeKind::Epsilon));
        }
        self.insert_transition(from, to);
        Ok(())
    }

    /// Adds an epsilon transition. Adding the same epsilon transition twice has no effect.
    pub fn add_epsilon_transition(&mut self, from: StateId, to: StateId) -> Result<()> {
        self.check_state(from)?;
        self.check_state(to)?;
        if self.transitions[from].contains(&to) {
            return Err(self.conflict(from, to, EdgeKind::Symbol));
        }
        self.insert_epsilon_transition(from, to);
        Ok(())
    }

    /// Marks `state` as accepting.
    pub fn add_end_state(&mut self, state: StateId) -> Result<()> {
        self.check_state(state)?;
        self.insert_end_state(state);
        Ok(())
    }

    /// Computes the epsilon closure of the given states, see [`closure::epsilon_closure`].
    pub fn epsilon_closure<I: IntoIterator<Item = StateId>>(&self, states: I) -> StateSet {
        closure::epsilon_closure(self, states)
    }

    /// The set of states that the automaton can be in before reading any input, i.e. the
    /// epsilon closure of the initial state. Empty if there are no states.
    pub fn initial_closure(&self) -> StateSet {
        if self.total_states() == 0 {
            return StateSet::new();
        }
        self.epsilon_closure([0])
    }

    /// Reads one input symbol from each of the given states and closes the result under
    /// epsilon transitions.
    pub fn step<'a, I: IntoIterator<Item = &'a StateId>>(&self, states: I) -> StateSet {
        let targets: StateSet = states
            .into_iter()
            .flat_map(|&q| self.transitions_of(q).iter().copied())
            .collect();
        self.epsilon_closure(targets)
    }

    /// Decides whether the unique word of the given length is accepted.
    pub fn accepts(&self, length: usize) -> bool {
        let mut current = self.initial_closure();
        for _ in 0..length {
            if current.is_empty() {
                return false;
            }
            current = self.step(&current);
        }
        self.contains_accepting(&current)
    }

    /// Lists all accepted lengths in `0..=up_to`.
    pub fn accepted_lengths(&self, up_to: usize) -> Vec<usize> {
        let mut current = self.initial_closure();
        let mut accepted = vec![];
        for length in 0..=up_to {
            if self.contains_accepting(&current) {
                accepted.push(length);
            }
            current = self.step(&current);
        }
        accepted
    }

    pub(crate) fn insert_transition(&mut self, from: StateId, to: StateId) {
        debug_assert!(from < self.total_states() && to < self.total_states());
        self.transitions[from].insert(to);
    }

    pub(crate) fn insert_epsilon_transition(&mut self, from: StateId, to: StateId) {
        debug_assert!(from < self.total_states() && to < self.total_states());
        self.epsilon_transitions[from].insert(to);
    }

    pub(crate) fn insert_end_state(&mut self, state: StateId) {
        debug_assert!(state < self.total_states());
        self.end_states.insert(state);
    }

    fn check_state(&self, state: StateId) -> Result<()> {
        if state >= self.total_states() {
            return Err(AutomatonError::StateOutOfRange {
                label: self.label.clone(),
                state,
                total_states: self.total_states(),
            });
        }
        Ok(())
    }

    fn conflict(&self, from: StateId, to: StateId, existing: EdgeKind) -> AutomatonError {
        AutomatonError::ConflictingEdge {
            label: self.label.clone(),
            from,
            to,
            existing,
        }
    }
}

impl Display for Automaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Automaton: {}", self.label)?;
        writeln!(f, "Transitions:")?;
        for (q, p) in self.transitions() {
            writeln!(f, "State {q} -> {p}")?;
        }
        if self.has_epsilon_transitions() {
            writeln!(f, "Epsilon Transitions:")?;
            for (q, p) in self.epsilon_transitions() {
                writeln!(f, "State {q} -> \u{03B5} -> {p}")?;
            }
        }
        writeln!(f, "End states: [{}]", self.end_states().join(", "))
    }
}

/// Helper struct for the construction of automata. It collects states, edges and accepting
/// states and validates all of them at once when [`AutomatonBuilder::build`] is called.
///
/// # Example
/// ```
/// use unary_automata::prelude::*;
///
/// let a = Automaton::builder("odd")
///     .with_states(2)
///     .with_transitions([(0, 1), (1, 0)])
///     .with_end_states([1])
///     .build()
///     .unwrap();
/// assert_eq!(a.accepted_lengths(5), vec![1, 3, 5]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AutomatonBuilder {
    label: String,
    states: usize,
    transitions: Vec<(StateId, StateId)>,
    epsilon_transitions: Vec<(StateId, StateId)>,
    end_states: Vec<StateId>,
}

impl AutomatonBuilder {
    /// Creates an empty builder for an automaton with the given label.
    pub fn new<S: Into<String>>(label: S) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    /// Sets the number of states.
    pub fn with_states(mut self, states: usize) -> Self {
        self.states = states;
        self
    }

    /// Adds a list of `(source, target)` transitions.
    pub fn with_transitions<I: IntoIterator<Item = (StateId, StateId)>>(mut self, iter: I) -> Self {
        self.transitions.extend(iter);
        self
    }

    /// Adds a list of `(source, target)` epsilon transitions.
    pub fn with_epsilon_transitions<I: IntoIterator<Item = (StateId, StateId)>>(
        mut self,
        iter: I,
    ) -> Self {
        self.epsilon_transitions.extend(iter);
        self
    }

    /// Adds a list of accepting states.
    pub fn with_end_states<I: IntoIterator<Item = StateId>>(mut self, iter: I) -> Self {
        self.end_states.extend(iter);
        self
    }

    /// Builds the automaton, failing on the first edge or accepting state that refers to a
    /// nonexistent state or on an edge that is given both with and without epsilon.
    pub fn build(self) -> Result<Automaton> {
        let mut automaton = Automaton::new(self.states, self.label);
        for (from, to) in self.transitions {
            automaton.add_transition(from, to)?;
        }
        for (from, to) in self.epsilon_transitions {
            automaton.add_epsilon_transition(from, to)?;
        }
        for state in self.end_states {
            automaton.add_end_state(state)?;
        }
        Ok(automaton)
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn adding_is_idempotent() {
        let mut a = Automaton::new(3, "a");
        a.add_transition(0, 1).unwrap();
        a.add_transition(0, 1).unwrap();
        a.add_epsilon_transition(1, 2).unwrap();
        a.add_epsilon_transition(1, 2).unwrap();
        a.add_end_state(2).unwrap();
        a.add_end_state(2).unwrap();

        assert_eq!(a.transitions_of(0).len(), 1);
        assert_eq!(a.epsilon_transitions_of(1).len(), 1);
        assert_eq!(a.accepting_count(), 1);
        assert!(a.transitions_of(2).is_empty());
        assert!(a.transitions_of(17).is_empty());
    }

    #[test]
    fn out_of_range_states_are_rejected() {
        let mut a = Automaton::new(2, "small");
        assert_eq!(
            a.add_transition(0, 2),
            Err(AutomatonError::StateOutOfRange {
                label: "small".into(),
                state: 2,
                total_states: 2
            })
        );
        assert!(a.add_epsilon_transition(5, 0).is_err());
        let err = a.add_end_state(3).unwrap_err();
        assert_eq!(
            err.to_string(),
            "state 3 does not exist in automaton \"small\" which has 2 states"
        );
        assert_eq!(a.transitions().count(), 0);
        assert_eq!(a.accepting_count(), 0);
    }

    #[test]
    fn edges_cannot_be_both_symbol_and_epsilon() {
        let mut a = Automaton::new(2, "mixed");
        a.add_transition(0, 1).unwrap();
        assert!(matches!(
            a.add_epsilon_transition(0, 1),
            Err(AutomatonError::ConflictingEdge {
                existing: EdgeKind::Symbol,
                ..
            })
        ));
        a.add_epsilon_transition(1, 0).unwrap();
        assert!(matches!(
            a.add_transition(1, 0),
            Err(AutomatonError::ConflictingEdge {
                existing: EdgeKind::Epsilon,
                ..
            })
        ));
    }

    #[test]
    fn clones_are_independent() {
        let a = Automaton::builder("orig")
            .with_states(2)
            .with_transitions([(0, 1)])
            .with_end_states([1])
            .build()
            .unwrap();
        let mut b = a.clone();
        assert_eq!(a, b);
        b.add_transition(1, 0).unwrap();
        b.add_end_state(0).unwrap();
        let q = b.add_state();

        assert_eq!(q, 2);
        assert_eq!(b.total_states(), 3);
        assert_eq!(a.total_states(), 2);
        assert!(a.transitions_of(1).is_empty());
        assert!(!a.is_accepting(0));
        assert_eq!(b.label(), a.label());
    }

    #[test]
    fn rendering_lists_everything_in_order() {
        let a = Automaton::builder("r")
            .with_states(3)
            .with_transitions([(1, 2), (0, 1), (2, 0)])
            .with_epsilon_transitions([(2, 1)])
            .with_end_states([2, 0])
            .build()
            .unwrap();
        assert_eq!(
            a.to_string(),
            "Automaton: r\nTransitions:\nState 0 -> 1\nState 1 -> 2\nState 2 -> 0\n\
             Epsilon Transitions:\nState 2 -> \u{03B5} -> 1\nEnd states: [0, 2]\n"
        );

        let b = Automaton::new(1, "plain");
        assert_eq!(
            b.to_string(),
            "Automaton: plain\nTransitions:\nEnd states: []\n"
        );
    }

    #[test]
    fn summaries() {
        let a = Automaton::builder("s")
            .with_states(4)
            .with_transitions([(0, 1), (1, 2), (2, 3), (3, 0)])
            .with_end_states([1, 3])
            .build()
            .unwrap();
        assert_eq!(a.complexity(), Complexity::new(4, 2));
        assert_eq!(a.complexity().to_string(), "(4,2)");
        assert!(a.has_half_end_states());
        assert!(a.is_deterministic());
        assert_eq!(a.accepted_lengths(7), vec![1, 3, 5, 7]);
        assert!(!a.accepts(6));

        let empty = Automaton::new(0, "empty");
        assert!(!empty.accepts(0));
        assert!(empty.accepted_lengths(3).is_empty());
        assert!(empty.has_half_end_states());
    }

    #[test]
    fn acceptance_follows_epsilon_edges() {
        let a = Automaton::builder("eps")
            .with_states(3)
            .with_transitions([(1, 1)])
            .with_epsilon_transitions([(0, 1), (1, 2)])
            .with_end_states([2])
            .build()
            .unwrap();
        assert_eq!(a.initial_closure(), StateSet::from([0, 1, 2]));
        assert!(a.accepts(0));
        assert!(a.accepts(3));
        assert!(!a.is_deterministic());
    }
}
