/*
    This module is for storing and simulating finite automata
*/

mod dot;
mod from_grammar;
mod subsets;
mod to_grammar;

pub use subsets::SubsetConstruction;

use std::collections::{BTreeSet, HashMap};
use std::fmt::Display;

use itertools::Itertools;

use crate::error_handling::ErrorType;

// A state label in an automaton
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum State {
    // A state named after a grammar non-terminal or given directly
    Named(String),
    // The shared accepting state every terminating production feeds into
    Accept,
    // An interned set of original states, produced by determinization
    Subset(usize),
}

impl Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            State::Named(name) => write!(f, "{}", name),
            State::Accept => write!(f, "final"),
            State::Subset(id) => write!(f, "S{}", id),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum SimulationError {
    // A visited state has several possible moves on the same symbol
    NotDeterministic { state: State, symbol: String },
}

impl ErrorType for SimulationError {}

impl Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationError::NotDeterministic { state, symbol } => write!(
                f,
                "State `{}` has more than one transition on `{}`; determinize first",
                state, symbol
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    states: BTreeSet<State>,
    alphabet: BTreeSet<String>,
    transitions: HashMap<State, HashMap<String, BTreeSet<State>>>,
    start: State,
    final_states: BTreeSet<State>,
}

impl Automaton {
    pub fn new(start: State) -> Automaton {
        Automaton {
            states: BTreeSet::from([start.clone()]),
            alphabet: BTreeSet::new(),
            transitions: HashMap::new(),
            start,
            final_states: BTreeSet::new(),
        }
    }

    pub fn insert_state(&mut self, state: State) {
        self.states.insert(state);
    }

    pub fn insert_symbol(&mut self, symbol: impl Into<String>) {
        self.alphabet.insert(symbol.into());
    }

    pub fn mark_final(&mut self, state: State) {
        self.states.insert(state.clone());
        self.final_states.insert(state);
    }

    // Adds a transition, declaring its states and symbol along the way.
    // Several targets for the same (state, symbol) pair are kept side by
    // side, which is what makes the automaton nondeterministic
    pub fn add_transition(&mut self, from: State, symbol: impl Into<String>, to: State) {
        let symbol = symbol.into();
        self.states.insert(from.clone());
        self.states.insert(to.clone());
        self.alphabet.insert(symbol.clone());
        self.transitions
            .entry(from)
            .or_default()
            .entry(symbol)
            .or_default()
            .insert(to);
    }

    pub fn start(&self) -> &State {
        &self.start
    }

    pub fn final_states(&self) -> &BTreeSet<State> {
        &self.final_states
    }

    fn targets(&self, state: &State, symbol: &str) -> Option<&BTreeSet<State>> {
        self.transitions
            .get(state)
            .and_then(|by_symbol| by_symbol.get(symbol))
    }

    // An automaton is deterministic when no (state, symbol) pair has two or
    // more possible moves. A missing move does not count against it; that
    // only makes the simulation reject
    pub fn is_deterministic(&self) -> bool {
        self.states
            .iter()
            .cartesian_product(self.alphabet.iter())
            .all(|(state, symbol)| {
                self.targets(state, symbol)
                    .map_or(true, |targets| targets.len() <= 1)
            })
    }

    // Runs the automaton as a DFA over the input. Rejects as soon as a
    // symbol has no move; fails if a visited pair leaves a choice open
    pub fn accepts<S: AsRef<str>>(&self, input: &[S]) -> Result<bool, SimulationError> {
        let mut current = self.start.clone();

        for symbol in input {
            let symbol = symbol.as_ref();
            let mut targets = self.targets(&current, symbol).into_iter().flatten();

            current = match (targets.next(), targets.next()) {
                (Some(target), None) => target.clone(),
                (None, _) => return Ok(false),
                (Some(_), Some(_)) => {
                    return Err(SimulationError::NotDeterministic {
                        state: current,
                        symbol: symbol.to_string(),
                    })
                }
            };
        }

        return Ok(self.final_states.contains(&current));
    }

    // Full nondeterministic simulation: follows every possible path at once
    // and accepts if any of them ends in a final state
    pub fn accepts_any_path<S: AsRef<str>>(&self, input: &[S]) -> bool {
        let mut active = BTreeSet::from([self.start.clone()]);

        for symbol in input {
            active = active
                .iter()
                .filter_map(|state| self.targets(state, symbol.as_ref()))
                .flatten()
                .cloned()
                .collect();

            if active.is_empty() {
                return false;
            }
        }

        active.iter().any(|state| self.final_states.contains(state))
    }

    // Builds the equivalent deterministic automaton via subset construction
    pub fn to_dfa(&self) -> Automaton {
        SubsetConstruction::run(self).automaton
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub fn named(name: &str) -> State {
        State::Named(name.to_string())
    }

    // q0 -a→ q1, q1 -b→ q1, q1 -a→ q2, q2 -b→ {q2, q3}, q3 -b→ q4,
    // q3 -a→ q1, final q4
    pub fn lab_nfa() -> Automaton {
        let mut nfa = Automaton::new(named("q0"));
        nfa.add_transition(named("q0"), "a", named("q1"));
        nfa.add_transition(named("q1"), "b", named("q1"));
        nfa.add_transition(named("q1"), "a", named("q2"));
        nfa.add_transition(named("q2"), "b", named("q2"));
        nfa.add_transition(named("q2"), "b", named("q3"));
        nfa.add_transition(named("q3"), "b", named("q4"));
        nfa.add_transition(named("q3"), "a", named("q1"));
        nfa.mark_final(named("q4"));
        nfa
    }

    #[test]
    fn lab_nfa_is_not_deterministic() {
        // q2 can move to both q2 and q3 on b
        assert!(!lab_nfa().is_deterministic());
    }

    #[test]
    fn single_target_per_pair_is_deterministic() {
        let mut dfa = Automaton::new(named("even"));
        dfa.add_transition(named("even"), "a", named("odd"));
        dfa.add_transition(named("odd"), "a", named("even"));
        dfa.mark_final(named("even"));

        assert!(dfa.is_deterministic());
    }

    #[test]
    fn missing_moves_do_not_make_an_nfa() {
        // b has no move anywhere, which only affects simulation
        let mut dfa = Automaton::new(named("p"));
        dfa.add_transition(named("p"), "a", named("q"));
        dfa.insert_symbol("b");

        assert!(dfa.is_deterministic());
    }

    #[test]
    fn accepts_walks_deterministic_paths() {
        let mut dfa = Automaton::new(named("even"));
        dfa.add_transition(named("even"), "a", named("odd"));
        dfa.add_transition(named("odd"), "a", named("even"));
        dfa.mark_final(named("even"));

        assert_eq!(dfa.accepts(&["a", "a"]), Ok(true));
        assert_eq!(dfa.accepts(&["a"]), Ok(false));
        assert_eq!(dfa.accepts::<&str>(&[]), Ok(true));
    }

    #[test]
    fn accepts_rejects_on_missing_move() {
        assert_eq!(lab_nfa().accepts(&["b"]), Ok(false));
    }

    #[test]
    fn accepts_fails_on_open_choice() {
        // q0 -a→ q1 -a→ q2 is forced, then b leaves two choices
        assert_eq!(
            lab_nfa().accepts(&["a", "a", "b"]),
            Err(SimulationError::NotDeterministic {
                state: named("q2"),
                symbol: "b".to_string(),
            })
        );
    }

    #[test]
    fn any_path_accepts_when_one_path_reaches_final() {
        // The accepting run for aabb is q0 -a→ q1 -a→ q2 -b→ q3 -b→ q4,
        // taken while the sibling branch idles in q2
        let nfa = lab_nfa();
        assert!(nfa.accepts_any_path(&["a", "a", "b", "b"]));
        assert!(nfa.accepts_any_path(&["a", "a", "b", "b", "b"]));
        assert!(!nfa.accepts_any_path(&["a", "b", "b", "b"]));
        assert!(!nfa.accepts_any_path(&["a"]));
        assert!(!nfa.accepts_any_path(&["b"]));
    }
}
