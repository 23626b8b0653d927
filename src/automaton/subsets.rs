/*
    This module implements the subset construction for determinizing
    automata
*/

use std::collections::{BTreeSet, HashMap, VecDeque};

use super::{Automaton, State};

// The outcome of determinizing an automaton: the equivalent deterministic
// automaton plus, for each interned state, the set of original states it
// stands for
#[derive(Debug)]
pub struct SubsetConstruction {
    pub automaton: Automaton,
    pub members: HashMap<State, BTreeSet<State>>,
}

impl SubsetConstruction {
    // Explores every state set reachable from {start}. Sets are interned as
    // fresh states the first time they appear, keyed by set equality
    pub fn run(nfa: &Automaton) -> SubsetConstruction {
        let mut discovered: HashMap<BTreeSet<State>, State> = HashMap::new();
        let mut queue: VecDeque<BTreeSet<State>> = VecDeque::new();

        let start_set = BTreeSet::from([nfa.start.clone()]);
        discovered.insert(start_set.clone(), State::Subset(0));
        queue.push_back(start_set);

        let mut automaton = Automaton::new(State::Subset(0));
        for symbol in &nfa.alphabet {
            automaton.insert_symbol(symbol.clone());
        }

        while let Some(current) = queue.pop_front() {
            let from = discovered[&current].clone();

            if current.iter().any(|state| nfa.final_states.contains(state)) {
                automaton.mark_final(from.clone());
            }

            for symbol in &nfa.alphabet {
                let image: BTreeSet<State> = current
                    .iter()
                    .filter_map(|state| nfa.targets(state, symbol))
                    .flatten()
                    .cloned()
                    .collect();

                if image.is_empty() {
                    continue;
                }

                // Only discovery is deduplicated; the transition itself is
                // recorded for every pair with a non-empty image
                let next_id = discovered.len();
                let to = discovered
                    .entry(image.clone())
                    .or_insert_with(|| {
                        queue.push_back(image.clone());
                        State::Subset(next_id)
                    })
                    .clone();

                automaton.add_transition(from.clone(), symbol.clone(), to);
            }
        }

        let members = discovered
            .into_iter()
            .map(|(set, state)| (state, set))
            .collect();

        return SubsetConstruction { automaton, members };
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{lab_nfa, named};
    use super::*;

    #[test]
    fn construction_starts_from_the_start_singleton() {
        let construction = SubsetConstruction::run(&lab_nfa());

        assert_eq!(
            construction.members[construction.automaton.start()],
            BTreeSet::from([named("q0")])
        );
    }

    #[test]
    fn construction_discovers_the_choice_set() {
        // The two moves of q2 on b collapse into the single set {q2, q3}
        let construction = SubsetConstruction::run(&lab_nfa());

        assert!(construction
            .members
            .values()
            .any(|set| *set == BTreeSet::from([named("q2"), named("q3")])));
    }

    #[test]
    fn determinized_automaton_is_deterministic() {
        assert!(lab_nfa().to_dfa().is_deterministic());
    }

    #[test]
    fn determinized_automaton_accepts_the_same_words() {
        let nfa = lab_nfa();
        let dfa = nfa.to_dfa();

        let words: &[&[&str]] = &[
            &[],
            &["a"],
            &["b"],
            &["a", "a", "b", "b"],
            &["a", "a", "b", "b", "b"],
            &["a", "b", "b", "b"],
            &["a", "a", "b", "a", "a", "b", "b"],
        ];

        for &word in words {
            assert_eq!(
                dfa.accepts(word),
                Ok(nfa.accepts_any_path(word)),
                "word {:?}",
                word
            );
        }
    }

    #[test]
    fn final_sets_are_those_containing_a_final_state() {
        let construction = SubsetConstruction::run(&lab_nfa());

        for (state, set) in &construction.members {
            let holds_final = set.contains(&named("q4"));
            assert_eq!(
                construction.automaton.final_states().contains(state),
                holds_final
            );
        }
    }

    #[test]
    fn determinizing_twice_changes_nothing_but_labels() {
        let dfa = lab_nfa().to_dfa();
        let again = dfa.to_dfa();

        assert!(again.is_deterministic());

        let words: &[&[&str]] = &[
            &[],
            &["a", "a", "b", "b"],
            &["a", "a", "b", "b", "b"],
            &["b", "a"],
        ];
        for &word in words {
            assert_eq!(again.accepts(word), dfa.accepts(word), "word {:?}", word);
        }
    }

    #[test]
    fn determinizing_a_dfa_yields_singleton_sets() {
        let construction = SubsetConstruction::run(&lab_nfa().to_dfa());

        assert!(construction.members.values().all(|set| set.len() == 1));
    }
}
