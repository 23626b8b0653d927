/*
    This module reads finite automata back off as grammars
*/

use std::collections::HashMap;

use itertools::Itertools;

use crate::grammar::{Grammar, GrammarErrors, Rewrite, Symbol};

use super::{Automaton, State};

impl Automaton {
    // Reads the automaton off as a grammar: states become non-terminals
    // under fresh letter names, every move q -a→ r becomes a production
    // A -> aB, and every final state gains an ε-production
    pub fn to_grammar(&self) -> Result<Grammar, GrammarErrors> {
        let names = self.state_names();

        let mut rules: HashMap<String, Rewrite> = HashMap::new();
        for state in &self.states {
            let mut rewrite = Rewrite::new();

            if let Some(by_symbol) = self.transitions.get(state) {
                let sorted = by_symbol.iter().sorted_by_key(|(symbol, _)| (*symbol).clone());
                for (symbol, targets) in sorted {
                    for target in targets {
                        rewrite.push(vec![
                            Symbol::Terminal(symbol.clone()),
                            Symbol::Nonterminal(names[target].clone()),
                        ]);
                    }
                }
            }

            if self.final_states.contains(state) {
                rewrite.push(Vec::new());
            }

            // States with no moves and no ε leave no rule behind
            if !rewrite.is_empty() {
                rules.insert(names[state].clone(), rewrite);
            }
        }

        return Grammar::new(
            names.values().cloned().collect(),
            self.alphabet.iter().cloned().collect(),
            rules,
            names[&self.start].clone(),
        );
    }

    // Assigns each state a fresh name, A through Z and then numbered
    // rounds, skipping names the alphabet already uses
    fn state_names(&self) -> HashMap<State, String> {
        let candidates = (0usize..)
            .flat_map(|round| {
                (b'A'..=b'Z').map(move |letter| {
                    if round == 0 {
                        char::from(letter).to_string()
                    } else {
                        format!("{}{}", char::from(letter), round)
                    }
                })
            })
            .filter(|name| !self.alphabet.contains(name));

        self.states.iter().cloned().zip(candidates).collect()
    }
}
