/*
    This module converts right-linear grammars into finite automata
*/

use std::fmt::Display;

use itertools::Itertools;

use crate::error_handling::ErrorType;
use crate::grammar::{Alternative, Grammar, Symbol};

use super::{Automaton, State};

#[derive(Debug, PartialEq)]
pub enum ConversionError {
    // A rule is defined for something other than a declared non-terminal
    UnsupportedRuleHead(String),
    // An alternative is not a terminal or a terminal followed by a
    // non-terminal
    UnsupportedAlternative {
        nonterminal: String,
        alternative: Alternative,
    },
}

impl ErrorType for ConversionError {}

impl Display for ConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversionError::UnsupportedRuleHead(head) => {
                write!(f, "Rule head `{}` is not a declared non-terminal", head)
            }
            ConversionError::UnsupportedAlternative {
                nonterminal,
                alternative,
            } => write!(
                f,
                "Rule `{} -> {}` is not right-linear",
                nonterminal,
                alternative.iter().join(" ")
            ),
        }
    }
}

impl Automaton {
    // Builds the automaton whose states are the grammar's non-terminals and
    // whose alphabet is its terminals. Every terminating production feeds
    // one shared accepting state; two productions on the same non-terminal
    // and terminal pile up into one nondeterministic move
    pub fn from_right_linear(grammar: &Grammar) -> Result<Automaton, ConversionError> {
        let mut automaton = Automaton::new(State::Named(grammar.start_symbol().to_string()));

        for nonterminal in grammar.nonterminals() {
            automaton.insert_state(State::Named(nonterminal.clone()));
        }
        for terminal in grammar.terminals() {
            automaton.insert_symbol(terminal.clone());
        }

        for (lhs, rewrite) in grammar.rules() {
            if !grammar.nonterminals().contains(lhs) {
                return Err(ConversionError::UnsupportedRuleHead(lhs.clone()));
            }

            for alternative in rewrite {
                match alternative.as_slice() {
                    [Symbol::Terminal(terminal)] => {
                        automaton.mark_final(State::Accept);
                        automaton.add_transition(
                            State::Named(lhs.clone()),
                            terminal.clone(),
                            State::Accept,
                        );
                    }
                    [Symbol::Terminal(terminal), Symbol::Nonterminal(next)] => {
                        automaton.add_transition(
                            State::Named(lhs.clone()),
                            terminal.clone(),
                            State::Named(next.clone()),
                        );
                    }
                    _ => {
                        return Err(ConversionError::UnsupportedAlternative {
                            nonterminal: lhs.clone(),
                            alternative: alternative.clone(),
                        })
                    }
                }
            }
        }

        Ok(automaton)
    }
}
