/*
    This module is for storing, validating, and classifying grammars
*/

use std::collections::{HashMap, HashSet};
use std::fmt::Display;

use itertools::Itertools;

use crate::error_handling::*;

// The base unit in a grammar rule
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terminal(String),
    Nonterminal(String),
}

impl Symbol {
    pub fn text(&self) -> &str {
        match self {
            Symbol::Terminal(text) => text,
            Symbol::Nonterminal(text) => text,
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text())
    }
}

// The symbols in a single alternative; an empty alternative derives ε
pub type Alternative = Vec<Symbol>;

// The alternatives of a rewrite rule
pub type Rewrite = Vec<Alternative>;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum GrammarError {
    // The same name is declared both terminal and non-terminal
    OverlappingSymbol(String),
    // The start symbol is not a declared non-terminal
    UnknownStartSymbol(String),
    // An alternative references a symbol declared in neither set
    UndeclaredSymbol(String),
}

impl ErrorType for GrammarError {}

impl Display for GrammarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarError::OverlappingSymbol(symbol) => {
                write!(f, "Symbol `{}` is declared both terminal and non-terminal", symbol)
            }
            GrammarError::UnknownStartSymbol(symbol) => {
                write!(f, "Start symbol `{}` is not a declared non-terminal", symbol)
            }
            GrammarError::UndeclaredSymbol(symbol) => {
                write!(f, "Symbol `{}` is declared neither terminal nor non-terminal", symbol)
            }
        }
    }
}

pub type GrammarErrors = Errors<GrammarError>;

// Where a grammar falls in the Chomsky hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarClass {
    Type3Regular,
    Type2ContextFree,
    Type1ContextSensitive,
    Type0Unrestricted,
}

impl Display for GrammarClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarClass::Type3Regular => write!(f, "Type 3 - Regular Grammar"),
            GrammarClass::Type2ContextFree => write!(f, "Type 2 - Context-Free Grammar"),
            GrammarClass::Type1ContextSensitive => write!(f, "Type 1 - Context-Sensitive Grammar"),
            GrammarClass::Type0Unrestricted => write!(f, "Type 0 - Unrestricted Grammar"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Grammar {
    nonterminals: HashSet<String>,
    terminals: HashSet<String>,
    rules: HashMap<String, Rewrite>,
    start_symbol: String,
}

impl Grammar {
    // Validates and freezes a grammar. Every violation is reported, not just
    // the first one found
    pub fn new(
        nonterminals: HashSet<String>,
        terminals: HashSet<String>,
        rules: HashMap<String, Rewrite>,
        start_symbol: String,
    ) -> Result<Grammar, GrammarErrors> {
        let grammar = Grammar {
            nonterminals,
            terminals,
            rules,
            start_symbol,
        };

        let errors = grammar.validate();
        if errors.is_empty() {
            Ok(grammar)
        } else {
            Err(errors)
        }
    }

    fn validate(&self) -> GrammarErrors {
        let mut errors = Vec::new();

        errors.extend(
            self.nonterminals
                .intersection(&self.terminals)
                .map(|symbol| GrammarError::OverlappingSymbol(symbol.clone())),
        );

        if !self.nonterminals.contains(&self.start_symbol) {
            errors.push(GrammarError::UnknownStartSymbol(self.start_symbol.clone()));
        }

        errors.extend(self.undeclared_symbols());

        // Hash map iteration order leaks into the collected errors otherwise
        errors.sort();
        errors.dedup();
        return errors;
    }

    // Finds every symbol used in an alternative without being declared in
    // the matching set
    fn undeclared_symbols(&self) -> GrammarErrors {
        self.rules
            .values()
            .flatten()
            .flatten()
            .filter(|symbol| match symbol {
                Symbol::Nonterminal(name) => !self.nonterminals.contains(name),
                Symbol::Terminal(name) => !self.terminals.contains(name),
            })
            .map(|symbol| GrammarError::UndeclaredSymbol(symbol.text().to_string()))
            .collect()
    }

    pub fn nonterminals(&self) -> &HashSet<String> {
        &self.nonterminals
    }

    pub fn terminals(&self) -> &HashSet<String> {
        &self.terminals
    }

    pub fn rules(&self) -> &HashMap<String, Rewrite> {
        &self.rules
    }

    pub fn rewrite(&self, nonterminal: &str) -> Option<&Rewrite> {
        self.rules.get(nonterminal)
    }

    pub fn start_symbol(&self) -> &str {
        &self.start_symbol
    }

    // Determines the most specific Chomsky class the grammar fits in. Each
    // class starts as a candidate and rules knock candidates out
    pub fn classify(&self) -> GrammarClass {
        let mut is_type3 = true;
        let mut is_type2 = true;
        let mut is_type1 = true;

        for (lhs, rewrite) in &self.rules {
            // Context-free and regular grammars both require a lone declared
            // non-terminal on the left side of every rule
            if !self.nonterminals.contains(lhs) {
                is_type2 = false;
                is_type3 = false;
            }

            for alternative in rewrite {
                let start_epsilon = alternative.is_empty() && *lhs == self.start_symbol;

                // Productions may not shrink, except the start symbol
                // deriving the empty string
                if alternative.is_empty() && !start_epsilon {
                    is_type1 = false;
                }

                if is_type3 && !start_epsilon && !is_linear(alternative) {
                    is_type3 = false;
                }
            }
        }

        if is_type3 {
            GrammarClass::Type3Regular
        } else if is_type2 {
            GrammarClass::Type2ContextFree
        } else if is_type1 {
            GrammarClass::Type1ContextSensitive
        } else {
            GrammarClass::Type0Unrestricted
        }
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (lhs, rewrite) in self.rules.iter().sorted_by_key(|(lhs, _)| (*lhs).clone()) {
            let alternatives = rewrite
                .iter()
                .map(|alternative| {
                    if alternative.is_empty() {
                        "ε".to_string()
                    } else {
                        alternative.iter().join(" ")
                    }
                })
                .join(" | ");
            writeln!(f, "{} -> {}", lhs, alternatives)?;
        }
        Ok(())
    }
}

// A regular alternative: a lone terminal, a terminal then a non-terminal, or
// a non-terminal then a terminal. Right- and left-linear shapes may be mixed
// across different rules and the grammar still counts as regular
fn is_linear(alternative: &Alternative) -> bool {
    matches!(
        alternative.as_slice(),
        [Symbol::Terminal(_)]
            | [Symbol::Terminal(_), Symbol::Nonterminal(_)]
            | [Symbol::Nonterminal(_), Symbol::Terminal(_)]
    )
}
