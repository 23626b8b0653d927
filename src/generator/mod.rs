/*
    This module generates random strings from a grammar
*/

use std::fmt::Display;

use rand::prelude::*;

use crate::error_handling::*;
use crate::grammar::*;

// A derivation rewriting the form more times than this is treated as
// divergent
const MAX_REWRITES: usize = 10_000;

#[derive(Debug, PartialEq)]
pub enum GenerateError {
    // An undefined nonterminal was reached during derivation
    UndefinedNonterminal(String),
    // The derivation never ran out of non-terminals
    DerivationTooLong,
}

impl ErrorType for GenerateError {}

impl Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateError::UndefinedNonterminal(nonterminal) => {
                write!(f, "No definition for nonterminal `{}`", nonterminal)
            }
            GenerateError::DerivationTooLong => {
                write!(f, "Derivation exceeded {} rewriting steps", MAX_REWRITES)
            }
        }
    }
}

pub type GenResult = Result<String, GenerateError>;

pub fn generate(grammar: &Grammar, rng: &mut impl Rng) -> GenResult {
    generate_from(grammar, grammar.start_symbol(), rng)
}

// Generates a string in the given grammar starting with the given symbol,
// by rewriting every non-terminal in the sentential form until none remain
pub fn generate_from(grammar: &Grammar, start: &str, rng: &mut impl Rng) -> GenResult {
    let mut form: Vec<Symbol> = vec![Symbol::Nonterminal(start.to_string())];

    for _ in 0..MAX_REWRITES {
        let mut next = Vec::with_capacity(form.len());
        let mut rewritten = false;

        for symbol in &form {
            match symbol {
                Symbol::Nonterminal(name) => {
                    rewritten = true;
                    next.extend(pick_alternative(grammar, name, rng)?.iter().cloned());
                }
                terminal => next.push(terminal.clone()),
            }
        }

        if !rewritten {
            return Ok(form.iter().map(Symbol::text).collect());
        }
        form = next;
    }

    return Err(GenerateError::DerivationTooLong);
}

fn pick_alternative<'a>(
    grammar: &'a Grammar,
    nonterminal: &str,
    rng: &mut impl Rng,
) -> Result<&'a [Symbol], GenerateError> {
    let rewrite = grammar
        .rewrite(nonterminal)
        .ok_or_else(|| GenerateError::UndefinedNonterminal(nonterminal.to_string()))?;

    // A rule with no alternatives derives the empty string
    return Ok(rewrite.choose(rng).map(Vec::as_slice).unwrap_or(&[]));
}
