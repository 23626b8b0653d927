mod automaton;
mod cli;
mod error_handling;
mod generator;
mod grammar;

use std::collections::{HashMap, HashSet};

use clap::Parser;
use itertools::Itertools;
use rand::prelude::*;

use automaton::{Automaton, State, SubsetConstruction};
use cli::{Cli, Command};
use error_handling::report;
use grammar::{Grammar, Symbol};

fn main() {
    match Cli::parse().command {
        Command::Demo { count, seed } => run_demo(count.unwrap_or(5), seed),
        Command::Accept { word } => run_accept(&word),
        Command::Dot => println!("{}", demo_nfa().to_dot()),
    }
}

fn run_demo(count: u32, seed: Option<u64>) {
    let grammar = demo_grammar();

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    println!("Grammar:\n{}", grammar);

    println!("Generated strings:");
    for _ in 0..count {
        match generator::generate(&grammar, &mut rng) {
            Ok(string) => println!("  {}", string),
            Err(error) => report(&error),
        }
    }

    println!("\nClassification: {}", grammar.classify());

    match Automaton::from_right_linear(&grammar) {
        Ok(converted) => {
            println!("\nAutomaton from grammar:");
            print_kind(&converted);
        }
        Err(error) => report(&error),
    }

    let nfa = demo_nfa();
    match nfa.to_grammar() {
        Ok(readback) => println!("\nGrammar read off the hand-built automaton:\n{}", readback),
        Err(errors) => {
            for error in &errors {
                report(error);
            }
        }
    }

    println!("\nHand-built automaton:");
    print_kind(&nfa);

    let construction = SubsetConstruction::run(&nfa);
    println!("\nSubset construction:");
    for (state, members) in construction
        .members
        .iter()
        .sorted_by_key(|(state, _)| (*state).clone())
    {
        let is_final = construction.automaton.final_states().contains(state);
        println!(
            "  {} = {{{}}}{}",
            state,
            members.iter().join(", "),
            if is_final { " (final)" } else { "" }
        );
    }
}

fn run_accept(word: &str) {
    let grammar = demo_grammar();
    let symbols: Vec<String> = word.chars().map(String::from).collect();

    let nfa = match Automaton::from_right_linear(&grammar) {
        Ok(nfa) => nfa,
        Err(error) => return report(&error),
    };

    println!("by nondeterministic simulation: {}", nfa.accepts_any_path(&symbols));

    match nfa.to_dfa().accepts(&symbols) {
        Ok(accepted) => println!("by determinized automaton:      {}", accepted),
        Err(error) => report(&error),
    }
}

fn print_kind(automaton: &Automaton) {
    println!(
        "  start {}, {}",
        automaton.start(),
        if automaton.is_deterministic() {
            "deterministic (DFA)"
        } else {
            "nondeterministic (NFA)"
        }
    );
}

// The demo grammar: S → aS | bD | fR, D → cD | dR | d, R → bR | f
fn demo_grammar() -> Grammar {
    let mut rules = HashMap::new();
    rules.insert("S".to_string(), vec![
        vec![t("a"), n("S")],
        vec![t("b"), n("D")],
        vec![t("f"), n("R")],
    ]);
    rules.insert("D".to_string(), vec![
        vec![t("c"), n("D")],
        vec![t("d"), n("R")],
        vec![t("d")],
    ]);
    rules.insert("R".to_string(), vec![
        vec![t("b"), n("R")],
        vec![t("f")],
    ]);

    // The demo data is well formed, so construction cannot fail
    Grammar::new(
        names(&["S", "D", "R"]),
        names(&["a", "b", "c", "d", "f"]),
        rules,
        "S".to_string(),
    )
    .unwrap()
}

// The demo automaton, nondeterministic because of the two moves of q2 on b
fn demo_nfa() -> Automaton {
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

fn t(text: &str) -> Symbol {
    Symbol::Terminal(text.to_string())
}

fn n(text: &str) -> Symbol {
    Symbol::Nonterminal(text.to_string())
}

fn named(name: &str) -> State {
    State::Named(name.to_string())
}

fn names(list: &[&str]) -> HashSet<String> {
    list.iter().map(|name| name.to_string()).collect()
}
