/*
    This module renders automata in the graphviz dot language
*/

use itertools::Itertools;

use super::Automaton;

impl std::fmt::Display for Automaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_dot())
    }
}

impl Automaton {
    // Renders the automaton in the graphviz dot format. Accepting states
    // are drawn as double circles and an unlabelled arrow marks the start
    pub fn to_dot(&self) -> String {
        let final_dot = format!(
            "node [shape = doublecircle]; {}",
            self.final_states
                .iter()
                .map(|state| format!("\"{}\"", state))
                .join(" ")
        );

        format!(
            "digraph automaton {{\n\
                \trankdir = LR;\n\
                \t{}\n\
                \tnode [shape = circle];\n\
                \t\"\" [shape = none]; \"\" -> \"{}\";\n\
            {}\n\
            }}",
            final_dot,
            self.start,
            self.edge_lines().map(|line| format!("\t{}", line)).join("\n")
        )
    }

    // Produces one dot line per transition, in a stable order
    fn edge_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.transitions
            .iter()
            .sorted_by_key(|(from, _)| (*from).clone())
            .flat_map(|(from, by_symbol)| {
                by_symbol.iter().sorted_by_key(|(symbol, _)| (*symbol).clone()).flat_map(
                    move |(symbol, targets)| {
                        targets.iter().map(move |to| {
                            format!("\"{}\" -> \"{}\" [label = \"{}\"];", from, to, symbol)
                        })
                    },
                )
            })
    }
}
