use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Walk through the grammar and automaton demos
    Demo {
        /// Amount of strings to generate (default: 5)
        #[arg(short = 'n', long, value_name = "AMOUNT")]
        count: Option<u32>,

        /// Seed for reproducible generation
        #[arg(short, long, value_name = "SEED")]
        seed: Option<u64>,
    },

    /// Test whether the demo grammar's language contains a word
    Accept {
        /// Word to test, one symbol per character
        word: String,
    },

    /// Print the demo automaton in graphviz dot format
    Dot,
}
