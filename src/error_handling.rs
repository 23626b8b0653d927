use std::fmt::Display;

pub trait ErrorType: Display + PartialEq {}

// Validation reports every violation it finds, not just the first
pub type Errors<T> = Vec<T>;

// Prints an error to stderr in red
pub fn report(error: &impl ErrorType) {
    eprintln!("\x1b[31;49;1m{}\x1b[0m", error);
}
