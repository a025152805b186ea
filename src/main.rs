//! Grammar Analysis Toolkit
//!
//! Decides, for a context-free grammar given in a textual notation, whether
//! it fits recursive-descent, LL(1), LR(0), or LALR(1) parsing, and reports
//! the conflicts and automaton statistics behind that verdict.
//!
//! # Author
//! Juan Manuel Young Hoyos
//!
//! # References
//! Aho, Alfred V. et al. "Compilers: Principles, Techniques, and Tools" (2nd Edition).
//! Addison-Wesley, 2006.

use clap::Parser;
use cfg_analyzer::cli::{self, Cli};
use std::process;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(e) = cli::run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
