//! CLI module for the grammar analysis toolkit.
//!
//! Thin by design: it loads a grammar file, runs one or all four
//! disciplines, and prints a one-line verdict per discipline. It is not the
//! report writer or pretty-printer a fuller tool would ship.

use crate::api::{analyze_lalr, analyze_ll1, analyze_lr0, analyze_recursive_descent};
use crate::error::Result;
use crate::grammar::GrammarModel;
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::PathBuf;

/// Analyze a context-free grammar for parsing-discipline suitability.
#[derive(Debug, Parser)]
#[command(name = "cfg_analyzer", version, about)]
pub struct Cli {
    /// Path to a grammar text file.
    pub grammar_path: PathBuf,

    /// Which discipline to run. Defaults to running all four.
    #[arg(long, value_enum)]
    pub discipline: Option<Discipline>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Discipline {
    RecursiveDescent,
    Ll1,
    Lr0,
    Lalr,
}

pub fn run(cli: Cli) -> Result<()> {
    let text = fs::read_to_string(&cli.grammar_path)?;
    let grammar = GrammarModel::parse(&text)?;

    match cli.discipline {
        Some(Discipline::RecursiveDescent) => print_recursive_descent(&grammar),
        Some(Discipline::Ll1) => print_ll1(&grammar),
        Some(Discipline::Lr0) => print_lr0(&grammar),
        Some(Discipline::Lalr) => print_lalr(&grammar),
        None => {
            print_recursive_descent(&grammar);
            print_ll1(&grammar);
            print_lr0(&grammar);
            print_lalr(&grammar);
        }
    }

    Ok(())
}

fn print_recursive_descent(grammar: &GrammarModel) {
    let result = analyze_recursive_descent(grammar);
    println!(
        "recursive-descent: {} ({} finding(s))",
        verdict(result.is_suitable()),
        result.conflicts.len()
    );
}

fn print_ll1(grammar: &GrammarModel) {
    let result = analyze_ll1(grammar);
    println!(
        "ll1: {} ({} conflict(s))",
        verdict(result.is_ll1()),
        result.conflicts.len()
    );
}

fn print_lr0(grammar: &GrammarModel) {
    let result = analyze_lr0(grammar);
    println!(
        "lr0: {} ({} state(s), {} conflict(s))",
        verdict(result.is_lr0()),
        result.automaton.states.len(),
        result.conflicts.len()
    );
}

fn print_lalr(grammar: &GrammarModel) {
    let result = analyze_lalr(grammar);
    println!(
        "lalr: {} ({} state(s), {} conflict(s), merged from {} LR(1) state(s))",
        verdict(result.is_lalr1()),
        result.merger.states.len(),
        result.conflicts.len(),
        result.lr1_state_count
    );
}

fn verdict(suitable: bool) -> &'static str {
    if suitable {
        "suitable"
    } else {
        "not suitable"
    }
}
