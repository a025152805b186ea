//! Unit tests for the LR(0) canonical automaton

use cfg_analyzer::conflict::ConflictCatalog;
use cfg_analyzer::lr0::LR0Automaton;
use cfg_analyzer::GrammarModel;
use pretty_assertions::assert_eq;

#[test]
fn test_lr0_clean_grammar_has_no_conflicts() {
    let text = "E -> T X\nX -> '+' T X | epsilon\nT -> F Y\nY -> '*' F Y | epsilon\nF -> '(' E ')' | id";
    let grammar = GrammarModel::parse(text).unwrap();
    let mut catalog = ConflictCatalog::new();
    let _automaton = LR0Automaton::build(&grammar, &mut catalog);
    assert!(catalog.is_empty());
}

/// G3 from the toolkit's end-to-end scenarios: dangling-else produces a
/// shift/reduce conflict on `e`.
#[test]
fn test_g3_dangling_else_shift_reduce_conflict() {
    let text = "S -> i E t S | i E t S e S | a\nE -> b";
    let grammar = GrammarModel::parse(text).unwrap();
    let mut catalog = ConflictCatalog::new();
    let _automaton = LR0Automaton::build(&grammar, &mut catalog);
    assert!(catalog
        .entries()
        .iter()
        .any(|e| matches!(e, cfg_analyzer::conflict::ConflictEntry::ShiftReduce { .. })));
}

/// G5 from the toolkit's end-to-end scenarios: ambiguous derivations of the
/// same shape from two different non-terminals force a reduce/reduce
/// conflict in LR(0).
#[test]
fn test_g5_reduce_reduce_conflict() {
    let text = "S -> A a | B a\nA -> c\nB -> c";
    let grammar = GrammarModel::parse(text).unwrap();
    let mut catalog = ConflictCatalog::new();
    let _automaton = LR0Automaton::build(&grammar, &mut catalog);
    assert!(catalog
        .entries()
        .iter()
        .any(|e| matches!(e, cfg_analyzer::conflict::ConflictEntry::ReduceReduce { .. })));
}

#[test]
fn test_lr0_state_count_is_deterministic() {
    let grammar = GrammarModel::parse("S -> A B\nA -> a\nB -> b").unwrap();
    let mut c1 = ConflictCatalog::new();
    let mut c2 = ConflictCatalog::new();
    let a1 = LR0Automaton::build(&grammar, &mut c1);
    let a2 = LR0Automaton::build(&grammar, &mut c2);
    assert_eq!(a1.states.len(), a2.states.len());
}
