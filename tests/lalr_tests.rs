//! Unit tests for LALR(1) merging and ACTION/GOTO construction

use cfg_analyzer::conflict::{ConflictCatalog, ConflictEntry};
use cfg_analyzer::lalr::{Action, LALRMerger};
use cfg_analyzer::{GrammarModel, SetComputer};
use pretty_assertions::assert_eq;

/// G1 from the toolkit's end-to-end scenarios: factored expression grammar
/// is LALR(1) with no conflicts.
#[test]
fn test_g1_expression_grammar_is_lalr1() {
    let text = "E -> T X\nX -> '+' T X | epsilon\nT -> F Y\nY -> '*' F Y | epsilon\nF -> '(' E ')' | id";
    let grammar = GrammarModel::parse(text).unwrap();
    let sets = SetComputer::new(&grammar);
    let mut catalog = ConflictCatalog::new();
    let _merger = LALRMerger::build(&grammar, &sets, &mut catalog);
    assert!(catalog.is_empty());
}

/// G2 from the toolkit's end-to-end scenarios: the classic left-recursive
/// dragon-book grammar is LALR(1) despite not being LL(1).
#[test]
fn test_g2_left_recursive_grammar_is_lalr1() {
    let text = "E -> E '+' T | T\nT -> T '*' F | F\nF -> '(' E ')' | id";
    let grammar = GrammarModel::parse(text).unwrap();
    let sets = SetComputer::new(&grammar);
    let mut catalog = ConflictCatalog::new();
    let _merger = LALRMerger::build(&grammar, &sets, &mut catalog);
    assert!(catalog.is_empty());
}

/// G3 from the toolkit's end-to-end scenarios: the dangling-else
/// shift/reduce conflict survives LALR merging.
#[test]
fn test_g3_dangling_else_still_conflicts_under_lalr() {
    let text = "S -> i E t S | i E t S e S | a\nE -> b";
    let grammar = GrammarModel::parse(text).unwrap();
    let sets = SetComputer::new(&grammar);
    let mut catalog = ConflictCatalog::new();
    let _merger = LALRMerger::build(&grammar, &sets, &mut catalog);
    assert!(catalog
        .entries()
        .iter()
        .any(|e| matches!(e, ConflictEntry::ShiftReduce { .. })));
}

/// G5 from the toolkit's end-to-end scenarios: the reduce/reduce conflict
/// is not resolved by LALR(1) because both reductions' merged lookaheads
/// are identical ({a}).
#[test]
fn test_g5_reduce_reduce_conflict_not_resolved_by_lalr() {
    let text = "S -> A a | B a\nA -> c\nB -> c";
    let grammar = GrammarModel::parse(text).unwrap();
    let sets = SetComputer::new(&grammar);
    let mut catalog = ConflictCatalog::new();
    let _merger = LALRMerger::build(&grammar, &sets, &mut catalog);
    assert!(catalog
        .entries()
        .iter()
        .any(|e| matches!(e, ConflictEntry::ReduceReduce { .. })));
}

#[test]
fn test_lalr_state_count_le_lr1_state_count() {
    let grammar = GrammarModel::parse("S -> A\nS -> B\nA -> a\nB -> a").unwrap();
    let sets = SetComputer::new(&grammar);
    let lr1_count = LALRMerger::lr1_state_count(&grammar, &sets);
    let mut catalog = ConflictCatalog::new();
    let merger = LALRMerger::build(&grammar, &sets, &mut catalog);
    assert!(merger.states.len() <= lr1_count);
}

#[test]
fn test_accept_action_on_augmented_production() {
    let grammar = GrammarModel::parse("S -> a").unwrap();
    let sets = SetComputer::new(&grammar);
    let mut catalog = ConflictCatalog::new();
    let merger = LALRMerger::build(&grammar, &sets, &mut catalog);
    let accepts = merger.action.values().filter(|a| matches!(a, Action::Accept)).count();
    assert_eq!(accepts, 1);
}
