//! Unit tests for FIRST, FOLLOW, and nullability computation

use cfg_analyzer::{GrammarModel, SetComputer, Symbol};

#[test]
fn test_first_sets_simple() {
    let grammar = GrammarModel::parse("S -> A B\nA -> a").unwrap();
    let sets = SetComputer::new(&grammar);
    assert!(sets.first(&Symbol::non_terminal("A")).contains(&Symbol::terminal("a")));
}

#[test]
fn test_follow_sets_simple() {
    let grammar = GrammarModel::parse("S -> A B\nA -> a\nB -> b").unwrap();
    let sets = SetComputer::new(&grammar);
    assert!(sets.follow(&Symbol::non_terminal("S")).contains(&Symbol::EndMarker));
}

#[test]
fn test_first_with_epsilon() {
    let grammar = GrammarModel::parse("S -> A B\nA -> a | epsilon").unwrap();
    let sets = SetComputer::new(&grammar);
    let first_a = sets.first(&Symbol::non_terminal("A"));
    assert!(first_a.contains(&Symbol::terminal("a")));
    assert!(first_a.contains(&Symbol::Epsilon));
    assert!(sets.is_nullable(&Symbol::non_terminal("A")));
}

#[test]
fn test_first_of_string() {
    let grammar = GrammarModel::parse("S -> A B\nA -> a\nB -> b").unwrap();
    let sets = SetComputer::new(&grammar);
    let first = sets.first_of_string(&[Symbol::non_terminal("A"), Symbol::non_terminal("B")]);
    assert!(first.contains(&Symbol::terminal("a")));
    assert!(!first.contains(&Symbol::Epsilon));
}

#[test]
fn test_follow_propagation() {
    let grammar = GrammarModel::parse("S -> A B\nA -> a\nB -> b").unwrap();
    let sets = SetComputer::new(&grammar);
    assert!(sets.follow(&Symbol::non_terminal("A")).contains(&Symbol::terminal("b")));
}

/// G1 from the toolkit's end-to-end scenarios: classic expression grammar.
#[test]
fn test_g1_expression_grammar_first_follow() {
    let text = "E -> T X\nX -> '+' T X | epsilon\nT -> F Y\nY -> '*' F Y | epsilon\nF -> '(' E ')' | id";
    let grammar = GrammarModel::parse(text).unwrap();
    let sets = SetComputer::new(&grammar);

    let expected_first = [Symbol::terminal("'('"), Symbol::terminal("id")]
        .into_iter()
        .collect::<std::collections::HashSet<_>>();
    assert_eq!(sets.first(&Symbol::non_terminal("E")), expected_first);
    assert_eq!(sets.first(&Symbol::non_terminal("T")), expected_first);
    assert_eq!(sets.first(&Symbol::non_terminal("F")), expected_first);

    let follow_e = sets.follow(&Symbol::non_terminal("E"));
    assert!(follow_e.contains(&Symbol::EndMarker));
    assert!(follow_e.contains(&Symbol::terminal("')'")));
}
