//! The toolkit's four public entry points.
//!
//! Each `analyze_*` function is infallible: a [`GrammarModel`] is already
//! known to satisfy every data-model invariant by the time one is built
//! ([`GrammarModel::parse`] is the only place that can fail), so disciplines
//! a grammar doesn't fit are reported as data inside the returned struct's
//! [`crate::conflict::ConflictCatalog`], never as an `Err`.

use crate::conflict::{ConflictCatalog, ConflictEntry};
use crate::grammar::GrammarModel;
use crate::lalr::LALRMerger;
use crate::left_recursion::LeftRecursionAnalyzer;
use crate::ll1::{LL1TableBuilder, Ll1Table};
use crate::lr0::LR0Automaton;
use crate::sets::SetComputer;
use crate::symbol::Symbol;
use std::collections::{HashMap, HashSet};

/// Result of the recursive-descent discipline: left recursion, left-factor
/// candidates, and FIRST/FOLLOW, plus the LL(1) table a plain
/// recursive-descent parser's lookahead decisions amount to.
pub struct RecursiveDescentAnalysis {
    pub conflicts: ConflictCatalog,
    pub first: HashMap<Symbol, HashSet<Symbol>>,
    pub follow: HashMap<Symbol, HashSet<Symbol>>,
    pub table: Ll1Table,
}

impl RecursiveDescentAnalysis {
    /// True iff the grammar has no direct or indirect left recursion. Left
    /// recursion is fatal to recursive descent (infinite non-terminated
    /// recursion); left-factor candidates only cost backtracking, so they
    /// don't affect this verdict.
    pub fn is_suitable(&self) -> bool {
        !self.conflicts.entries().iter().any(|e| {
            matches!(
                e,
                ConflictEntry::LeftRecursionDirect { .. } | ConflictEntry::LeftRecursionIndirect { .. }
            )
        })
    }

    /// True iff any two alternatives of some non-terminal share a common
    /// leading symbol sequence, which a recursive-descent parser could only
    /// tell apart by backtracking.
    pub fn has_left_factor_candidates(&self) -> bool {
        self.conflicts
            .entries()
            .iter()
            .any(|e| matches!(e, ConflictEntry::LeftFactorCandidate { .. }))
    }

    /// True iff a single token of lookahead suffices to choose among a
    /// non-terminal's alternatives everywhere: no left recursion, no
    /// left-factor candidates, and the LL(1) table holds no conflicts.
    pub fn is_backtrack_free(&self) -> bool {
        self.is_suitable() && !self.has_left_factor_candidates() && LL1TableBuilder::is_ll1(&self.table)
    }
}

/// Result of the LL(1) discipline.
pub struct Ll1Analysis {
    pub table: Ll1Table,
    pub conflicts: ConflictCatalog,
    pub first: HashMap<Symbol, HashSet<Symbol>>,
    pub follow: HashMap<Symbol, HashSet<Symbol>>,
}

impl Ll1Analysis {
    pub fn is_ll1(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// Result of the generic shift-reduce (LR(0)) discipline.
pub struct Lr0Analysis {
    pub automaton: LR0Automaton,
    pub conflicts: ConflictCatalog,
}

impl Lr0Analysis {
    pub fn is_lr0(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// Result of the LALR(1) discipline.
pub struct LalrAnalysis {
    pub merger: LALRMerger,
    pub conflicts: ConflictCatalog,
    /// How many states the canonical LR(1) collection had before merging.
    pub lr1_state_count: usize,
}

impl LalrAnalysis {
    pub fn is_lalr1(&self) -> bool {
        self.conflicts.is_empty()
    }
}

pub fn analyze_recursive_descent(grammar: &GrammarModel) -> RecursiveDescentAnalysis {
    let mut conflicts = ConflictCatalog::new();
    LeftRecursionAnalyzer::new(grammar).analyze(&mut conflicts);

    let sets = SetComputer::new(grammar);
    let mut ll1_conflicts = ConflictCatalog::new();
    let table = LL1TableBuilder::new(grammar, &sets).build(&mut ll1_conflicts);

    RecursiveDescentAnalysis {
        conflicts,
        first: sets.first_sets(),
        follow: sets.follow_sets(),
        table,
    }
}

pub fn analyze_ll1(grammar: &GrammarModel) -> Ll1Analysis {
    let sets = SetComputer::new(grammar);
    let mut conflicts = ConflictCatalog::new();
    let table = LL1TableBuilder::new(grammar, &sets).build(&mut conflicts);
    Ll1Analysis {
        table,
        conflicts,
        first: sets.first_sets(),
        follow: sets.follow_sets(),
    }
}

pub fn analyze_lr0(grammar: &GrammarModel) -> Lr0Analysis {
    let mut conflicts = ConflictCatalog::new();
    let automaton = LR0Automaton::build(grammar, &mut conflicts);
    Lr0Analysis {
        automaton,
        conflicts,
    }
}

pub fn analyze_lalr(grammar: &GrammarModel) -> LalrAnalysis {
    let sets = SetComputer::new(grammar);
    let mut conflicts = ConflictCatalog::new();
    let lr1_state_count = LALRMerger::lr1_state_count(grammar, &sets);
    let merger = LALRMerger::build(grammar, &sets, &mut conflicts);
    LalrAnalysis {
        merger,
        conflicts,
        lr1_state_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_recursive_descent_flags_left_recursion() {
        let grammar = GrammarModel::parse("E -> E '+' T | T\nT -> id").unwrap();
        let result = analyze_recursive_descent(&grammar);
        assert!(!result.is_suitable());
    }

    #[test]
    fn test_analyze_ll1_clean_grammar() {
        let grammar = GrammarModel::parse("S -> A B\nA -> a | epsilon\nB -> b").unwrap();
        let result = analyze_ll1(&grammar);
        assert!(result.is_ll1());
    }

    #[test]
    fn test_analyze_lr0_accepts_ambiguous_grammar_as_data_not_error() {
        let grammar = GrammarModel::parse("S -> A\nS -> B\nA -> a\nB -> a").unwrap();
        let result = analyze_lr0(&grammar);
        assert!(!result.is_lr0());
        assert!(!result.conflicts.is_empty());
    }

    #[test]
    fn test_analyze_lalr_clean_expression_grammar() {
        let text = "E -> E '+' T | T\nT -> T '*' F | F\nF -> id";
        let grammar = GrammarModel::parse(text).unwrap();
        let result = analyze_lalr(&grammar);
        assert!(result.is_lalr1());
        assert!(result.merger.states.len() <= result.lr1_state_count);
    }
}
