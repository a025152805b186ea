//! FIRST, FOLLOW, and nullability fixpoints.
//!
//! [`SetComputer`] computes all three once, eagerly, at construction time;
//! every other analyzer in the crate borrows its results rather than
//! recomputing them.

use crate::grammar::GrammarModel;
use crate::symbol::Symbol;
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// Computed nullability, FIRST, and FOLLOW sets for a grammar.
pub struct SetComputer<'g> {
    grammar: &'g GrammarModel,
    nullable: HashSet<Symbol>,
    first: HashMap<Symbol, HashSet<Symbol>>,
    follow: HashMap<Symbol, HashSet<Symbol>>,
}

impl<'g> SetComputer<'g> {
    pub fn new(grammar: &'g GrammarModel) -> Self {
        let nullable = compute_nullable(grammar);
        let first = compute_first(grammar, &nullable);
        let follow = compute_follow(grammar, &nullable, &first);
        Self {
            grammar,
            nullable,
            first,
            follow,
        }
    }

    pub fn is_nullable(&self, sym: &Symbol) -> bool {
        match sym {
            Symbol::Epsilon => true,
            Symbol::Terminal(_) | Symbol::EndMarker => false,
            Symbol::NonTerminal(_) => self.nullable.contains(sym),
        }
    }

    /// FIRST(sym): for a terminal, `{sym}`; for epsilon, `{ε}`; for a
    /// non-terminal, the precomputed fixpoint set.
    pub fn first(&self, sym: &Symbol) -> HashSet<Symbol> {
        match sym {
            Symbol::Terminal(_) => {
                let mut s = HashSet::new();
                s.insert(sym.clone());
                s
            }
            Symbol::Epsilon => {
                let mut s = HashSet::new();
                s.insert(Symbol::Epsilon);
                s
            }
            Symbol::EndMarker => {
                let mut s = HashSet::new();
                s.insert(Symbol::EndMarker);
                s
            }
            Symbol::NonTerminal(_) => self.first.get(sym).cloned().unwrap_or_default(),
        }
    }

    /// FOLLOW(nt). Empty for a symbol with no recorded follow set (e.g. a
    /// non-terminal the grammar never actually produces from).
    pub fn follow(&self, nt: &Symbol) -> HashSet<Symbol> {
        self.follow.get(nt).cloned().unwrap_or_default()
    }

    /// FIRST(β) for a symbol string: the union of FIRST(Xi) for the
    /// leading run of nullable symbols, plus FIRST of the first
    /// non-nullable symbol encountered; ε is included only if every symbol
    /// in `symbols` is nullable.
    pub fn first_of_string(&self, symbols: &[Symbol]) -> HashSet<Symbol> {
        let mut result = HashSet::new();
        let mut all_nullable = true;
        for sym in symbols {
            let f = self.first(sym);
            result.extend(f.iter().filter(|s| !s.is_epsilon()).cloned());
            if !self.is_nullable(sym) {
                all_nullable = false;
                break;
            }
        }
        if all_nullable {
            result.insert(Symbol::Epsilon);
        }
        result
    }

    pub fn grammar(&self) -> &'g GrammarModel {
        self.grammar
    }

    /// The full FIRST-set table, one entry per non-terminal.
    pub fn first_sets(&self) -> HashMap<Symbol, HashSet<Symbol>> {
        self.first.clone()
    }

    /// The full FOLLOW-set table, one entry per non-terminal.
    pub fn follow_sets(&self) -> HashMap<Symbol, HashSet<Symbol>> {
        self.follow.clone()
    }
}

fn compute_nullable(grammar: &GrammarModel) -> HashSet<Symbol> {
    let mut nullable = HashSet::new();
    let mut changed = true;
    let mut rounds = 0;
    while changed {
        changed = false;
        rounds += 1;
        for prod in grammar.productions() {
            if nullable.contains(&prod.lhs) {
                continue;
            }
            let body_nullable = prod.is_epsilon()
                || prod.rhs.iter().all(|s| match s {
                    Symbol::NonTerminal(_) => nullable.contains(s),
                    Symbol::Epsilon => true,
                    _ => false,
                });
            if body_nullable {
                nullable.insert(prod.lhs.clone());
                changed = true;
            }
        }
    }
    debug!(rounds, count = nullable.len(), "computed nullable set");
    nullable
}

fn compute_first(
    grammar: &GrammarModel,
    nullable: &HashSet<Symbol>,
) -> HashMap<Symbol, HashSet<Symbol>> {
    let mut first: HashMap<Symbol, HashSet<Symbol>> = HashMap::new();
    for nt in grammar.non_terminals() {
        first.entry(nt.clone()).or_default();
    }

    let is_nullable = |s: &Symbol| match s {
        Symbol::Epsilon => true,
        Symbol::Terminal(_) | Symbol::EndMarker => false,
        Symbol::NonTerminal(_) => nullable.contains(s),
    };

    let mut changed = true;
    let mut rounds = 0;
    while changed {
        changed = false;
        rounds += 1;
        for prod in grammar.productions() {
            let mut addition: HashSet<Symbol> = HashSet::new();
            let mut all_nullable_so_far = true;
            for sym in &prod.rhs {
                match sym {
                    Symbol::Terminal(_) | Symbol::EndMarker => {
                        addition.insert(sym.clone());
                        all_nullable_so_far = false;
                        break;
                    }
                    Symbol::Epsilon => break,
                    Symbol::NonTerminal(_) => {
                        if let Some(f) = first.get(sym) {
                            addition.extend(f.iter().filter(|s| !s.is_epsilon()).cloned());
                        }
                        if !is_nullable(sym) {
                            all_nullable_so_far = false;
                            break;
                        }
                    }
                }
            }
            if all_nullable_so_far {
                addition.insert(Symbol::Epsilon);
            }
            let entry = first.entry(prod.lhs.clone()).or_default();
            let before = entry.len();
            entry.extend(addition);
            if entry.len() != before {
                changed = true;
            }
        }
        trace!(rounds, "FIRST fixpoint iteration");
    }
    debug!(rounds, "computed FIRST sets");
    first
}

fn compute_follow(
    grammar: &GrammarModel,
    nullable: &HashSet<Symbol>,
    first: &HashMap<Symbol, HashSet<Symbol>>,
) -> HashMap<Symbol, HashSet<Symbol>> {
    let is_nullable = |s: &Symbol| match s {
        Symbol::Epsilon => true,
        Symbol::Terminal(_) | Symbol::EndMarker => false,
        Symbol::NonTerminal(_) => nullable.contains(s),
    };
    let first_of = |s: &Symbol| -> HashSet<Symbol> {
        match s {
            Symbol::Terminal(_) => {
                let mut r = HashSet::new();
                r.insert(s.clone());
                r
            }
            Symbol::Epsilon => {
                let mut r = HashSet::new();
                r.insert(Symbol::Epsilon);
                r
            }
            Symbol::EndMarker => {
                let mut r = HashSet::new();
                r.insert(Symbol::EndMarker);
                r
            }
            Symbol::NonTerminal(_) => first.get(s).cloned().unwrap_or_default(),
        }
    };
    let first_of_string = |symbols: &[Symbol]| -> HashSet<Symbol> {
        let mut result = HashSet::new();
        let mut all_nullable = true;
        for sym in symbols {
            let f = first_of(sym);
            result.extend(f.into_iter().filter(|s| !s.is_epsilon()));
            if !is_nullable(sym) {
                all_nullable = false;
                break;
            }
        }
        if all_nullable {
            result.insert(Symbol::Epsilon);
        }
        result
    };

    let mut follow: HashMap<Symbol, HashSet<Symbol>> = HashMap::new();
    for nt in grammar.non_terminals() {
        follow.entry(nt.clone()).or_default();
    }
    follow
        .entry(grammar.augmented_start().clone())
        .or_default()
        .insert(Symbol::EndMarker);

    let mut changed = true;
    let mut rounds = 0;
    while changed {
        changed = false;
        rounds += 1;
        for prod in grammar.productions() {
            for (i, sym) in prod.rhs.iter().enumerate() {
                if !sym.is_non_terminal() {
                    continue;
                }
                let rest = &prod.rhs[i + 1..];
                let rest_first = first_of_string(rest);
                let mut addition: HashSet<Symbol> =
                    rest_first.iter().filter(|s| !s.is_epsilon()).cloned().collect();
                if rest.is_empty() || rest_first.contains(&Symbol::Epsilon) {
                    if let Some(lhs_follow) = follow.get(&prod.lhs) {
                        addition.extend(lhs_follow.iter().cloned());
                    }
                }
                let entry = follow.entry(sym.clone()).or_default();
                let before = entry.len();
                entry.extend(addition);
                if entry.len() != before {
                    changed = true;
                }
            }
        }
        trace!(rounds, "FOLLOW fixpoint iteration");
    }
    debug!(rounds, "computed FOLLOW sets");
    follow
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::Symbol;

    fn nt(s: &str) -> Symbol {
        Symbol::non_terminal(s)
    }
    fn t(s: &str) -> Symbol {
        Symbol::terminal(s)
    }

    #[test]
    fn test_nullable_direct_epsilon() {
        let grammar = GrammarModel::parse("S -> A\nA -> a | epsilon").unwrap();
        let sets = SetComputer::new(&grammar);
        assert!(sets.is_nullable(&nt("A")));
        assert!(!sets.is_nullable(&nt("S")));
    }

    #[test]
    fn test_first_of_terminal_is_itself() {
        let grammar = GrammarModel::parse("S -> a").unwrap();
        let sets = SetComputer::new(&grammar);
        assert_eq!(sets.first(&t("a")), [t("a")].into_iter().collect());
    }

    #[test]
    fn test_first_propagates_through_nullable_prefix() {
        // S -> A b ; A -> epsilon   =>  FIRST(S) = {b}
        let grammar = GrammarModel::parse("S -> A b\nA -> epsilon").unwrap();
        let sets = SetComputer::new(&grammar);
        assert_eq!(sets.first(&nt("S")), [t("b")].into_iter().collect());
    }

    #[test]
    fn test_follow_of_start_symbol_has_end_marker() {
        let grammar = GrammarModel::parse("S -> a").unwrap();
        let sets = SetComputer::new(&grammar);
        assert!(sets.follow(grammar.start_symbol()).contains(&Symbol::EndMarker));
    }

    #[test]
    fn test_classic_expression_grammar_first_follow() {
        let text = "E -> T Ep\nEp -> '+' T Ep | epsilon\nT -> id";
        let grammar = GrammarModel::parse(text).unwrap();
        let sets = SetComputer::new(&grammar);
        assert_eq!(sets.first(&nt("T")), [t("id")].into_iter().collect());
        assert_eq!(sets.first(&nt("E")), [t("id")].into_iter().collect());
        let follow_ep: HashSet<Symbol> = sets.follow(&nt("Ep"));
        assert!(follow_ep.contains(&Symbol::EndMarker));
    }

    #[test]
    fn test_first_of_string_all_nullable_includes_epsilon() {
        let grammar = GrammarModel::parse("S -> A B\nA -> epsilon\nB -> epsilon").unwrap();
        let sets = SetComputer::new(&grammar);
        let s = sets.first_of_string(&[nt("A"), nt("B")]);
        assert!(s.contains(&Symbol::Epsilon));
    }
}
