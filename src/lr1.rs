//! Canonical LR(1) item-set automaton construction.
//!
//! Built the same way as [`crate::lr0`]'s canonical collection, but each
//! item carries a lookahead terminal and closure propagates lookaheads via
//! FIRST(βa). This collection exists to be merged by core into LALR(1)
//! states in [`crate::lalr`]; canonical LR(1) tables themselves are out of
//! scope.

use crate::grammar::GrammarModel;
use crate::sets::SetComputer;
use crate::symbol::Symbol;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// An LR(1) item: an LR(0) item plus one lookahead terminal (or `$`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Lr1Item {
    pub production: usize,
    pub dot: usize,
    pub lookahead: Symbol,
}

impl Lr1Item {
    /// The LR(0) core of this item: `(production, dot)`, ignoring lookahead.
    pub fn core(&self) -> (usize, usize) {
        (self.production, self.dot)
    }
}

pub type Lr1ItemSet = BTreeSet<Lr1Item>;

pub struct LR1Automaton {
    pub states: Vec<Lr1ItemSet>,
    pub transitions: HashMap<(usize, Symbol), usize>,
}

impl LR1Automaton {
    pub fn build(grammar: &GrammarModel, sets: &SetComputer) -> Self {
        let start_item = Lr1Item {
            production: 0,
            dot: 0,
            lookahead: Symbol::EndMarker,
        };
        let mut states: Vec<Lr1ItemSet> =
            vec![closure([start_item].into_iter().collect(), grammar, sets)];
        let mut transitions: HashMap<(usize, Symbol), usize> = HashMap::new();
        let mut worklist = vec![0usize];

        while let Some(state_idx) = worklist.pop() {
            let symbols = outgoing_symbols(&states[state_idx], grammar);
            for symbol in symbols {
                let target = goto(&states[state_idx], &symbol, grammar, sets);
                if target.is_empty() {
                    continue;
                }
                let existing = states.iter().position(|s| *s == target);
                let target_idx = match existing {
                    Some(idx) => idx,
                    None => {
                        states.push(target);
                        let idx = states.len() - 1;
                        worklist.push(idx);
                        idx
                    }
                };
                transitions.insert((state_idx, symbol), target_idx);
            }
        }

        debug!(states = states.len(), "built LR(1) canonical collection");
        Self {
            states,
            transitions,
        }
    }
}

fn symbol_after_dot(item: &Lr1Item, grammar: &GrammarModel) -> Option<Symbol> {
    let prod = grammar.production(item.production)?;
    if prod.is_epsilon() {
        return None;
    }
    prod.rhs.get(item.dot).cloned()
}

pub(crate) fn closure(
    mut items: Lr1ItemSet,
    grammar: &GrammarModel,
    sets: &SetComputer,
) -> Lr1ItemSet {
    let mut changed = true;
    while changed {
        changed = false;
        let snapshot: Vec<Lr1Item> = items.iter().cloned().collect();
        for item in snapshot {
            let Some(prod) = grammar.production(item.production) else {
                continue;
            };
            if prod.is_epsilon() {
                continue;
            }
            let Some(next) = prod.rhs.get(item.dot) else {
                continue;
            };
            if !next.is_non_terminal() {
                continue;
            }
            let beta = &prod.rhs[item.dot + 1..];
            let mut lookaheads: Vec<Symbol> = Vec::new();
            let mut beta_and_lookahead = beta.to_vec();
            beta_and_lookahead.push(item.lookahead.clone());
            let first_set = sets.first_of_string(&beta_and_lookahead);
            lookaheads.extend(first_set.into_iter().filter(|s| !s.is_epsilon()));

            for b_prod in grammar.productions_of(next) {
                for lookahead in &lookaheads {
                    let new_item = Lr1Item {
                        production: b_prod.number,
                        dot: 0,
                        lookahead: lookahead.clone(),
                    };
                    if items.insert(new_item) {
                        changed = true;
                    }
                }
            }
        }
    }
    items
}

pub(crate) fn goto(
    items: &Lr1ItemSet,
    symbol: &Symbol,
    grammar: &GrammarModel,
    sets: &SetComputer,
) -> Lr1ItemSet {
    let advanced: Lr1ItemSet = items
        .iter()
        .filter(|item| symbol_after_dot(item, grammar).as_ref() == Some(symbol))
        .map(|item| Lr1Item {
            production: item.production,
            dot: item.dot + 1,
            lookahead: item.lookahead.clone(),
        })
        .collect();
    closure(advanced, grammar, sets)
}

fn outgoing_symbols(items: &Lr1ItemSet, grammar: &GrammarModel) -> Vec<Symbol> {
    let mut symbols: BTreeSet<Symbol> = BTreeSet::new();
    for item in items {
        if let Some(sym) = symbol_after_dot(item, grammar) {
            symbols.insert(sym);
        }
    }
    symbols.into_iter().collect()
}
