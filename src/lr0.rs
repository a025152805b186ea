//! Canonical LR(0) item-set automaton construction.
//!
//! Pure LR(0) has no lookahead: a state conflicts if it holds more than one
//! complete item (reduce/reduce) or a complete item alongside any shift
//! action (shift/reduce), independent of what the next input symbol is.
//! Conflicts reported here therefore use [`crate::symbol::Symbol::EndMarker`]
//! as the `terminal` field of a
//! [`crate::conflict::ConflictEntry`] — a placeholder meaning "regardless
//! of lookahead", not an actual end-of-input condition. [`crate::lalr`]
//! reports the real per-terminal conflicts once lookaheads are known.

use crate::conflict::{ConflictCatalog, ConflictEntry};
use crate::grammar::GrammarModel;
use crate::symbol::Symbol;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// An LR(0) item: production `number`, dot before `dot` (0-indexed into the
/// production's rhs; `dot == rhs.len()` means the item is complete).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Item {
    pub production: usize,
    pub dot: usize,
}

pub type ItemSet = BTreeSet<Item>;

/// The canonical collection of LR(0) states plus their transitions.
pub struct LR0Automaton {
    pub states: Vec<ItemSet>,
    pub transitions: HashMap<(usize, Symbol), usize>,
}

impl LR0Automaton {
    /// Builds the canonical LR(0) collection by worklist from the closure
    /// of the augmented start item, appending any shift/reduce or
    /// reduce/reduce conflicts found to `catalog`.
    pub fn build(grammar: &GrammarModel, catalog: &mut ConflictCatalog) -> Self {
        let start_item = Item {
            production: 0,
            dot: 0,
        };
        let mut states: Vec<ItemSet> = vec![closure(
            [start_item].into_iter().collect(),
            grammar,
        )];
        let mut transitions: HashMap<(usize, Symbol), usize> = HashMap::new();
        let mut worklist = vec![0usize];

        while let Some(state_idx) = worklist.pop() {
            let symbols = outgoing_symbols(&states[state_idx], grammar);
            for symbol in symbols {
                let target = goto(&states[state_idx], &symbol, grammar);
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

        debug!(states = states.len(), "built LR(0) canonical collection");

        let automaton = Self {
            states,
            transitions,
        };
        automaton.detect_conflicts(grammar, catalog);
        automaton
    }

    fn detect_conflicts(&self, grammar: &GrammarModel, catalog: &mut ConflictCatalog) {
        for (state_idx, state) in self.states.iter().enumerate() {
            // production 0 is the augmented S' -> S item; complete, it's accept, never reduce.
            let complete: Vec<usize> = state
                .iter()
                .filter(|item| is_complete(item, grammar) && item.production != 0)
                .map(|item| item.production)
                .collect();

            for pair in 0..complete.len() {
                for other in (pair + 1)..complete.len() {
                    catalog.push(ConflictEntry::ReduceReduce {
                        state: state_idx,
                        terminal: Symbol::EndMarker,
                        productions: (complete[pair], complete[other]),
                    });
                }
            }

            if !complete.is_empty() {
                let shift_terminals: BTreeSet<&Symbol> = self
                    .transitions
                    .keys()
                    .filter(|(s, _)| *s == state_idx)
                    .map(|(_, sym)| sym)
                    .filter(|sym| sym.is_terminal())
                    .collect();
                for terminal in shift_terminals {
                    for &production in &complete {
                        catalog.push(ConflictEntry::ShiftReduce {
                            state: state_idx,
                            terminal: terminal.clone(),
                            production,
                        });
                    }
                }
            }
        }
    }
}

fn is_complete(item: &Item, grammar: &GrammarModel) -> bool {
    let prod = grammar
        .production(item.production)
        .expect("item references a valid production number");
    prod.is_epsilon() || item.dot >= prod.rhs.len()
}

/// The symbol immediately after the dot, or `None` if the item is complete.
fn symbol_after_dot(item: &Item, grammar: &GrammarModel) -> Option<Symbol> {
    let prod = grammar.production(item.production)?;
    if prod.is_epsilon() {
        return None;
    }
    prod.rhs.get(item.dot).cloned()
}

/// Closes an item set under non-terminal expansion: for each item with the
/// dot before non-terminal `B`, adds `B → • γ` for every production of `B`.
pub(crate) fn closure(mut items: ItemSet, grammar: &GrammarModel) -> ItemSet {
    let mut changed = true;
    while changed {
        changed = false;
        let snapshot: Vec<Item> = items.iter().cloned().collect();
        for item in snapshot {
            if let Some(Symbol::NonTerminal(_)) = symbol_after_dot(&item, grammar) {
                let next = symbol_after_dot(&item, grammar).unwrap();
                for prod in grammar.productions_of(&next) {
                    let new_item = Item {
                        production: prod.number,
                        dot: 0,
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

/// GOTO(I, X): advance the dot past `symbol` in every item of `I` that has
/// `symbol` immediately after its dot, then close the result.
pub(crate) fn goto(items: &ItemSet, symbol: &Symbol, grammar: &GrammarModel) -> ItemSet {
    let advanced: ItemSet = items
        .iter()
        .filter(|item| symbol_after_dot(item, grammar).as_ref() == Some(symbol))
        .map(|item| Item {
            production: item.production,
            dot: item.dot + 1,
        })
        .collect();
    closure(advanced, grammar)
}

fn outgoing_symbols(items: &ItemSet, grammar: &GrammarModel) -> Vec<Symbol> {
    let mut symbols: BTreeSet<Symbol> = BTreeSet::new();
    for item in items {
        if let Some(sym) = symbol_after_dot(item, grammar) {
            symbols.insert(sym);
        }
    }
    symbols.into_iter().collect()
}
