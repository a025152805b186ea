//! LALR(1) state merging and ACTION/GOTO table construction.
//!
//! Starts from the canonical LR(1) collection ([`crate::lr1`]), merges
//! states that share the same LR(0) core (ignoring lookahead), and unions
//! each merged item's lookaheads. Merging states can only ever introduce
//! reduce/reduce conflicts that canonical LR(1) would not have had; it
//! never introduces new shift/reduce conflicts.

use crate::conflict::{ConflictCatalog, ConflictEntry};
use crate::grammar::GrammarModel;
use crate::lr1::{Lr1Item, LR1Automaton};
use crate::sets::SetComputer;
use crate::symbol::Symbol;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

pub type Core = BTreeSet<(usize, usize)>;

/// One LALR(1) state: its LR(0) core, the union of lookaheads recorded for
/// each item in that core, and which canonical LR(1) states merged into it.
#[derive(Debug, Clone)]
pub struct LalrState {
    pub core: Core,
    pub lookaheads: BTreeMap<(usize, usize), BTreeSet<Symbol>>,
    pub merged_from: Vec<usize>,
}

/// An ACTION table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Shift(usize),
    Reduce(usize),
    Accept,
}

/// The merged LALR(1) automaton and its parsing tables.
pub struct LALRMerger {
    pub states: Vec<LalrState>,
    pub transitions: HashMap<(usize, Symbol), usize>,
    pub action: HashMap<(usize, Symbol), Action>,
    pub goto: HashMap<(usize, Symbol), usize>,
}

impl LALRMerger {
    /// Builds the LR(1) collection, merges it into LALR(1) states, and
    /// constructs ACTION/GOTO, appending any conflicts to `catalog`.
    pub fn build(grammar: &GrammarModel, sets: &SetComputer, catalog: &mut ConflictCatalog) -> Self {
        let lr1 = LR1Automaton::build(grammar, sets);
        Self::from_lr1(grammar, &lr1, catalog)
    }

    /// The number of states in the canonical LR(1) collection this merger
    /// started from, for reporting how much merging reduced the automaton.
    pub fn lr1_state_count(grammar: &GrammarModel, sets: &SetComputer) -> usize {
        LR1Automaton::build(grammar, sets).states.len()
    }

    fn from_lr1(grammar: &GrammarModel, lr1: &LR1Automaton, catalog: &mut ConflictCatalog) -> Self {
        let core_of = |items: &crate::lr1::Lr1ItemSet| -> Core {
            items.iter().map(Lr1Item::core).collect()
        };

        let mut core_to_new_idx: HashMap<Core, usize> = HashMap::new();
        let mut old_to_new: Vec<usize> = Vec::with_capacity(lr1.states.len());
        let mut states: Vec<LalrState> = Vec::new();

        for (old_idx, item_set) in lr1.states.iter().enumerate() {
            let core = core_of(item_set);
            let new_idx = *core_to_new_idx.entry(core.clone()).or_insert_with(|| {
                states.push(LalrState {
                    core: core.clone(),
                    lookaheads: BTreeMap::new(),
                    merged_from: Vec::new(),
                });
                states.len() - 1
            });
            old_to_new.push(new_idx);
            let state = &mut states[new_idx];
            state.merged_from.push(old_idx);
            for item in item_set {
                state
                    .lookaheads
                    .entry(item.core())
                    .or_default()
                    .insert(item.lookahead.clone());
            }
        }

        let mut transitions: HashMap<(usize, Symbol), usize> = HashMap::new();
        for (&(old_state, ref symbol), &old_target) in &lr1.transitions {
            let new_state = old_to_new[old_state];
            let new_target = old_to_new[old_target];
            transitions.insert((new_state, symbol.clone()), new_target);
        }

        debug!(
            lr1_states = lr1.states.len(),
            lalr_states = states.len(),
            "merged LR(1) states into LALR(1)"
        );

        let merger = Self {
            states,
            transitions,
            action: HashMap::new(),
            goto: HashMap::new(),
        };
        merger.build_tables(grammar, catalog)
    }

    fn build_tables(mut self, grammar: &GrammarModel, catalog: &mut ConflictCatalog) -> Self {
        let mut action: HashMap<(usize, Symbol), Action> = HashMap::new();
        let mut goto: HashMap<(usize, Symbol), usize> = HashMap::new();

        for (&(state, ref symbol), &target) in &self.transitions {
            if symbol.is_terminal() || symbol.is_end_marker() {
                action.insert((state, symbol.clone()), Action::Shift(target));
            } else if symbol.is_non_terminal() {
                goto.insert((state, symbol.clone()), target);
            }
        }

        for (state_idx, state) in self.states.iter().enumerate() {
            for (&(production, dot), lookaheads) in &state.lookaheads {
                let prod = grammar
                    .production(production)
                    .expect("item references a valid production number");
                let complete = prod.is_epsilon() || dot >= prod.rhs.len();
                if !complete {
                    continue;
                }
                for terminal in lookaheads {
                    if production == 0 && *terminal == Symbol::EndMarker {
                        action.insert((state_idx, terminal.clone()), Action::Accept);
                        continue;
                    }
                    match action.get(&(state_idx, terminal.clone())) {
                        None => {
                            action.insert((state_idx, terminal.clone()), Action::Reduce(production));
                        }
                        Some(Action::Shift(_)) => {
                            catalog.push(ConflictEntry::ShiftReduce {
                                state: state_idx,
                                terminal: terminal.clone(),
                                production,
                            });
                        }
                        Some(Action::Reduce(existing)) if *existing != production => {
                            catalog.push(ConflictEntry::ReduceReduce {
                                state: state_idx,
                                terminal: terminal.clone(),
                                productions: (*existing, production),
                            });
                        }
                        Some(Action::Reduce(_)) | Some(Action::Accept) => {}
                    }
                }
            }
        }

        self.action = action;
        self.goto = goto;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflict::ConflictCatalog;

    #[test]
    fn test_lalr_merges_states_with_same_core() {
        let grammar = GrammarModel::parse("S -> A B\nA -> a\nB -> a").unwrap();
        let sets = SetComputer::new(&grammar);
        let mut catalog = ConflictCatalog::new();
        let lr1_count = LALRMerger::lr1_state_count(&grammar, &sets);
        let merger = LALRMerger::build(&grammar, &sets, &mut catalog);
        assert!(merger.states.len() <= lr1_count);
    }

    #[test]
    fn test_lalr_accept_action_present() {
        let grammar = GrammarModel::parse("S -> a").unwrap();
        let sets = SetComputer::new(&grammar);
        let mut catalog = ConflictCatalog::new();
        let merger = LALRMerger::build(&grammar, &sets, &mut catalog);
        assert!(merger
            .action
            .values()
            .any(|a| matches!(a, Action::Accept)));
    }

    #[test]
    fn test_lalr_no_conflicts_for_clean_expression_grammar() {
        let text = "E -> E '+' T | T\nT -> T '*' F | F\nF -> id";
        let grammar = GrammarModel::parse(text).unwrap();
        let sets = SetComputer::new(&grammar);
        let mut catalog = ConflictCatalog::new();
        let _merger = LALRMerger::build(&grammar, &sets, &mut catalog);
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_lalr_reduce_reduce_conflict_detected() {
        let grammar = GrammarModel::parse("S -> A\nS -> B\nA -> a\nB -> a").unwrap();
        let sets = SetComputer::new(&grammar);
        let mut catalog = ConflictCatalog::new();
        let _merger = LALRMerger::build(&grammar, &sets, &mut catalog);
        assert!(catalog
            .entries()
            .iter()
            .any(|e| matches!(e, ConflictEntry::ReduceReduce { .. })));
    }
}
