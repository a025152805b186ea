//! Typed representation of a context-free grammar.
//!
//! [`GrammarModel`] is built once (by [`crate::parser::GrammarParser`]) and
//! is immutable thereafter; every other module in the crate borrows it.

use crate::error::GrammarSyntaxError;
use crate::symbol::{symbols_to_string, Symbol};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::rc::Rc;

/// A production rule in a context-free grammar: `lhs → rhs`.
///
/// `number` is this production's position in the crate's global numbering
/// (production 0 is always the augmented `S′ → S`; see
/// [`GrammarModel::augmented_production`]). An empty body is represented as
/// `rhs == [Symbol::Epsilon]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Production {
    pub number: usize,
    pub lhs: Symbol,
    pub rhs: Vec<Symbol>,
}

impl Production {
    pub fn new(number: usize, lhs: Symbol, rhs: Vec<Symbol>) -> Self {
        Self { number, lhs, rhs }
    }

    /// True for a production whose body is the empty string.
    pub fn is_epsilon(&self) -> bool {
        self.rhs == [Symbol::Epsilon]
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.lhs, symbols_to_string(&self.rhs))
    }
}

/// A context-free grammar: productions plus the terminal/non-terminal
/// partition, the start symbol, and the fresh augmented start.
#[derive(Debug, Clone)]
pub struct GrammarModel {
    /// All productions, indexed by production number (0 = augmented start).
    productions: Vec<Production>,
    non_terminals: BTreeSet<Symbol>,
    terminals: BTreeSet<Symbol>,
    start_symbol: Symbol,
    augmented_start: Symbol,
    by_lhs: HashMap<Symbol, Vec<usize>>,
}

impl GrammarModel {
    /// Builds a grammar model from raw `(lhs, rhs)` pairs in source order.
    ///
    /// `raw` must already have every lhs classified as [`Symbol::NonTerminal`]
    /// by the caller (the parser); this constructor performs the remaining
    /// invariants from the data model: terminal/non-terminal classification,
    /// the fresh augmented start, and the production numbering contract
    /// (production 0 is `S′ → S`; the rest are numbered by iterating
    /// non-terminals in lexicographic order, in source order within a
    /// non-terminal).
    pub(crate) fn build(
        start_symbol: Symbol,
        raw: Vec<(Symbol, Vec<Symbol>)>,
    ) -> Result<Self, GrammarSyntaxError> {
        if raw.is_empty() {
            return Err(GrammarSyntaxError::EmptyGrammar);
        }

        let mut groups: HashMap<Symbol, Vec<Vec<Symbol>>> = HashMap::new();
        let mut non_terminals: BTreeSet<Symbol> = BTreeSet::new();
        for (lhs, _) in &raw {
            non_terminals.insert(lhs.clone());
        }
        for (lhs, rhs) in raw {
            groups.entry(lhs).or_default().push(rhs);
        }

        let mut terminals: BTreeSet<Symbol> = BTreeSet::new();
        for rhs_alts in groups.values() {
            for rhs in rhs_alts {
                for sym in rhs {
                    if sym.is_epsilon() || sym.is_end_marker() {
                        continue;
                    }
                    if !non_terminals.contains(sym) {
                        terminals.insert(sym.clone());
                    }
                }
            }
        }

        for sym in non_terminals.iter().chain(terminals.iter()) {
            if let Some(name) = sym.name() {
                if name == "$" || name == "ε" || name == "epsilon" {
                    return Err(GrammarSyntaxError::ReservedSentinelCollision(
                        name.to_string(),
                    ));
                }
            }
        }

        let augmented_start = fresh_augmented_start(&start_symbol, &non_terminals);

        let mut productions = Vec::new();
        productions.push(Production::new(
            0,
            augmented_start.clone(),
            vec![start_symbol.clone()],
        ));

        let mut sorted_nts: Vec<&Symbol> = non_terminals.iter().collect();
        sorted_nts.sort_by(|a, b| a.name().cmp(&b.name()));

        for nt in sorted_nts {
            if let Some(alts) = groups.get(nt) {
                for rhs in alts {
                    let number = productions.len();
                    productions.push(Production::new(number, nt.clone(), rhs.clone()));
                }
            }
        }

        let mut by_lhs: HashMap<Symbol, Vec<usize>> = HashMap::new();
        for prod in &productions {
            by_lhs.entry(prod.lhs.clone()).or_default().push(prod.number);
        }

        non_terminals.insert(augmented_start.clone());

        Ok(Self {
            productions,
            non_terminals,
            terminals,
            start_symbol,
            augmented_start,
            by_lhs,
        })
    }

    /// All productions, ordered by production number (0 = augmented start).
    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    /// Every production except the synthetic augmented start.
    pub fn original_productions(&self) -> &[Production] {
        &self.productions[1..]
    }

    /// The augmented production `S′ → S` (always production 0).
    pub fn augmented_production(&self) -> &Production {
        &self.productions[0]
    }

    pub fn production(&self, number: usize) -> Option<&Production> {
        self.productions.get(number)
    }

    /// Productions for a given non-terminal, in the grammar's numbering
    /// order. Includes the augmented production when `nt` is the augmented
    /// start.
    pub fn productions_of(&self, nt: &Symbol) -> Vec<&Production> {
        self.by_lhs
            .get(nt)
            .map(|nums| nums.iter().map(|&n| &self.productions[n]).collect())
            .unwrap_or_default()
    }

    pub fn non_terminals(&self) -> &BTreeSet<Symbol> {
        &self.non_terminals
    }

    pub fn terminals(&self) -> &BTreeSet<Symbol> {
        &self.terminals
    }

    pub fn start_symbol(&self) -> &Symbol {
        &self.start_symbol
    }

    pub fn augmented_start(&self) -> &Symbol {
        &self.augmented_start
    }

    /// True if `sym` is a known non-terminal of this grammar (the
    /// augmented start included).
    pub fn is_known_non_terminal(&self, sym: &Symbol) -> bool {
        self.non_terminals.contains(sym)
    }
}

impl fmt::Display for GrammarModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for prod in self.original_productions() {
            writeln!(f, "{}", prod)?;
        }
        Ok(())
    }
}

/// Picks a non-terminal name distinct from every existing one, per the
/// "fresh" invariant on `augmented_start`.
fn fresh_augmented_start(start_symbol: &Symbol, non_terminals: &BTreeSet<Symbol>) -> Symbol {
    let base = start_symbol.name().unwrap_or("S");
    let mut candidate: Rc<str> = format!("{base}'").into();
    while non_terminals.contains(&Symbol::NonTerminal(candidate.clone())) {
        candidate = format!("{candidate}'").into();
    }
    Symbol::NonTerminal(candidate)
}
