//! LL(1) parse table construction and suitability diagnostics.
//!
//! Conflicting table cells are recorded in a [`crate::conflict::ConflictCatalog`]
//! as [`crate::conflict::ConflictEntry::Ll1FirstFirst`] or
//! `Ll1FirstFollow` entries rather than rejected: building the table never
//! fails, it just may not be LL(1).

use crate::conflict::{ConflictCatalog, ConflictEntry};
use crate::grammar::GrammarModel;
use crate::sets::SetComputer;
use crate::symbol::Symbol;
use std::collections::HashMap;

/// `M[nt, terminal] = [production numbers]`. An LL(1) grammar has at most
/// one entry per cell; more than one is how a conflict shows up in the
/// table itself.
pub type Ll1Table = HashMap<(Symbol, Symbol), Vec<usize>>;

/// Builds the LL(1) predictive parse table for a grammar.
pub struct LL1TableBuilder<'g> {
    grammar: &'g GrammarModel,
    sets: &'g SetComputer<'g>,
}

impl<'g> LL1TableBuilder<'g> {
    pub fn new(grammar: &'g GrammarModel, sets: &'g SetComputer<'g>) -> Self {
        Self { grammar, sets }
    }

    /// Builds the table, appending any FIRST/FIRST or FIRST/FOLLOW
    /// conflicts it finds to `catalog`.
    ///
    /// For each production `A → α`:
    /// 1. For each terminal `a` in FIRST(α), add `A → α` to `M[A, a]`.
    /// 2. If `ε ∈ FIRST(α)`, for each `b` in FOLLOW(A) (including `$`), add
    ///    `A → α` to `M[A, b]`.
    ///
    /// A cell receiving more than one production is a conflict: if both
    /// productions reached the cell in step 1, it is a FIRST/FIRST
    /// conflict; if one of them reached it only via step 2, it is a
    /// FIRST/FOLLOW conflict.
    pub fn build(&self, catalog: &mut ConflictCatalog) -> Ll1Table {
        let mut table: Ll1Table = HashMap::new();
        let mut via_follow: std::collections::HashSet<(Symbol, Symbol, usize)> =
            std::collections::HashSet::new();

        for prod in self.grammar.productions() {
            let first_alpha = self.sets.first_of_string(&prod.rhs);

            for terminal in first_alpha.iter().filter(|s| !s.is_epsilon()) {
                self.insert_and_detect(
                    &mut table,
                    prod.lhs.clone(),
                    terminal.clone(),
                    prod.number,
                    false,
                    &via_follow,
                    catalog,
                );
            }

            if first_alpha.contains(&Symbol::Epsilon) {
                let follow_lhs = self.sets.follow(&prod.lhs);
                for terminal in &follow_lhs {
                    via_follow.insert((prod.lhs.clone(), terminal.clone(), prod.number));
                    self.insert_and_detect(
                        &mut table,
                        prod.lhs.clone(),
                        terminal.clone(),
                        prod.number,
                        true,
                        &via_follow,
                        catalog,
                    );
                }
            }
        }

        table
    }

    #[allow(clippy::too_many_arguments)]
    fn insert_and_detect(
        &self,
        table: &mut Ll1Table,
        nt: Symbol,
        terminal: Symbol,
        production: usize,
        reached_via_follow: bool,
        via_follow: &std::collections::HashSet<(Symbol, Symbol, usize)>,
        catalog: &mut ConflictCatalog,
    ) {
        let key = (nt.clone(), terminal.clone());
        let entry = table.entry(key).or_default();
        if entry.contains(&production) {
            return;
        }
        if !entry.is_empty() {
            let mut productions = entry.clone();
            productions.push(production);
            let any_via_follow = reached_via_follow
                || productions
                    .iter()
                    .any(|&p| via_follow.contains(&(nt.clone(), terminal.clone(), p)));
            if any_via_follow {
                catalog.push(ConflictEntry::Ll1FirstFollow {
                    nt,
                    terminal,
                    productions,
                });
            } else {
                catalog.push(ConflictEntry::Ll1FirstFirst {
                    nt,
                    terminal,
                    productions,
                });
            }
        }
        entry.push(production);
    }

    /// True if no cell of the table holds more than one production.
    pub fn is_ll1(table: &Ll1Table) -> bool {
        table.values().all(|v| v.len() <= 1)
    }
}
