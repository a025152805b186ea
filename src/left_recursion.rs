//! Left recursion and left-factoring analysis for recursive-descent fitness.
//!
//! Left recursion is detected by the first-symbol rule: a production is
//! left-recursive in `A` if its very first rhs symbol is `A` (direct) or if
//! following first-symbols from non-terminal to non-terminal returns to a
//! non-terminal already on the path (indirect). This mirrors the simpler,
//! non-nullable-aware edge rule of the reference analyzer this crate's test
//! grammars were drawn from: a production's first symbol alone decides the
//! edge, without asking whether any nullable prefix before it could also
//! expose the next symbol. A grammar like `A → B a | b` and `B → ε C`,
//! `C → A` is indirectly left-recursive in the fuller, nullable-aware sense
//! but will not be flagged here, because `B`'s first symbol is `ε`, not `C`.

use crate::conflict::{ConflictCatalog, ConflictEntry};
use crate::grammar::GrammarModel;
use crate::symbol::Symbol;
use std::collections::{HashMap, HashSet};

/// Left recursion and left-factoring findings for one grammar.
pub struct LeftRecursionAnalyzer<'g> {
    grammar: &'g GrammarModel,
}

impl<'g> LeftRecursionAnalyzer<'g> {
    pub fn new(grammar: &'g GrammarModel) -> Self {
        Self { grammar }
    }

    /// Runs direct left recursion, indirect left recursion, and left-factor
    /// candidate detection, appending every finding to `catalog`.
    pub fn analyze(&self, catalog: &mut ConflictCatalog) {
        self.check_direct(catalog);
        self.check_indirect(catalog);
        self.check_left_factoring(catalog);
    }

    fn check_direct(&self, catalog: &mut ConflictCatalog) {
        for nt in self.grammar.non_terminals() {
            for prod in self.grammar.productions_of(nt) {
                if prod.rhs.first() == Some(nt) {
                    catalog.push(ConflictEntry::LeftRecursionDirect { nt: nt.clone() });
                    break;
                }
            }
        }
    }

    /// Builds the "first non-terminal symbol" edge graph and reports any
    /// cycle of length greater than one as indirect left recursion.
    fn check_indirect(&self, catalog: &mut ConflictCatalog) {
        let edges = self.first_symbol_edges();
        let mut visited: HashSet<Symbol> = HashSet::new();
        let mut reported: HashSet<Vec<Symbol>> = HashSet::new();

        for nt in self.grammar.non_terminals() {
            if visited.contains(nt) {
                continue;
            }
            let mut stack: Vec<Symbol> = Vec::new();
            let mut on_stack: HashSet<Symbol> = HashSet::new();
            self.dfs(
                nt,
                &edges,
                &mut visited,
                &mut stack,
                &mut on_stack,
                catalog,
                &mut reported,
            );
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn dfs(
        &self,
        node: &Symbol,
        edges: &HashMap<Symbol, Vec<Symbol>>,
        visited: &mut HashSet<Symbol>,
        stack: &mut Vec<Symbol>,
        on_stack: &mut HashSet<Symbol>,
        catalog: &mut ConflictCatalog,
        reported: &mut HashSet<Vec<Symbol>>,
    ) {
        visited.insert(node.clone());
        stack.push(node.clone());
        on_stack.insert(node.clone());

        if let Some(next_nodes) = edges.get(node) {
            for next in next_nodes {
                if on_stack.contains(next) {
                    if let Some(pos) = stack.iter().position(|s| s == next) {
                        let mut cycle: Vec<Symbol> = stack[pos..].to_vec();
                        if cycle.len() > 1 {
                            cycle.push(next.clone());
                            let key = canonical_cycle(&cycle);
                            if reported.insert(key) {
                                catalog.push(ConflictEntry::LeftRecursionIndirect { cycle });
                            }
                        }
                    }
                } else if !visited.contains(next) {
                    self.dfs(next, edges, visited, stack, on_stack, catalog, reported);
                }
            }
        }

        stack.pop();
        on_stack.remove(node);
    }

    /// Edge `A -> B` exists if some production of `A` begins with the
    /// non-terminal `B`. Direct self-loops (`A -> A ...`) are excluded here;
    /// they are reported by [`Self::check_direct`] instead.
    fn first_symbol_edges(&self) -> HashMap<Symbol, Vec<Symbol>> {
        let mut edges: HashMap<Symbol, Vec<Symbol>> = HashMap::new();
        for nt in self.grammar.non_terminals() {
            let mut targets = Vec::new();
            for prod in self.grammar.productions_of(nt) {
                if let Some(Symbol::NonTerminal(_)) = prod.rhs.first() {
                    let first = prod.rhs[0].clone();
                    if &first != nt && !targets.contains(&first) {
                        targets.push(first);
                    }
                }
            }
            edges.insert(nt.clone(), targets);
        }
        edges
    }

    /// Groups each non-terminal's alternatives by longest common prefix and
    /// reports any group of size >= 2 sharing a non-empty prefix.
    fn check_left_factoring(&self, catalog: &mut ConflictCatalog) {
        for nt in self.grammar.non_terminals() {
            let prods = self.grammar.productions_of(nt);
            if prods.len() < 2 {
                continue;
            }
            let mut seen: HashSet<usize> = HashSet::new();
            for i in 0..prods.len() {
                if seen.contains(&i) {
                    continue;
                }
                let mut group = vec![i];
                for j in (i + 1)..prods.len() {
                    if seen.contains(&j) {
                        continue;
                    }
                    let prefix_len = common_prefix_len(&prods[i].rhs, &prods[j].rhs);
                    if prefix_len > 0 {
                        group.push(j);
                    }
                }
                if group.len() > 1 {
                    let prefix_len = group
                        .iter()
                        .skip(1)
                        .fold(prods[group[0]].rhs.len(), |acc, &j| {
                            acc.min(common_prefix_len(&prods[group[0]].rhs, &prods[j].rhs))
                        });
                    if prefix_len > 0 {
                        let common_prefix = prods[group[0]].rhs[..prefix_len].to_vec();
                        let productions = group.iter().map(|&k| prods[k].number).collect();
                        catalog.push(ConflictEntry::LeftFactorCandidate {
                            lhs: nt.clone(),
                            common_prefix,
                            productions,
                        });
                        for &k in &group {
                            seen.insert(k);
                        }
                    }
                }
            }
        }
    }
}

fn common_prefix_len(a: &[Symbol], b: &[Symbol]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

/// Rotates a cycle to start at its lexicographically-least symbol name so
/// that the same cycle discovered from different start points dedupes.
fn canonical_cycle(cycle: &[Symbol]) -> Vec<Symbol> {
    if cycle.len() <= 1 {
        return cycle.to_vec();
    }
    let body = &cycle[..cycle.len() - 1];
    let min_idx = (0..body.len())
        .min_by_key(|&i| body[i].name().unwrap_or_default())
        .unwrap_or(0);
    let mut rotated: Vec<Symbol> = body[min_idx..].iter().chain(body[..min_idx].iter()).cloned().collect();
    rotated.push(rotated[0].clone());
    rotated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::GrammarModel;

    fn nt(s: &str) -> Symbol {
        Symbol::non_terminal(s)
    }

    #[test]
    fn test_direct_left_recursion_detected() {
        let grammar = GrammarModel::parse("E -> E '+' T | T\nT -> id").unwrap();
        let mut catalog = ConflictCatalog::new();
        LeftRecursionAnalyzer::new(&grammar).analyze(&mut catalog);
        assert!(catalog
            .entries()
            .iter()
            .any(|e| matches!(e, ConflictEntry::LeftRecursionDirect { nt } if *nt == nt("E"))));
    }

    #[test]
    fn test_indirect_left_recursion_detected() {
        let grammar = GrammarModel::parse("A -> B a | b\nB -> A c").unwrap();
        let mut catalog = ConflictCatalog::new();
        LeftRecursionAnalyzer::new(&grammar).analyze(&mut catalog);
        assert!(catalog
            .entries()
            .iter()
            .any(|e| matches!(e, ConflictEntry::LeftRecursionIndirect { .. })));
    }

    #[test]
    fn test_no_left_recursion_for_clean_grammar() {
        let grammar = GrammarModel::parse("S -> A B\nA -> a\nB -> b").unwrap();
        let mut catalog = ConflictCatalog::new();
        LeftRecursionAnalyzer::new(&grammar).analyze(&mut catalog);
        assert!(!catalog
            .entries()
            .iter()
            .any(|e| matches!(e, ConflictEntry::LeftRecursionDirect { .. })
                || matches!(e, ConflictEntry::LeftRecursionIndirect { .. })));
    }

    #[test]
    fn test_left_factor_candidate_detected() {
        let grammar = GrammarModel::parse("S -> if_stmt 'else' s | if_stmt s").unwrap();
        let mut catalog = ConflictCatalog::new();
        LeftRecursionAnalyzer::new(&grammar).analyze(&mut catalog);
        assert!(catalog
            .entries()
            .iter()
            .any(|e| matches!(e, ConflictEntry::LeftFactorCandidate { lhs, .. } if *lhs == nt("S"))));
    }
}
