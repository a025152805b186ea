//! The catalog of analysis findings.
//!
//! Every discipline's analyzer appends to a [`ConflictCatalog`] instead of
//! returning `Err`: left recursion, left-factor candidates, LL(1) table
//! conflicts, and shift/reduce or reduce/reduce conflicts are all normal
//! analysis *results*, not failures.

use crate::symbol::Symbol;
use std::fmt;

/// One finding recorded against a grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictEntry {
    /// `nt`'s own production begins with `nt` itself (`nt → nt ...`).
    LeftRecursionDirect { nt: Symbol },

    /// A cycle of non-terminals each reachable as the leading symbol of the
    /// previous one's production, back to the start of the cycle.
    LeftRecursionIndirect { cycle: Vec<Symbol> },

    /// Two or more productions of `lhs` share a common leading symbol
    /// sequence, defeating a single-token-lookahead recursive descent
    /// choice.
    LeftFactorCandidate {
        lhs: Symbol,
        common_prefix: Vec<Symbol>,
        productions: Vec<usize>,
    },

    /// Two productions of `nt` have overlapping FIRST sets (or one is
    /// nullable and its FIRST overlaps another's FOLLOW), so an LL(1) table
    /// cell would hold more than one production.
    Ll1FirstFirst {
        nt: Symbol,
        terminal: Symbol,
        productions: Vec<usize>,
    },

    /// A nullable production's FOLLOW(nt) overlaps another production's
    /// FIRST(nt), so the table cell for that terminal is ambiguous between
    /// deriving ε and deriving the other alternative.
    Ll1FirstFollow {
        nt: Symbol,
        terminal: Symbol,
        productions: Vec<usize>,
    },

    /// State `state` can both shift on `terminal` and reduce by `production`.
    ShiftReduce {
        state: usize,
        terminal: Symbol,
        production: usize,
    },

    /// State `state` can reduce by either of two productions on the same
    /// lookahead.
    ReduceReduce {
        state: usize,
        terminal: Symbol,
        productions: (usize, usize),
    },
}

impl fmt::Display for ConflictEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictEntry::LeftRecursionDirect { nt } => {
                write!(f, "direct left recursion on {nt}")
            }
            ConflictEntry::LeftRecursionIndirect { cycle } => {
                write!(
                    f,
                    "indirect left recursion: {}",
                    cycle
                        .iter()
                        .map(|s| s.to_string())
                        .collect::<Vec<_>>()
                        .join(" → ")
                )
            }
            ConflictEntry::LeftFactorCandidate {
                lhs,
                common_prefix,
                ..
            } => {
                let prefix = common_prefix
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>()
                    .join(" ");
                write!(f, "{lhs} alternatives share the prefix `{prefix}`")
            }
            ConflictEntry::Ll1FirstFirst { nt, terminal, .. } => {
                write!(f, "FIRST/FIRST conflict for {nt} on {terminal}")
            }
            ConflictEntry::Ll1FirstFollow { nt, terminal, .. } => {
                write!(f, "FIRST/FOLLOW conflict for {nt} on {terminal}")
            }
            ConflictEntry::ShiftReduce {
                state, terminal, ..
            } => write!(f, "shift/reduce conflict in state {state} on {terminal}"),
            ConflictEntry::ReduceReduce {
                state, terminal, ..
            } => write!(f, "reduce/reduce conflict in state {state} on {terminal}"),
        }
    }
}

/// An append-only log of findings produced by one analyzer run.
#[derive(Debug, Clone, Default)]
pub struct ConflictCatalog {
    entries: Vec<ConflictEntry>,
}

impl ConflictCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ConflictEntry) {
        tracing::warn!(%entry, "conflict recorded");
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ConflictEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
