//! Symbol types and utilities for context-free grammars.
//!
//! This module defines the core [`Symbol`] type shared by every other
//! module: terminals and non-terminals carry an interned name plus the two
//! sentinels (`$` and `ε`) that are never spelled by the grammar text
//! itself.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

/// Represents a symbol in a context-free grammar.
///
/// Terminals and non-terminals are distinguished by how a name was bound
/// while parsing, not by any lexical convention on the name itself (unlike
/// single-letter toy grammars, a name such as `ID` or `"for"` does not by
/// itself say which it is). Epsilon and the end-of-input marker are
/// sentinels that never occur in source text as free-standing symbols.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A terminal symbol, identified by its spelling (quotes included, if
    /// the grammar text quoted it).
    Terminal(Rc<str>),
    /// A non-terminal symbol, identified by its spelling.
    NonTerminal(Rc<str>),
    /// The empty string (ε). Appears only inside FIRST sets and as the sole
    /// element of an empty production body.
    Epsilon,
    /// The end-of-input marker (`$`).
    EndMarker,
}

impl Symbol {
    /// Builds a terminal with the given name.
    pub fn terminal(name: impl Into<Rc<str>>) -> Self {
        Symbol::Terminal(name.into())
    }

    /// Builds a non-terminal with the given name.
    pub fn non_terminal(name: impl Into<Rc<str>>) -> Self {
        Symbol::NonTerminal(name.into())
    }

    /// Checks if this symbol is a terminal.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    /// Checks if this symbol is a non-terminal.
    #[inline]
    pub fn is_non_terminal(&self) -> bool {
        matches!(self, Symbol::NonTerminal(_))
    }

    /// Checks if this symbol is epsilon (ε).
    #[inline]
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    /// Checks if this symbol is the end marker (`$`).
    #[inline]
    pub fn is_end_marker(&self) -> bool {
        matches!(self, Symbol::EndMarker)
    }

    /// Returns the spelling of this symbol, for terminals and non-terminals.
    pub fn name(&self) -> Option<&str> {
        match self {
            Symbol::Terminal(n) | Symbol::NonTerminal(n) => Some(n),
            Symbol::Epsilon | Symbol::EndMarker => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Terminal(n) | Symbol::NonTerminal(n) => write!(f, "{}", n),
            Symbol::Epsilon => write!(f, "ε"),
            Symbol::EndMarker => write!(f, "$"),
        }
    }
}

/// Ordering rank used to keep the sentinels out of the way of alphabetic
/// comparisons: Epsilon < Terminal < NonTerminal < EndMarker, matching the
/// convention the teacher crate uses for its single-character symbols.
fn rank(s: &Symbol) -> u8 {
    match s {
        Symbol::Epsilon => 0,
        Symbol::Terminal(_) => 1,
        Symbol::NonTerminal(_) => 2,
        Symbol::EndMarker => 3,
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        rank(self).cmp(&rank(other)).then_with(|| match (self, other) {
            (Symbol::Terminal(a), Symbol::Terminal(b)) => a.cmp(b),
            (Symbol::NonTerminal(a), Symbol::NonTerminal(b)) => a.cmp(b),
            _ => Ordering::Equal,
        })
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Renders a sequence of symbols the way a production's rhs is displayed:
/// space-separated, `ε` for an empty body.
pub fn symbols_to_string(symbols: &[Symbol]) -> String {
    if symbols == [Symbol::Epsilon] {
        return "ε".to_string();
    }
    symbols
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
