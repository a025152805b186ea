//! Grammar analysis toolkit.
//!
//! Given a context-free grammar in a textual notation, decides whether it
//! fits recursive-descent, LL(1), LR(0), or LALR(1) parsing, and exposes
//! the diagnostics behind that verdict: FIRST/FOLLOW sets, left recursion
//! and left-factor candidates, LL(1) tables, LR(0)/LR(1) item-set
//! automata, and LALR(1) ACTION/GOTO tables. Conflicts are analysis
//! results, never errors — only malformed grammar text is an `Err`.
//!
//! # References
//! Aho, Alfred V. et al. "Compilers: Principles, Techniques, and Tools" (2nd Edition).
//! Addison-Wesley, 2006.

pub mod api;
pub mod cli;
pub mod conflict;
pub mod error;
pub mod grammar;
pub mod lalr;
pub mod left_recursion;
pub mod ll1;
pub mod lr0;
pub mod lr1;
pub mod parser;
pub mod sets;
pub mod symbol;

pub use api::{
    analyze_lalr, analyze_ll1, analyze_lr0, analyze_recursive_descent, LalrAnalysis, Ll1Analysis,
    Lr0Analysis, RecursiveDescentAnalysis,
};
pub use conflict::{ConflictCatalog, ConflictEntry};
pub use error::{GrammarError, GrammarSyntaxError, Result};
pub use grammar::{GrammarModel, Production};
pub use sets::SetComputer;
pub use symbol::Symbol;
