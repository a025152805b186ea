//! Error types for the grammar analysis toolkit.
//!
//! Only input errors are modeled here. Left recursion, left-factor
//! candidates, and LL(1)/LALR(1) conflicts are analysis *results*, not
//! errors — they are recorded in a [`crate::conflict::ConflictCatalog`] and
//! returned from the `analyze_*` entry points.

use thiserror::Error;

/// Fatal errors raised while parsing a grammar.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum GrammarSyntaxError {
    /// A continuation line (`| ...`) appeared before any head line had
    /// established a current lhs.
    #[error("continuation line `{0}` appears before any production")]
    ContinuationBeforeProduction(String),

    /// A head line's left-hand side could not be parsed (empty, or more
    /// than one token before the arrow).
    #[error("production line has no left-hand side: `{0}`")]
    MissingLhs(String),

    /// A non-terminal or terminal name collides with a reserved sentinel
    /// spelling (`$`, `ε`, or the word `epsilon`).
    #[error("symbol `{0}` shadows a reserved sentinel")]
    ReservedSentinelCollision(String),

    /// The grammar text contained no productions at all.
    #[error("grammar text contains no productions")]
    EmptyGrammar,
}

/// Errors surfaced by the toolkit: grammar syntax errors, or I/O failures
/// encountered by the CLI while loading a grammar file.
#[derive(Error, Debug)]
pub enum GrammarError {
    #[error(transparent)]
    Syntax(#[from] GrammarSyntaxError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for fallible results in this crate.
pub type Result<T> = std::result::Result<T, GrammarError>;
