//! Textual grammar notation parser.
//!
//! Accepts lines of the form
//!
//! ```text
//! A → alpha1 beta1 | alpha2
//! B -> gamma
//!    | delta
//! ```
//!
//! `->` and `→` are equivalent arrows. A line beginning with `|` continues
//! the previous head line's alternatives. Terminals may be quoted (`'for'`)
//! to carry punctuation or to distinguish a keyword spelling from a
//! non-terminal of the same name; the quotes are part of the terminal's
//! spelling, per [`crate::symbol`]. An alternative consisting of the single
//! token `ε` or `epsilon` denotes the empty production.
//!
//! This module only turns text into the raw `(lhs name, rhs token)` shape;
//! classifying names as terminals vs. non-terminals and enforcing the data
//! model's invariants is [`crate::grammar::GrammarModel::build`]'s job.

use crate::error::{GrammarError, GrammarSyntaxError, Result};
use crate::grammar::GrammarModel;
use crate::symbol::Symbol;
use std::collections::HashSet;

const ARROWS: [&str; 2] = ["→", "->"];

impl GrammarModel {
    /// Parses grammar text into a [`GrammarModel`].
    ///
    /// The first non-terminal named on the left of a head line becomes the
    /// grammar's start symbol.
    pub fn parse(text: &str) -> Result<Self> {
        let head_lines = join_continuations(text)?;
        if head_lines.is_empty() {
            return Err(GrammarError::Syntax(GrammarSyntaxError::EmptyGrammar));
        }

        let mut non_terminal_names: HashSet<String> = HashSet::new();
        let mut raw_heads: Vec<(String, Vec<String>)> = Vec::new();
        for line in &head_lines {
            let (lhs, alts) = split_head_line(line)?;
            non_terminal_names.insert(lhs.clone());
            raw_heads.push((lhs, alts));
        }

        let start_symbol = Symbol::non_terminal(raw_heads[0].0.as_str());

        let mut raw: Vec<(Symbol, Vec<Symbol>)> = Vec::new();
        for (lhs, alts) in raw_heads {
            let lhs_symbol = Symbol::non_terminal(lhs);
            for alt in alts {
                let tokens = tokenize_alt(&alt);
                let rhs = classify_tokens(&tokens, &non_terminal_names);
                raw.push((lhs_symbol.clone(), rhs));
            }
        }

        GrammarModel::build(start_symbol, raw).map_err(GrammarError::Syntax)
    }
}

/// Strips comments/blank lines and folds `|`-continuation lines onto the
/// head line they continue, returning one logical line per head.
fn join_continuations(text: &str) -> Result<Vec<String>> {
    let mut heads: Vec<String> = Vec::new();
    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(rest) = line.strip_prefix('|') {
            match heads.last_mut() {
                Some(head) => {
                    head.push('|');
                    head.push_str(rest.trim());
                }
                None => {
                    return Err(GrammarError::Syntax(
                        GrammarSyntaxError::ContinuationBeforeProduction(line.to_string()),
                    ))
                }
            }
        } else {
            heads.push(line.to_string());
        }
    }
    Ok(heads)
}

/// Splits a joined head line into its lhs name and alternative bodies.
fn split_head_line(line: &str) -> Result<(String, Vec<String>)> {
    let arrow_pos = ARROWS
        .iter()
        .filter_map(|a| line.find(a).map(|idx| (idx, *a)))
        .min_by_key(|(idx, _)| *idx);

    let (idx, arrow) = arrow_pos.ok_or_else(|| {
        GrammarError::Syntax(GrammarSyntaxError::MissingLhs(line.to_string()))
    })?;

    let lhs_text = line[..idx].trim();
    let rhs_text = &line[idx + arrow.len()..];

    let mut lhs_tokens = lhs_text.split_whitespace();
    let lhs = match (lhs_tokens.next(), lhs_tokens.next()) {
        (Some(name), None) => name.to_string(),
        _ => {
            return Err(GrammarError::Syntax(GrammarSyntaxError::MissingLhs(
                line.to_string(),
            )))
        }
    };

    let alts = split_alternatives(rhs_text)
        .into_iter()
        .map(|a| a.trim().to_string())
        .collect();
    Ok((lhs, alts))
}

/// Splits on top-level `|` (not inside a quoted terminal).
fn split_alternatives(s: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quote = false;
    for ch in s.chars() {
        match ch {
            '\'' => {
                in_quote = !in_quote;
                current.push(ch);
            }
            '|' if !in_quote => {
                parts.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    parts.push(current);
    parts
}

/// Tokenizes an alternative's body into whitespace-separated words, keeping
/// a quoted terminal (`'...'`) as a single token including its quotes.
fn tokenize_alt(s: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = s.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        if c == '\'' {
            let mut tok = String::new();
            tok.push(chars.next().unwrap());
            for next in chars.by_ref() {
                tok.push(next);
                if next == '\'' {
                    break;
                }
            }
            tokens.push(tok);
        } else {
            let mut tok = String::new();
            while let Some(&c2) = chars.peek() {
                if c2.is_whitespace() {
                    break;
                }
                tok.push(c2);
                chars.next();
            }
            tokens.push(tok);
        }
    }
    tokens
}

/// Converts the raw word tokens of one alternative into `Symbol`s, treating
/// a lone `ε`/`epsilon` token as the empty production.
fn classify_tokens(tokens: &[String], non_terminal_names: &HashSet<String>) -> Vec<Symbol> {
    if tokens.len() == 1 && (tokens[0] == "ε" || tokens[0] == "epsilon") {
        return vec![Symbol::Epsilon];
    }
    tokens
        .iter()
        .map(|tok| {
            if non_terminal_names.contains(tok) {
                Symbol::non_terminal(tok.as_str())
            } else {
                Symbol::terminal(tok.as_str())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_grammar() {
        let text = "S -> A B\nA -> a\nB -> b";
        let model = GrammarModel::parse(text).unwrap();
        assert_eq!(model.original_productions().len(), 3);
        assert_eq!(model.start_symbol(), &Symbol::non_terminal("S"));
    }

    #[test]
    fn test_parse_alternatives_and_continuation() {
        let text = "E -> E '+' T\n   | T\nT -> id";
        let model = GrammarModel::parse(text).unwrap();
        assert_eq!(model.productions_of(&Symbol::non_terminal("E")).len(), 2);
        assert!(model.terminals().contains(&Symbol::terminal("'+'")));
    }

    #[test]
    fn test_parse_epsilon_production() {
        let text = "S -> A\nA -> a\n  | epsilon";
        let model = GrammarModel::parse(text).unwrap();
        let a_prods = model.productions_of(&Symbol::non_terminal("A"));
        assert!(a_prods.iter().any(|p| p.is_epsilon()));
    }

    #[test]
    fn test_parse_arrow_glyph() {
        let text = "S → a";
        let model = GrammarModel::parse(text).unwrap();
        assert_eq!(model.original_productions().len(), 1);
    }

    #[test]
    fn test_continuation_before_production_is_error() {
        let text = "| a b";
        let err = GrammarModel::parse(text).unwrap_err();
        assert!(matches!(
            err,
            GrammarError::Syntax(GrammarSyntaxError::ContinuationBeforeProduction(_))
        ));
    }

    #[test]
    fn test_missing_lhs_is_error() {
        let text = "-> a b";
        let err = GrammarModel::parse(text).unwrap_err();
        assert!(matches!(
            err,
            GrammarError::Syntax(GrammarSyntaxError::MissingLhs(_))
        ));
    }

    #[test]
    fn test_empty_grammar_is_error() {
        let err = GrammarModel::parse("   \n # just a comment\n").unwrap_err();
        assert!(matches!(
            err,
            GrammarError::Syntax(GrammarSyntaxError::EmptyGrammar)
        ));
    }

    #[test]
    fn test_quoted_terminal_distinct_from_bare_word() {
        let text = "S -> 'for' | for";
        let model = GrammarModel::parse(text).unwrap();
        assert!(model.terminals().contains(&Symbol::terminal("'for'")));
        assert!(model.terminals().contains(&Symbol::terminal("for")));
    }
}
