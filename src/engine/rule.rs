//! Custom substitution rules.
//!
//! A rule string is a list of clauses separated by `;`:
//!
//! ```text
//! ö > oe; ä > ae ; '&' >  and  ;
//! └─┬─┘   └──┬──┘  └──────────┬─────────┘
//! source > replacement   (quoted / escaped literals)
//! ```
//!
//! - Unescaped whitespace is insignificant. Whitespace that must survive is
//!   escaped (` `, `\ `) or quoted (`' '`).
//! - `'text'` is literal text; `''` is a literal apostrophe, inside or
//!   outside quotes.
//! - `\c` makes any other character literal (`\>`, `\;`, `\\`).
//! - Empty clauses are skipped, so a trailing `;` is fine.
//!
//! Clauses apply in a single left-to-right pass. When several sources match at
//! the same position, the clause declared first wins, even if a later one is
//! longer. Replacements are not rescanned.

use super::escape::{self, EscapeError};
use aho_corasick::{AhoCorasick, MatchKind};
use std::iter::Peekable;
use std::str::Chars;
use thiserror::Error;

/// One `source > replacement` pair with escapes resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Substitution {
    pub source: String,
    pub replacement: String,
}

/// A parse failure, with the clause it happened in.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} near \"{fragment}\"")]
pub(crate) struct RuleSyntaxError {
    pub fragment: String,
    pub kind: RuleErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub(crate) enum RuleErrorKind {
    #[error("missing '>'")]
    MissingArrow,
    #[error("more than one '>'")]
    MultipleArrows,
    #[error("empty source")]
    EmptySource,
    #[error("unterminated escape")]
    UnterminatedEscape,
    #[error("invalid hex escape")]
    InvalidHexEscape,
    #[error("unpaired surrogate escape")]
    LoneSurrogate,
    #[error("unterminated quote")]
    UnterminatedQuote,
    #[error("too many clauses")]
    TooLarge,
}

impl From<EscapeError> for RuleErrorKind {
    fn from(err: EscapeError) -> Self {
        match err {
            EscapeError::Unterminated => RuleErrorKind::UnterminatedEscape,
            EscapeError::InvalidHex => RuleErrorKind::InvalidHexEscape,
            EscapeError::LoneSurrogate => RuleErrorKind::LoneSurrogate,
        }
    }
}

/// A parsed, ready-to-apply rule string.
#[derive(Debug, Clone)]
pub(crate) struct RuleSet {
    source: String,
    pairs: Vec<Substitution>,
    replacements: Vec<String>,
    matcher: Option<AhoCorasick>,
}

/// Lexical unit of a clause.
enum Piece {
    Literal(char),
    Arrow,
}

impl RuleSet {
    pub fn parse(source: &str) -> Result<Self, RuleSyntaxError> {
        let mut pairs = Vec::new();

        for clause in split_clauses(source) {
            let fail = |kind: RuleErrorKind| RuleSyntaxError { fragment: clause.trim().to_string(), kind };

            let pieces = lex_clause(clause).map_err(fail)?;
            if pieces.is_empty() {
                continue;
            }

            let mut sides = pieces.split(|p| matches!(p, Piece::Arrow));
            let lhs = sides.next().unwrap_or_default();
            let Some(rhs) = sides.next() else {
                return Err(fail(RuleErrorKind::MissingArrow));
            };
            if sides.next().is_some() {
                return Err(fail(RuleErrorKind::MultipleArrows));
            }
            if lhs.is_empty() {
                return Err(fail(RuleErrorKind::EmptySource));
            }

            pairs.push(Substitution { source: literal_text(lhs), replacement: literal_text(rhs) });
        }

        let matcher = if pairs.is_empty() {
            None
        } else {
            let built = AhoCorasick::builder()
                .match_kind(MatchKind::LeftmostFirst)
                .build(pairs.iter().map(|p| p.source.as_str()))
                .map_err(|_| RuleSyntaxError { fragment: source.trim().to_string(), kind: RuleErrorKind::TooLarge })?;
            Some(built)
        };
        let replacements = pairs.iter().map(|p| p.replacement.clone()).collect();

        Ok(RuleSet { source: source.to_string(), pairs, replacements, matcher })
    }

    /// The rule string this set was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn pairs(&self) -> &[Substitution] {
        &self.pairs
    }

    /// Whether applying the rules could change `text`.
    pub fn matches(&self, text: &str) -> bool {
        self.matcher.as_ref().is_some_and(|m| m.is_match(text))
    }

    /// Apply every clause to `text` in one pass.
    pub fn apply(&self, text: &str) -> String {
        match &self.matcher {
            Some(matcher) => matcher.replace_all(text, &self.replacements),
            None => text.to_string(),
        }
    }
}

fn literal_text(pieces: &[Piece]) -> String {
    pieces
        .iter()
        .filter_map(|p| match p {
            Piece::Literal(c) => Some(*c),
            Piece::Arrow => None,
        })
        .collect()
}

/// Split on `;` outside quotes and escapes.
fn split_clauses(source: &str) -> Vec<&str> {
    let mut clauses = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    let mut quoted = false;

    for (idx, c) in source.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if !quoted => escaped = true,
            '\'' => quoted = !quoted,
            ';' if !quoted => {
                clauses.push(&source[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    clauses.push(&source[start..]);
    clauses
}

fn lex_clause(clause: &str) -> Result<Vec<Piece>, RuleErrorKind> {
    let mut pieces = Vec::new();
    let mut chars = clause.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '>' => pieces.push(Piece::Arrow),
            '\\' => {
                let kind = chars.next().ok_or(RuleErrorKind::UnterminatedEscape)?;
                let literal = escape::code_point(kind, &mut chars)?.unwrap_or(kind);
                pieces.push(Piece::Literal(literal));
            }
            '\'' => lex_quoted(&mut chars, &mut pieces)?,
            c if c.is_whitespace() => {}
            c => pieces.push(Piece::Literal(c)),
        }
    }

    Ok(pieces)
}

// Called after an opening apostrophe. `''` right away is a literal apostrophe;
// otherwise everything up to the closing apostrophe is literal, with `''`
// standing for one apostrophe.
fn lex_quoted(chars: &mut Peekable<Chars<'_>>, pieces: &mut Vec<Piece>) -> Result<(), RuleErrorKind> {
    if chars.next_if_eq(&'\'').is_some() {
        pieces.push(Piece::Literal('\''));
        return Ok(());
    }

    loop {
        match chars.next() {
            None => return Err(RuleErrorKind::UnterminatedQuote),
            Some('\'') if chars.next_if_eq(&'\'').is_some() => pieces.push(Piece::Literal('\'')),
            Some('\'') => return Ok(()),
            Some(c) => pieces.push(Piece::Literal(c)),
        }
    }
}
