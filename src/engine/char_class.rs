//! Character-class specifications.
//!
//! A spec is a run of implicitly unioned items, written the way they would
//! appear between the brackets of a regex class, without the brackets:
//!
//! ```text
//! a-zäöüß        ranges and literals
//! b\d            literal + Perl shorthand (\d \D \w \W \s \S)
//! \p{Ll}\p{Lu}   general categories
//! \p{Latin}      scripts
//! ’'             any literal code point
//! ```
//!
//! Matching is case-sensitive; `a-z` says nothing about `A-Z`. An empty spec
//! matches nothing. Property items are checked against the `regex` crate's
//! Unicode tables, which are also used to validate property names.

use super::escape::{self, EscapeError};
use regex::Regex;
use std::iter::Peekable;
use std::str::Chars;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum ClassSyntaxError {
    #[error("range {0:?}-{1:?} is out of order")]
    ReversedRange(char, char),
    #[error("a range cannot end in a class shorthand")]
    ShorthandInRange,
    #[error("unknown Unicode property {0:?}")]
    UnknownProperty(String),
    #[error("unterminated property name")]
    UnterminatedProperty,
    #[error("unterminated escape")]
    UnterminatedEscape,
    #[error("invalid hex escape")]
    InvalidHexEscape,
    #[error("unpaired surrogate escape")]
    LoneSurrogate,
}

impl From<EscapeError> for ClassSyntaxError {
    fn from(err: EscapeError) -> Self {
        match err {
            EscapeError::Unterminated => ClassSyntaxError::UnterminatedEscape,
            EscapeError::InvalidHex => ClassSyntaxError::InvalidHexEscape,
            EscapeError::LoneSurrogate => ClassSyntaxError::LoneSurrogate,
        }
    }
}

#[derive(Debug, Clone)]
enum Item {
    Char(char),
    Range(char, char),
    /// `\p{..}`, `\P{..}` or a Perl shorthand, kept in regex syntax.
    Property { syntax: String, matcher: Regex },
}

/// A total predicate over code points.
#[derive(Debug, Clone)]
pub(crate) struct CharClass {
    spec: String,
    items: Vec<Item>,
    body: String,
}

enum Atom {
    Char(char),
    Property(String),
}

impl CharClass {
    pub fn parse(spec: &str) -> Result<Self, ClassSyntaxError> {
        let mut items = Vec::new();
        let mut chars = spec.chars().peekable();

        while let Some(atom) = next_atom(&mut chars)? {
            let low = match atom {
                Atom::Property(syntax) => {
                    items.push(property(syntax)?);
                    continue;
                }
                Atom::Char(c) => c,
            };

            // A `-` is a range operator only between two atoms.
            let mut lookahead = chars.clone();
            if lookahead.next() == Some('-') && lookahead.peek().is_some() {
                chars.next();
                let high = match next_atom(&mut chars)? {
                    Some(Atom::Char(high)) => high,
                    Some(Atom::Property(_)) => return Err(ClassSyntaxError::ShorthandInRange),
                    None => return Err(ClassSyntaxError::UnterminatedEscape),
                };
                if low > high {
                    return Err(ClassSyntaxError::ReversedRange(low, high));
                }
                items.push(Item::Range(low, high));
            } else {
                items.push(Item::Char(low));
            }
        }

        let body = items.iter().map(render).collect();
        Ok(CharClass { spec: spec.to_string(), items, body })
    }

    /// The spec string as given.
    pub fn spec(&self) -> &str {
        &self.spec
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, c: char) -> bool {
        self.items.iter().any(|item| match item {
            Item::Char(x) => *x == c,
            Item::Range(low, high) => (*low..=*high).contains(&c),
            Item::Property { matcher, .. } => {
                let mut buf = [0u8; 4];
                matcher.is_match(c.encode_utf8(&mut buf))
            }
        })
    }

    /// The class rendered as the inside of a regex bracket expression.
    /// Empty for an empty class.
    pub fn regex_body(&self) -> &str {
        &self.body
    }
}

fn next_atom(chars: &mut Peekable<Chars<'_>>) -> Result<Option<Atom>, ClassSyntaxError> {
    let Some(c) = chars.next() else {
        return Ok(None);
    };
    if c != '\\' {
        return Ok(Some(Atom::Char(c)));
    }

    let kind = chars.next().ok_or(ClassSyntaxError::UnterminatedEscape)?;
    let atom = match kind {
        'd' | 'D' | 'w' | 'W' | 's' | 'S' => Atom::Property(format!("\\{kind}")),
        'p' | 'P' => Atom::Property(property_syntax(kind, chars)?),
        _ => Atom::Char(escape::code_point(kind, chars)?.unwrap_or(kind)),
    };
    Ok(Some(atom))
}

fn property_syntax(kind: char, chars: &mut Peekable<Chars<'_>>) -> Result<String, ClassSyntaxError> {
    if chars.next_if_eq(&'{').is_none() {
        // One-letter form: \pL, \PN.
        let name = chars.next().ok_or(ClassSyntaxError::UnterminatedProperty)?;
        return Ok(format!("\\{kind}{name}"));
    }

    let mut name = String::new();
    loop {
        match chars.next() {
            None => return Err(ClassSyntaxError::UnterminatedProperty),
            Some('}') => break,
            Some(c) => name.push(c),
        }
    }
    Ok(format!("\\{kind}{{{}}}", name.trim()))
}

fn property(syntax: String) -> Result<Item, ClassSyntaxError> {
    match Regex::new(&format!(r"\A[{syntax}]\z")) {
        Ok(matcher) => Ok(Item::Property { syntax, matcher }),
        Err(_) => Err(ClassSyntaxError::UnknownProperty(syntax)),
    }
}

fn render(item: &Item) -> String {
    match item {
        Item::Char(c) => escape_char(*c),
        Item::Range(low, high) => format!("{}-{}", escape_char(*low), escape_char(*high)),
        Item::Property { syntax, .. } => syntax.clone(),
    }
}

fn escape_char(c: char) -> String {
    let mut buf = [0u8; 4];
    regex::escape(c.encode_utf8(&mut buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(spec: &str) -> CharClass {
        CharClass::parse(spec).unwrap()
    }

    #[test]
    fn ranges_and_literals() {
        let c = class("a-zäöüß");
        assert!(c.contains('a') && c.contains('m') && c.contains('z'));
        assert!(c.contains('ö') && c.contains('ß'));
        assert!(!c.contains('A'));
        assert!(!c.contains('-'));
    }

    #[test]
    fn turkish_alphabet_spec() {
        let c = class("a-pr-vyzçğıöşü");
        assert!(c.contains('ı') && c.contains('i') && c.contains('ç'));
        assert!(!c.contains('q') && !c.contains('w') && !c.contains('x'));
    }

    #[test]
    fn properties_and_shorthands() {
        let c = class("b\\d");
        assert!(c.contains('b') && c.contains('3') && c.contains('٣'));
        assert!(!c.contains('a'));

        let c = class("\\p{Ll}");
        assert!(c.contains('ä') && c.contains('ǉ'));
        assert!(!c.contains('Ä') && !c.contains('ǈ'));

        let c = class("\\p{Latin}");
        assert!(c.contains('ù') && !c.contains('山'));

        let c = class("\\pL");
        assert!(c.contains('山') && !c.contains('1'));
    }

    #[test]
    fn dash_is_literal_at_the_edges() {
        let c = class("-a");
        assert!(c.contains('-') && c.contains('a') && !c.contains('b'));
        let c = class("a-");
        assert!(c.contains('-') && c.contains('a'));
        let c = class("a\\-z");
        assert!(c.contains('-') && !c.contains('m'));
    }

    #[test]
    fn empty_spec_matches_nothing() {
        let c = class("");
        assert!(c.is_empty());
        assert!(!c.contains('a') && !c.contains('\0') && !c.contains(char::MAX));
        assert_eq!(c.regex_body(), "");
    }

    #[test]
    fn rejects_malformed_specs() {
        assert_eq!(CharClass::parse("z-a").unwrap_err(), ClassSyntaxError::ReversedRange('z', 'a'));
        assert!(matches!(CharClass::parse("\\p{NotAThing}"), Err(ClassSyntaxError::UnknownProperty(_))));
        assert_eq!(CharClass::parse("\\p{Ll").unwrap_err(), ClassSyntaxError::UnterminatedProperty);
        assert_eq!(CharClass::parse("a\\").unwrap_err(), ClassSyntaxError::UnterminatedEscape);
        assert_eq!(CharClass::parse("a-\\d").unwrap_err(), ClassSyntaxError::ShorthandInRange);
    }

    #[test]
    fn regex_body_round_trips_through_regex() {
        let c = class("a-z^\\]\\p{Lu}");
        let re = Regex::new(&format!("^[{}]+$", c.regex_body())).unwrap();
        assert!(re.is_match("ab^]XY"));
        assert!(!re.is_match("-"));
        for ch in ['a', '^', ']', 'Ä', '-', '1'] {
            assert_eq!(re.is_match(&ch.to_string()), c.contains(ch), "{ch:?}");
        }
    }
}
