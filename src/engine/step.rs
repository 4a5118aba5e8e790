//! A single pipeline step.
//!
//! ```text
//!  text:  "Ö Äpfel"         scope: [^a-z0-9]+
//!          ├┘├┘├───┘
//!  spans:  m  n  m n         m = match, n = untouched
//!          │     │
//!          ▼     ▼
//!       transliterate(op, locale, text, m.range())
//! ```
//!
//! Without a scope the whole text is one match. Every span keeps its
//! position, so the output is the concatenation of untouched spans and the
//! replacements of the matching ones.

use super::char_class::CharClass;
use super::rule::RuleSet;
use super::trigger::TextTraits;
use crate::translit::{Locale, Operation, Transliterate};
use regex::Regex;
use std::fmt;
use std::ops::Range;

/// How the result of a named operation is used.
#[derive(Debug, Clone)]
pub(crate) enum Mode {
    /// Replace the match with whatever the operation returns.
    Replace,
    /// Keep the result only if it is a single code point accepted by the
    /// class; otherwise leave the match unchanged.
    Probe(CharClass),
}

#[derive(Debug, Clone)]
pub(crate) enum TransformStep {
    Named { operation: Operation, locale: Locale, scope: Option<Regex>, mode: Mode },
    Custom { rules: RuleSet, scope: Option<Regex> },
}

impl TransformStep {
    pub fn apply(&self, text: &str, transliterator: &dyn Transliterate) -> String {
        match self {
            TransformStep::Named { operation, locale, scope, mode } => {
                replace_scoped(text, scope.as_ref(), |range| {
                    let result = transliterator.transliterate(*operation, locale, text, range.clone());
                    match mode {
                        Mode::Replace => result,
                        Mode::Probe(valid) if is_single_valid(&result, valid) => result,
                        Mode::Probe(_) => text[range].to_string(),
                    }
                })
            }
            TransformStep::Custom { rules, scope } => {
                replace_scoped(text, scope.as_ref(), |range| rules.apply(&text[range]))
            }
        }
    }

    /// Cheap check whether [`apply`](Self::apply) could change `text`.
    pub fn may_change(&self, text: &str, transliterator: &dyn Transliterate) -> bool {
        match self {
            TransformStep::Named { .. } if !transliterator.respects_text_traits() => true,
            TransformStep::Named { operation, .. } => {
                TextTraits::scan(text).intersects(TextTraits::required_by(*operation))
            }
            TransformStep::Custom { rules, .. } => rules.matches(text),
        }
    }
}

impl fmt::Display for TransformStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformStep::Named { operation, locale, scope, mode } => {
                write!(f, "{operation}")?;
                if !locale.is_root() {
                    write!(f, " [{locale}]")?;
                }
                if let Mode::Probe(_) = mode {
                    f.write_str(" (probe)")?;
                }
                if let Some(scope) = scope {
                    write!(f, " on /{}/", scope.as_str())?;
                }
                Ok(())
            }
            TransformStep::Custom { rules, scope } => {
                write!(f, "rules {:?}", rules.source())?;
                if let Some(scope) = scope {
                    write!(f, " on /{}/", scope.as_str())?;
                }
                Ok(())
            }
        }
    }
}

/// Replace every match of `scope` (or the whole text) with `f(range)`.
fn replace_scoped(text: &str, scope: Option<&Regex>, mut f: impl FnMut(Range<usize>) -> String) -> String {
    let Some(scope) = scope else {
        return f(0..text.len());
    };

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in scope.find_iter(text) {
        out.push_str(&text[last..m.start()]);
        out.push_str(&f(m.range()));
        last = m.end();
    }
    out.push_str(&text[last..]);
    out
}

fn is_single_valid(result: &str, valid: &CharClass) -> bool {
    let mut chars = result.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if valid.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translit::UnicodeTransliterator;

    fn named(operation: Operation, locale: &str, scope: Option<&str>) -> TransformStep {
        TransformStep::Named {
            operation,
            locale: Locale::parse(locale),
            scope: scope.map(|s| Regex::new(s).unwrap()),
            mode: Mode::Replace,
        }
    }

    fn run(step: &TransformStep, text: &str) -> String {
        step.apply(text, &UnicodeTransliterator)
    }

    #[test]
    fn scoped_named_operations() {
        let upper_b = named(Operation::Upper, "", Some("b+"));
        assert_eq!(run(&upper_b, "abc"), "aBc");
        assert_eq!(run(&upper_b, "öbc"), "öBc");
        assert_eq!(run(&upper_b, "💩bc"), "💩Bc");
        assert_eq!(run(&upper_b, "xyz"), "xyz");
    }

    #[test]
    fn unscoped_named_operations() {
        assert_eq!(run(&named(Operation::Upper, "tr", None), "iı"), "İI");
        assert_eq!(run(&named(Operation::Upper, "", None), "iı"), "II");
        assert_eq!(run(&named(Operation::Lower, "tr_Latn_AT", None), "İI"), "iı");
        assert_eq!(run(&named(Operation::Ascii, "de", None), "Äpfel"), "Aepfel");
    }

    #[test]
    fn scoped_custom_rules() {
        let rules = RuleSet::parse("a > 1; c > 3").unwrap();
        let step = TransformStep::Custom { rules, scope: Some(Regex::new("[^b]+").unwrap()) };
        assert_eq!(run(&step, "abc"), "1b3");
        assert_eq!(run(&step, "bbb"), "bbb");
    }

    #[test]
    fn probe_keeps_only_single_valid_code_points() {
        let probe = |valid: &str| TransformStep::Named {
            operation: Operation::Upper,
            locale: Locale::root(),
            scope: None,
            mode: Mode::Probe(CharClass::parse(valid).unwrap()),
        };
        assert_eq!(run(&probe("A-Z"), "a"), "A");
        assert_eq!(run(&probe("a-zA-Z"), "ß"), "ß");
        assert_eq!(run(&probe("a-z"), "a"), "a");
    }

    struct Opaque;

    impl Transliterate for Opaque {
        fn transliterate(&self, _: Operation, _: &Locale, text: &str, range: Range<usize>) -> String {
            text[range].to_string()
        }
    }

    #[test]
    fn may_change_uses_text_traits() {
        let t = &UnicodeTransliterator;
        assert!(!named(Operation::Lower, "", None).may_change("abc-123", t));
        assert!(named(Operation::Lower, "", None).may_change("aBc", t));
        assert!(!named(Operation::Ascii, "", None).may_change("plain ascii", t));

        let step = TransformStep::Custom { rules: RuleSet::parse("x > y").unwrap(), scope: None };
        assert!(!step.may_change("abc", t));
        assert!(step.may_change("xyz", t));
        assert!(!step.may_change("abc", &Opaque));
    }

    #[test]
    fn named_steps_always_run_for_backends_without_trait_guarantees() {
        assert!(named(Operation::Ascii, "", None).may_change("plain ascii", &Opaque));
        assert!(named(Operation::Lower, "", None).may_change("abc-123", &Opaque));
    }

    #[test]
    fn labels() {
        let step = named(Operation::Ascii, "de", Some("[^a-z]+"));
        assert_eq!(step.to_string(), "best-effort-ascii-fold [de] on /[^a-z]+/");
        let step = TransformStep::Custom { rules: RuleSet::parse("a > b").unwrap(), scope: None };
        assert_eq!(step.to_string(), "rules \"a > b\"");
    }
}
