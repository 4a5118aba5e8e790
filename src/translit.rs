//! Transliteration collaborator.
//!
//! The pipeline never maps code points itself: every named step is delegated
//! to an implementation of [`Transliterate`]. This keeps the rule engine free
//! of script tables and lets callers plug in a different backend (for
//! example one backed by ICU) without touching the engine.
//!
//! ```text
//! TransformStep::Named { operation, locale, scope }
//!        │
//!        │  for every scope match m:
//!        └──▶ Transliterate::transliterate(operation, locale, text, m.range())
//!                 │
//!                 ├─ Upper / Lower   → case.rs   (Turkic dotted/dotless I)
//!                 ├─ Latin           → fold.rs   (pinyin, deunicode, script check)
//!                 └─ Ascii           → fold.rs   (deunicode)
//!                        └─ locale exceptions     → exceptions.rs
//! ```
//!
//! The whole working text is passed together with the target range so that
//! implementations can look at surrounding context (German `Ä` becomes `Ae`
//! before a lowercase letter and `AE` otherwise). Only the returned string
//! replaces the range; text outside it is never modified.

mod case;
mod exceptions;
mod fold;
mod locale;

pub use locale::Locale;

use std::borrow::Cow;
use std::ops::Range;
use unicode_normalization::UnicodeNormalization;

operations! {
    /// Named operations understood by a [`Transliterate`] backend.
    pub enum Operation {
        /// Full Unicode uppercase mapping.
        Upper => "uppercase" | "upper" | "any-upper",
        /// Full Unicode lowercase mapping.
        Lower => "lowercase" | "lower" | "any-lower",
        /// Fold non-Latin scripts into Latin letters, keeping diacritics.
        Latin => "best-effort-latin-fold" | "latin" | "latn" | "any-latin",
        /// Fold everything into ASCII.
        Ascii => "best-effort-ascii-fold" | "ascii" | "latin-ascii",
    }
}

/// A transliteration backend.
///
/// Implementations must be pure: the same arguments always produce the same
/// output. The engine calls them from any thread, hence `Send + Sync`.
pub trait Transliterate: Send + Sync {
    /// Transliterate `text[range]` and return its replacement.
    ///
    /// `range` always lies on `char` boundaries. The rest of `text` is
    /// context only.
    fn transliterate(&self, operation: Operation, locale: &Locale, text: &str, range: Range<usize>) -> String;

    /// Canonically compose `text` before the pipeline runs.
    ///
    /// Backends whose tables expect precomposed characters override this;
    /// the default leaves the text alone.
    fn compose<'a>(&self, text: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(text)
    }

    /// Whether the engine may skip named steps that `TextTraits` shows
    /// cannot change the text.
    ///
    /// Return `true` only if `Latin` and `Ascii` leave ASCII text untouched
    /// and `Upper`/`Lower` only change code points that have a Unicode case
    /// mapping. The default is `false`, so every named step of a custom
    /// backend runs.
    fn respects_text_traits(&self) -> bool {
        false
    }
}

/// Default backend built on `deunicode`, `pinyin` and Rust's Unicode case
/// tables, with a small set of locale exceptions.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeTransliterator;

impl Transliterate for UnicodeTransliterator {
    fn transliterate(&self, operation: Operation, locale: &Locale, text: &str, range: Range<usize>) -> String {
        match operation {
            Operation::Upper => case::upper(text.get(range).unwrap_or(""), locale),
            Operation::Lower => case::lower(text.get(range).unwrap_or(""), locale),
            Operation::Latin => fold::latin(text, range, locale),
            Operation::Ascii => fold::ascii(text, range, locale),
        }
    }

    fn respects_text_traits(&self) -> bool {
        true
    }

    fn compose<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if unicode_normalization::is_nfc(text) { Cow::Borrowed(text) } else { Cow::Owned(text.nfc().collect()) }
    }
}
