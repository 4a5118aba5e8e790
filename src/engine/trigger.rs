//! Text-trait scanning.
//!
//! Before a named step runs, the working text is scanned for a few coarse
//! traits. A step whose operation cannot change text lacking the traits it
//! needs is skipped. The scan is a single pass over the code points and stops
//! early once every trait has been seen.
//!
//! False positives are fine (the step simply runs); false negatives are not,
//! so each trait is defined by exactly the property the operation acts on.

use crate::translit::Operation;

bitflags::bitflags! {
    /// Coarse characteristics of a text.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TextTraits: u8 {
        /// Contains a code point outside ASCII.
        const NON_ASCII      = 1 << 0;
        /// Contains a code point whose uppercase mapping differs from itself.
        const UPPERCASABLE   = 1 << 1;
        /// Contains a code point whose lowercase mapping differs from itself.
        const LOWERCASABLE   = 1 << 2;
    }
}

impl TextTraits {
    pub fn scan(text: &str) -> Self {
        let mut traits = TextTraits::empty();

        for c in text.chars() {
            if !c.is_ascii() {
                traits |= TextTraits::NON_ASCII;
            }
            if !traits.contains(TextTraits::UPPERCASABLE) && changes(c.to_uppercase(), c) {
                traits |= TextTraits::UPPERCASABLE;
            }
            if !traits.contains(TextTraits::LOWERCASABLE) && changes(c.to_lowercase(), c) {
                traits |= TextTraits::LOWERCASABLE;
            }
            if traits.is_all() {
                break;
            }
        }

        traits
    }

    /// Traits a text must have for `operation` to possibly change it.
    ///
    /// Locale exceptions only ever touch non-ASCII code points or letters that
    /// already have a case mapping (Turkic `i`/`I`), so they are covered.
    /// Backends that do not opt in through `respects_text_traits` never
    /// have their steps skipped.
    pub fn required_by(operation: Operation) -> Self {
        match operation {
            Operation::Upper => TextTraits::UPPERCASABLE,
            Operation::Lower => TextTraits::LOWERCASABLE,
            Operation::Latin | Operation::Ascii => TextTraits::NON_ASCII,
        }
    }
}

fn changes(mut mapped: impl Iterator<Item = char>, c: char) -> bool {
    mapped.next() != Some(c) || mapped.next().is_some()
}
