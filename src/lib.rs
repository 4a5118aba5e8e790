//! Rule-driven slug generation.
//!
//! `slugline` turns arbitrary text into a delimiter-separated slug. The input
//! runs through a pipeline of locale-aware transliteration, case folding and
//! custom substitution rules, and is then restricted to a configurable
//! character class:
//!
//! ```text
//! "Öl & Äpfel" (de)  ──pre rules──▶  ──main chain──▶  "oel & aepfel"  ──filter──▶  "oel-aepfel"
//! ```
//!
//! ```
//! use slugline::{SlugGenerator, SlugOptions};
//!
//! let generator = SlugGenerator::default();
//! assert_eq!(generator.generate("Hello World!").unwrap(), "hello-world");
//!
//! let options = SlugOptions::new().valid("a-zA-Z").delimiter("_").pre_transform("& > and");
//! assert_eq!(generator.generate_with("Rock & Roll", &options).unwrap(), "Rock_and_Roll");
//! ```

#[macro_use]
mod macros;
mod api;
mod engine;
mod error;
mod translit;

pub use api::{
    DEFAULT_DELIMITER, DEFAULT_VALID, SlugDetails, SlugGenerator, SlugOptions, StepTrace, slugify, slugify_with,
};
pub use engine::{Stage, TextTraits};
pub use error::SlugError;
pub use translit::{Locale, Operation, Transliterate, UnicodeTransliterator};

#[cfg(test)]
mod tests;
