//! Case mapping with Turkic exceptions.
//!
//! Rust's `str::to_uppercase`/`str::to_lowercase` implement the default
//! (locale-independent) full case mappings, including final sigma. Turkish and
//! Azerbaijani additionally map `i ↔ İ` and `ı ↔ I`.

use super::Locale;

const COMBINING_DOT_ABOVE: char = '\u{307}';

pub(super) fn upper(text: &str, locale: &Locale) -> String {
    if !locale.is_turkic() {
        return text.to_uppercase();
    }

    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            'i' => out.push('İ'),
            _ => out.extend(c.to_uppercase()),
        }
    }
    out
}

pub(super) fn lower(text: &str, locale: &Locale) -> String {
    if !locale.is_turkic() {
        return text.to_lowercase();
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            'İ' => out.push('i'),
            // Decomposed İ.
            'I' if chars.peek() == Some(&COMBINING_DOT_ABOVE) => {
                chars.next();
                out.push('i');
            }
            'I' => out.push('ı'),
            _ => out.extend(c.to_lowercase()),
        }
    }
    out
}
